//! Failure-handling surface shared between the post-failure hook and the host adapter.
//!
//! The hook never touches the host's response pipeline directly. It records exactly one
//! [`ResponseCommand`] into a [`ResponseCommandSlot`] and flips the handled flag; the adapter
//! takes the command once the hook returns and executes it.

// std
use std::sync::atomic::{AtomicBool, Ordering};
// self
use crate::{_prelude::*, challenge::AuthenticationProperties};

/// Response the host adapter must execute after the failure hook ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseCommand {
	/// Issue a fresh challenge carrying the attached per-attempt properties.
	Challenge {
		/// Properties for the new attempt, including the target policy entry.
		properties: AuthenticationProperties,
	},
	/// Redirect the user to an application-relative path.
	Redirect {
		/// Application-relative target path.
		path: String,
	},
}

/// Thread-safe slot handing one [`ResponseCommand`] from the failure hook to the host adapter.
///
/// The host creates a fresh slot per failure and reads the recorded command immediately after
/// the hook returns; `take` consumes the value so a command is never executed twice.
#[derive(Clone, Debug, Default)]
pub struct ResponseCommandSlot(Arc<Mutex<Option<ResponseCommand>>>);
impl ResponseCommandSlot {
	/// Records the command for the current failure, replacing any previous one.
	pub fn store(&self, command: ResponseCommand) {
		*self.0.lock() = Some(command);
	}

	/// Returns the recorded command, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseCommand> {
		self.0.lock().take()
	}
}

/// Mutable view over one remote failure handed to the post-failure hook.
#[derive(Debug, Default)]
pub struct FailureContext {
	handled: AtomicBool,
	commands: ResponseCommandSlot,
}
impl FailureContext {
	/// Creates an unhandled context with an empty command slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Marks the failure as handled so the host's default error handling stays out of the way.
	pub fn mark_handled(&self) {
		self.handled.store(true, Ordering::Release);
	}

	/// Checks whether the hook took responsibility for the failure.
	pub fn is_handled(&self) -> bool {
		self.handled.load(Ordering::Acquire)
	}

	/// Records the response command the host adapter must execute.
	pub fn respond(&self, command: ResponseCommand) {
		self.commands.store(command);
	}

	/// Takes the recorded response command, if any.
	pub fn take_command(&self) -> Option<ResponseCommand> {
		self.commands.take()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn commands_are_consumed_once() {
		let context = FailureContext::new();

		assert!(!context.is_handled());

		context.mark_handled();
		context.respond(ResponseCommand::Redirect { path: "/".into() });

		assert!(context.is_handled());
		assert_eq!(
			context.take_command(),
			Some(ResponseCommand::Redirect { path: "/".into() })
		);
		assert_eq!(context.take_command(), None);
	}
}
