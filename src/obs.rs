//! Optional observability helpers for the event hooks.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oidc_policy_broker.event` with the `hook`
//!   and `stage` (call site) fields, plus warnings for the silent-fallback paths.
//! - Enable `metrics` to increment the `oidc_policy_rewrite_total` counter per rewrite pass
//!   (labeled by `outcome`) and `oidc_policy_failure_total` per classified failure (labeled by
//!   `action`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Event hooks observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
	/// Pre-challenge rewrite hook.
	RedirectToProvider,
	/// Post-failure classification hook.
	RemoteFailure,
}
impl HookKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			HookKind::RedirectToProvider => "redirect_to_provider",
			HookKind::RemoteFailure => "remote_failure",
		}
	}
}
impl Display for HookKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
