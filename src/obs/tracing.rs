// self
use crate::{_prelude::*, obs::HookKind, policy::PolicyId};

/// A span builder used around hook invocations.
#[derive(Clone, Debug)]
pub struct EventSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl EventSpan {
	/// Creates a new span tagged with the provided hook kind + stage.
	pub fn new(kind: HookKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("oidc_policy_broker.event", hook = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Enters the span for the duration of the hook body.
	pub fn entered(self) -> EventSpanGuard {
		#[cfg(feature = "tracing")]
		{
			EventSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			EventSpanGuard {}
		}
	}
}

/// RAII guard returned by [`EventSpan::entered`].
pub struct EventSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for EventSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("EventSpanGuard(..)")
	}
}

/// Warns that a round-tripped policy value is not part of the configured set.
pub(crate) fn warn_unknown_policy(requested: &str) {
	#[cfg(feature = "tracing")]
	tracing::warn!(requested, "Ignoring a requested policy outside the configured set.");
	#[cfg(not(feature = "tracing"))]
	let _ = requested;
}

/// Warns that the issuer address carried no default policy segment to replace.
pub(crate) fn warn_missing_policy_segment(default: &PolicyId, requested: &PolicyId) {
	#[cfg(feature = "tracing")]
	tracing::warn!(
		default = default.as_ref(),
		requested = requested.as_ref(),
		"Issuer address carries no default policy segment; keeping the original address."
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (default, requested);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn event_span_noop_without_tracing() {
		let _guard = EventSpan::new(HookKind::RedirectToProvider, "test").entered();
		// Compile-time smoke test ensures the guard exists even when tracing is disabled.
	}
}
