// self
use crate::events::{FailureDisposition, RewriteOutcome};

/// Records a rewrite outcome via the global metrics recorder (when enabled).
pub fn record_rewrite_outcome(outcome: RewriteOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("oidc_policy_rewrite_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Records the action chosen for a classified failure (when enabled).
pub fn record_failure_action(disposition: &FailureDisposition) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("oidc_policy_failure_total", "action" => disposition.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = disposition;
	}
}
