//! Authentication event hooks: the two extension points the host's OIDC client invokes.
//!
//! [`AuthenticationEvents`] splits the original single event surface into one method per
//! concern: [`on_redirect_to_provider`](AuthenticationEvents::on_redirect_to_provider) rewrites
//! the outgoing authorization request and
//! [`on_remote_failure`](AuthenticationEvents::on_remote_failure) converts provider failures
//! into recovery commands. [`PolicyEventHandler`] is the policy-aware implementation, installed
//! once per process over a shared [`PolicyConfig`].

pub mod classify;
pub mod context;
pub mod rewrite;

pub use classify::*;
pub use context::*;
pub use rewrite::*;

// self
use crate::{
	_prelude::*,
	challenge::{AuthenticationProperties, AuthorizationRequest},
	obs::{self, EventSpan, HookKind},
	policy::PolicyConfig,
};

/// Hook surface invoked by the host's OIDC client around challenges and failures.
///
/// Implementations must be `Send + Sync`; the host typically holds one behind `Arc<dyn ...>`
/// next to its client registration.
pub trait AuthenticationEvents: Send + Sync {
	/// Pre-challenge hook. Runs right before the authorization request is rendered and may
	/// mutate both the request and the per-attempt properties.
	fn on_redirect_to_provider(
		&self,
		properties: &mut AuthenticationProperties,
		request: &mut AuthorizationRequest,
	);

	/// Post-failure hook. Classifies the failure and records the recovery response; once it
	/// returns, the host executes the recorded command instead of its default error handling.
	fn on_remote_failure(&self, failure: &RemoteFailure, context: &FailureContext);
}

/// Policy-aware [`AuthenticationEvents`] implementation over a shared configuration.
#[derive(Clone, Debug)]
pub struct PolicyEventHandler {
	config: Arc<PolicyConfig>,
}
impl PolicyEventHandler {
	/// Creates a handler over the shared configuration snapshot.
	pub fn new(config: Arc<PolicyConfig>) -> Self {
		Self { config }
	}

	/// Configuration snapshot the handler operates on.
	pub fn config(&self) -> &PolicyConfig {
		&self.config
	}

	/// Applies the policy-switch rewrite to one outgoing request; see the [`rewrite`] module
	/// for the exact contract.
	pub fn rewrite_for_policy(
		&self,
		properties: &mut AuthenticationProperties,
		request: &mut AuthorizationRequest,
	) -> RewriteOutcome {
		let _guard = EventSpan::new(HookKind::RedirectToProvider, "rewrite_for_policy").entered();
		let outcome = rewrite::rewrite_for_policy(&self.config, properties, request);

		obs::record_rewrite_outcome(outcome);

		outcome
	}

	/// Classifies a remote failure without executing the disposition.
	pub fn classify(&self, failure: &RemoteFailure) -> FailureDisposition {
		classify::classify(&self.config, failure)
	}
}
impl AuthenticationEvents for PolicyEventHandler {
	fn on_redirect_to_provider(
		&self,
		properties: &mut AuthenticationProperties,
		request: &mut AuthorizationRequest,
	) {
		self.rewrite_for_policy(properties, request);
	}

	fn on_remote_failure(&self, failure: &RemoteFailure, context: &FailureContext) {
		let _guard = EventSpan::new(HookKind::RemoteFailure, "on_remote_failure").entered();

		// The handler owns every failure once installed; the host's default error page must
		// never surface.
		context.mark_handled();

		let disposition = self.classify(failure);

		obs::record_failure_action(&disposition);

		match disposition {
			FailureDisposition::PolicySwitch { policy, redirect_path } => {
				let mut properties = AuthenticationProperties::with_redirect_uri(redirect_path);

				properties.request_policy(&self.config.policy_property_key, &policy);
				context.respond(ResponseCommand::Challenge { properties });
			},
			FailureDisposition::SafePage { path } | FailureDisposition::ErrorPage { path } =>
				context.respond(ResponseCommand::Redirect { path }),
		}
	}
}
