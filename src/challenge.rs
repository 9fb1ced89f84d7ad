//! Challenge issuance: the relying-party half that starts an authorization attempt.
//!
//! A [`Challenge`] seeds an [`AuthorizationRequest`] from the shared configuration, lets the
//! pre-challenge hook retarget it, then renders the user-facing authorize URL together with the
//! handshake material ([`ChallengeSession`]) the host needs on the return leg. Per-attempt state
//! rides inside the `state` parameter as a [`StateEnvelope`]; nothing is stored server-side.

/// Per-attempt property bag that survives the redirect round trip.
pub mod properties;
/// Outgoing authorization request and its URL rendering.
pub mod request;
/// Handshake material generated per challenge.
pub mod session;
/// Round-trip state envelope carried in the `state` parameter.
pub mod state;

pub use properties::*;
pub use request::*;
pub use session::*;
pub use state::*;

// self
use crate::{
	_prelude::*,
	challenge::session::PkcePair,
	events::AuthenticationEvents,
	policy::{PolicyConfig, PolicyId},
};

/// Errors raised while issuing a challenge.
#[derive(Debug, ThisError)]
pub enum ChallengeError {
	/// Callback path did not resolve against the application base URL.
	#[error("Failed to resolve the callback path {path:?} against the application base URL.")]
	MalformedRedirectTarget {
		/// Path that failed to resolve.
		path: String,
		/// Parser failure reported by the URL library.
		#[source]
		source: url::ParseError,
	},
}

/// Builder that assembles and issues one authorization challenge.
///
/// Mirrors the host middleware's challenge entry point: every attempt starts at the default
/// policy and only the pre-challenge hook may retarget it, so the policy-switch logic runs on
/// exactly one code path.
#[derive(Clone, Debug)]
pub struct Challenge {
	config: Arc<PolicyConfig>,
	base_url: Url,
	properties: AuthenticationProperties,
	response_type: ResponseType,
}
impl Challenge {
	/// Creates a challenge for an application served at `base_url`.
	pub fn new(config: Arc<PolicyConfig>, base_url: Url) -> Self {
		Self {
			config,
			base_url,
			properties: AuthenticationProperties::new(),
			response_type: ResponseType::default(),
		}
	}

	/// Replaces the per-attempt properties.
	pub fn properties(mut self, properties: AuthenticationProperties) -> Self {
		self.properties = properties;

		self
	}

	/// Sends the user to `redirect_uri` after the attempt completes.
	pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.properties.redirect_uri = Some(redirect_uri.into());

		self
	}

	/// Requests that this challenge target `policy` instead of the default policy.
	pub fn request_policy(mut self, policy: &PolicyId) -> Self {
		self.properties.request_policy(&self.config.policy_property_key, policy);

		self
	}

	/// Overrides the response type (defaults to `id_token`).
	pub fn response_type(mut self, response_type: ResponseType) -> Self {
		self.response_type = response_type;

		self
	}

	/// Issues the challenge: seeds the request, runs the pre-challenge hook, then renders the
	/// user-facing URL.
	pub fn issue(self, events: &dyn AuthenticationEvents) -> Result<ChallengeSession> {
		let Challenge { config, base_url, mut properties, response_type } = self;
		let redirect_uri = base_url.join(&config.callback_path).map_err(|source| {
			ChallengeError::MalformedRedirectTarget { path: config.callback_path.clone(), source }
		})?;
		let mut request =
			AuthorizationRequest::for_default_policy(&config, redirect_uri, response_type);
		let pkce = response_type.includes_code().then(PkcePair::generate);

		if let Some(pair) = pkce.as_ref() {
			request.code_challenge = Some(pair.challenge());
		}

		events.on_redirect_to_provider(&mut properties, &mut request);

		let csrf = session::random_string(session::STATE_TOKEN_LEN);
		let envelope = StateEnvelope::new(csrf.clone(), properties);

		request.state = Some(envelope.encode()?);

		let nonce = session::random_string(session::NONCE_LEN);

		request.nonce = Some(nonce.clone());

		// The hook clears the PKCE challenge when it retargets the request; drop the matching
		// verifier with it.
		let pkce = if request.code_challenge.is_some() { pkce } else { None };
		let authorize_url = request.authorize_url();

		Ok(ChallengeSession::new(authorize_url, request, csrf, nonce, pkce))
	}
}
