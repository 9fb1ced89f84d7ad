// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	challenge::{
		AuthenticationProperties, AuthorizationRequest,
		state::{ROUND_TRIP_MAX_AGE, StateEnvelope, StateError},
	},
};

pub(super) const STATE_TOKEN_LEN: usize = 32;
pub(super) const NONCE_LEN: usize = 32;
const PKCE_VERIFIER_LEN: usize = 64;

/// Supported PKCE challenge methods surfaced via [`PkceChallenge`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PkceCodeChallengeMethod {
	/// SHA-256 based PKCE (RFC 7636 S256).
	S256,
}
impl PkceCodeChallengeMethod {
	/// Returns the RFC 7636 identifier for the challenge method.
	pub fn as_str(self) -> &'static str {
		match self {
			PkceCodeChallengeMethod::S256 => "S256",
		}
	}
}

/// Public half of a PKCE pair, attached to the outgoing authorization request.
///
/// The secret verifier stays inside [`ChallengeSession`] and never crosses the wire with the
/// challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PkceChallenge {
	/// Challenge derived from the secret verifier.
	pub challenge: String,
	/// Challenge method (currently always `S256`).
	pub method: PkceCodeChallengeMethod,
}

#[derive(Clone)]
pub(super) struct PkcePair {
	pub(super) verifier: String,
	challenge: PkceChallenge,
}
impl PkcePair {
	pub(super) fn generate() -> Self {
		let verifier = random_string(PKCE_VERIFIER_LEN);
		let challenge = PkceChallenge {
			challenge: compute_pkce_challenge(&verifier),
			method: PkceCodeChallengeMethod::S256,
		};

		Self { verifier, challenge }
	}

	pub(super) fn challenge(&self) -> PkceChallenge {
		self.challenge.clone()
	}
}

/// Challenge handshake metadata returned by [`Challenge::issue`](crate::challenge::Challenge).
#[derive(Clone)]
pub struct ChallengeSession {
	/// Fully-formed authorize URL that callers should send end-users to.
	pub authorize_url: Url,
	/// The finished request after the pre-challenge hook ran.
	pub request: AuthorizationRequest,
	csrf: String,
	nonce: String,
	pkce: Option<PkcePair>,
}
impl ChallengeSession {
	pub(super) fn new(
		authorize_url: Url,
		request: AuthorizationRequest,
		csrf: String,
		nonce: String,
		pkce: Option<PkcePair>,
	) -> Self {
		Self { authorize_url, request, csrf, nonce, pkce }
	}

	/// Replay-protection nonce embedded in the request; the host checks it against the returned
	/// identity token.
	pub fn nonce(&self) -> &str {
		&self.nonce
	}

	/// PKCE code verifier for the host's code exchange, present only while the finished request
	/// still carries a code response.
	pub fn pkce_verifier(&self) -> Option<&str> {
		self.pkce.as_ref().map(|pair| pair.verifier.as_str())
	}

	/// Validates the returned `state` parameter at the provided instant and restores the
	/// per-attempt properties on success.
	pub fn validate_state_at(
		&self,
		returned_state: &str,
		instant: OffsetDateTime,
	) -> Result<AuthenticationProperties> {
		let envelope = StateEnvelope::decode(returned_state)?;

		if envelope.csrf != self.csrf {
			return Err(StateError::CsrfMismatch.into());
		}
		if envelope.properties.is_expired_at(ROUND_TRIP_MAX_AGE, instant) {
			return Err(StateError::Expired { max_age: ROUND_TRIP_MAX_AGE }.into());
		}

		Ok(envelope.properties)
	}

	/// Convenience helper that validates the returned `state` using the current UTC instant.
	pub fn validate_state(&self, returned_state: &str) -> Result<AuthenticationProperties> {
		self.validate_state_at(returned_state, OffsetDateTime::now_utc())
	}
}
impl Debug for ChallengeSession {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ChallengeSession")
			.field("authorize_url", &self.authorize_url)
			.field("csrf", &self.csrf)
			.field("nonce", &self.nonce)
			.field("code_challenge", &self.request.code_challenge)
			.finish()
	}
}

pub(super) fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

fn compute_pkce_challenge(verifier: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(verifier.as_bytes());
	let digest = hasher.finalize();
	URL_SAFE_NO_PAD.encode(digest)
}
