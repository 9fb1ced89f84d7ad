// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{_prelude::*, challenge::AuthenticationProperties};

/// Maximum accepted age of a round-tripped envelope.
///
/// Authorization redirects complete within minutes; anything older is replayed or stuck in a
/// browser history and gets rejected.
pub const ROUND_TRIP_MAX_AGE: Duration = Duration::minutes(15);

/// Errors raised while encoding or decoding round-trip state.
#[derive(Debug, ThisError)]
pub enum StateError {
	/// Envelope serialization failed.
	#[error("Failed to serialize the state envelope.")]
	Serialize {
		/// Underlying JSON error.
		#[source]
		source: serde_json::error::Error,
	},
	/// State parameter did not decode as URL-safe base64.
	#[error("State payload is not valid base64.")]
	MalformedEncoding {
		/// Decoding failure reported by the base64 engine.
		#[source]
		source: base64::DecodeError,
	},
	/// State payload decoded but did not match the envelope shape.
	#[error("State payload is not a valid envelope.")]
	MalformedPayload {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
	/// Returned token does not match the one issued with the challenge.
	#[error("State token mismatch.")]
	CsrfMismatch,
	/// Envelope is older than [`ROUND_TRIP_MAX_AGE`].
	#[error("State envelope expired; round trips are limited to {max_age}.")]
	Expired {
		/// Age limit that was exceeded.
		max_age: Duration,
	},
}

/// Round-trip envelope carried inside the OIDC `state` parameter.
///
/// The envelope pairs a random token with the serialized per-attempt properties so the return
/// leg can both correlate the response with the outgoing challenge and restore the attempt
/// state without server-side storage. Decoded envelopes are untrusted input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEnvelope {
	/// Random correlation token issued with the challenge.
	pub csrf: String,
	/// Per-attempt properties restored on the return leg.
	pub properties: AuthenticationProperties,
}
impl StateEnvelope {
	/// Wraps properties with a correlation token.
	pub fn new(csrf: impl Into<String>, properties: AuthenticationProperties) -> Self {
		Self { csrf: csrf.into(), properties }
	}

	/// Encodes the envelope as URL-safe base64 JSON for the `state` parameter.
	pub fn encode(&self) -> Result<String, StateError> {
		let json = serde_json::to_vec(self).map_err(|source| StateError::Serialize { source })?;

		Ok(URL_SAFE_NO_PAD.encode(json))
	}

	/// Decodes a returned `state` parameter.
	pub fn decode(value: &str) -> Result<Self, StateError> {
		let json = URL_SAFE_NO_PAD
			.decode(value)
			.map_err(|source| StateError::MalformedEncoding { source })?;
		let mut deserializer = serde_json::Deserializer::from_slice(&json);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| StateError::MalformedPayload { source })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn envelopes_survive_the_round_trip() {
		let mut properties = AuthenticationProperties::with_redirect_uri("/account");

		properties.insert("Policy", "B2C_1_edit");

		let envelope = StateEnvelope::new("token", properties);
		let encoded = envelope.encode().expect("Envelope should encode successfully.");
		let decoded = StateEnvelope::decode(&encoded).expect("Envelope should decode back.");

		assert_eq!(decoded, envelope);
	}

	#[test]
	fn garbage_input_is_rejected() {
		let err = StateEnvelope::decode("not base64!")
			.expect_err("Invalid base64 input should be rejected.");

		assert!(matches!(err, StateError::MalformedEncoding { .. }));

		let err = StateEnvelope::decode(&URL_SAFE_NO_PAD.encode(br#"{"csrf":1}"#))
			.expect_err("Payloads that do not match the envelope shape should be rejected.");

		assert!(matches!(err, StateError::MalformedPayload { .. }));
	}
}
