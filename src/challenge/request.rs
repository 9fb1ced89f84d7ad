// self
use crate::{
	_prelude::*,
	challenge::session::PkceChallenge,
	policy::{ClientId, PolicyConfig},
};

/// Scope requested by default and restored when a challenge switches policies.
pub const DEFAULT_SCOPE: &str = "openid profile";

/// Response types accepted by the provider's authorization endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
	/// Authorization code flow.
	Code,
	#[default]
	/// Implicit identity-token flow.
	IdToken,
	/// Hybrid flow carrying both a code and an identity token.
	#[serde(rename = "code id_token")]
	CodeIdToken,
}
impl ResponseType {
	/// Returns the wire value sent as the `response_type` parameter.
	pub fn as_str(self) -> &'static str {
		match self {
			ResponseType::Code => "code",
			ResponseType::IdToken => "id_token",
			ResponseType::CodeIdToken => "code id_token",
		}
	}

	/// Checks whether the response includes an authorization code.
	pub fn includes_code(self) -> bool {
		matches!(self, ResponseType::Code | ResponseType::CodeIdToken)
	}

	/// Checks whether the response includes an identity token.
	pub fn includes_id_token(self) -> bool {
		matches!(self, ResponseType::IdToken | ResponseType::CodeIdToken)
	}
}
impl Display for ResponseType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Authorization request about to be sent to the provider.
///
/// The pre-challenge hook receives the request mutably and may retarget it at a different policy
/// before it is rendered into the user-facing URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
	/// Issuer address the challenge starts from, initialized to the default policy's
	/// authorization endpoint.
	pub issuer_address: Url,
	/// Relying-party client identifier.
	pub client_id: ClientId,
	/// Absolute redirect URI the provider sends the user back to.
	pub redirect_uri: Url,
	/// Requested scope, space-delimited.
	pub scope: String,
	/// Requested response type.
	pub response_type: ResponseType,
	/// Encoded round-trip state, populated when the challenge is issued.
	pub state: Option<String>,
	/// Replay-protection nonce, populated when the challenge is issued.
	pub nonce: Option<String>,
	/// PKCE challenge half attached to `code` responses.
	pub code_challenge: Option<PkceChallenge>,
}
impl AuthorizationRequest {
	/// Seeds a request targeting the configuration's default policy.
	pub fn for_default_policy(
		config: &PolicyConfig,
		redirect_uri: Url,
		response_type: ResponseType,
	) -> Self {
		Self {
			issuer_address: config.default_authorize_endpoint(),
			client_id: config.client_id.clone(),
			redirect_uri,
			scope: DEFAULT_SCOPE.into(),
			response_type,
			state: None,
			nonce: None,
			code_challenge: None,
		}
	}

	/// Renders the final user-facing URL from the issuer address plus query pairs.
	pub fn authorize_url(&self) -> Url {
		let mut url = self.issuer_address.clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("response_type", self.response_type.as_str());
		pairs.append_pair("client_id", self.client_id.as_ref());
		pairs.append_pair("redirect_uri", self.redirect_uri.as_str());
		pairs.append_pair("scope", &self.scope);

		if self.response_type.includes_id_token() {
			// Identity tokens cannot come back on a query string; ask for a form post.
			pairs.append_pair("response_mode", "form_post");
		}
		if let Some(state) = self.state.as_deref() {
			pairs.append_pair("state", state);
		}
		if let Some(nonce) = self.nonce.as_deref() {
			pairs.append_pair("nonce", nonce);
		}
		if let Some(pkce) = self.code_challenge.as_ref() {
			pairs.append_pair("code_challenge", &pkce.challenge);
			pairs.append_pair("code_challenge_method", pkce.method.as_str());
		}

		drop(pairs);

		url
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::test_config;

	fn test_request() -> AuthorizationRequest {
		let config = test_config();
		let redirect_uri = Url::parse("https://app.example.com/signin-oidc")
			.expect("Redirect URI fixture should parse successfully.");

		AuthorizationRequest::for_default_policy(&config, redirect_uri, ResponseType::default())
	}

	#[test]
	fn authorize_url_carries_the_request_parameters() {
		let mut request = test_request();

		request.state = Some("abc".into());
		request.nonce = Some("xyz".into());

		let url = request.authorize_url();

		assert!(url.as_str().starts_with(
			"https://contoso.b2clogin.com/contoso.onmicrosoft.com/B2C_1_signin/oauth2/v2.0/authorize?"
		));

		let pairs: BTreeMap<String, String> = url.query_pairs().into_owned().collect();

		assert_eq!(pairs.get("response_type").map(String::as_str), Some("id_token"));
		assert_eq!(pairs.get("scope").map(String::as_str), Some(DEFAULT_SCOPE));
		assert_eq!(pairs.get("response_mode").map(String::as_str), Some("form_post"));
		assert_eq!(pairs.get("state").map(String::as_str), Some("abc"));
		assert_eq!(pairs.get("nonce").map(String::as_str), Some("xyz"));
		assert_eq!(
			pairs.get("redirect_uri").map(String::as_str),
			Some("https://app.example.com/signin-oidc")
		);
		assert!(!pairs.contains_key("code_challenge"));
	}

	#[test]
	fn response_types_render_their_wire_values() {
		assert_eq!(ResponseType::Code.as_str(), "code");
		assert_eq!(ResponseType::IdToken.as_str(), "id_token");
		assert_eq!(ResponseType::CodeIdToken.as_str(), "code id_token");
		assert_eq!(
			serde_json::to_string(&ResponseType::CodeIdToken)
				.expect("Response type should serialize successfully."),
			"\"code id_token\""
		);
	}
}
