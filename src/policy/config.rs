//! Policy configuration data structures and issuer-address derivation.
//!
//! The module exposes the validated, immutable configuration snapshot shared by
//! both extension points, together with helpers that derive policy-specific
//! authorities and authorization endpoints from it.

/// Builder API for assembling policy configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	policy::{ClientId, ClientSecret, PolicyId},
};

/// Default property-bag key that carries a requested policy across the redirect round trip.
pub const DEFAULT_POLICY_PROPERTY_KEY: &str = "Policy";
/// Default application route targeted when a remote failure stays unclassified.
pub const DEFAULT_ERROR_PATH: &str = "/Home/Error";

/// Immutable multi-policy configuration consumed by both extension points.
///
/// Constructed once at process start through [`PolicyConfig::builder`], then shared read-only
/// (typically behind an [`Arc`]) for the lifetime of the process. The provider addresses three
/// named policies below one `{instance}/{domain}` authority; every policy-specific URL is derived
/// from those two fields rather than stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
	/// Relying-party client identifier.
	pub client_id: ClientId,
	/// Optional confidential-client secret, kept for the host's code exchange and never
	/// serialized.
	#[serde(skip)]
	pub client_secret: Option<ClientSecret>,
	/// Provider instance base, e.g. `https://contoso.b2clogin.com`.
	pub instance: Url,
	/// Tenant domain below the instance, e.g. `contoso.onmicrosoft.com`.
	pub domain: String,
	/// Combined sign-up/sign-in policy; this is the default policy.
	pub sign_up_sign_in_policy: PolicyId,
	/// Profile-edit policy.
	pub edit_profile_policy: PolicyId,
	/// Password-reset policy.
	pub reset_password_policy: PolicyId,
	/// Redirect path registered with the provider, e.g. `/signin-oidc`.
	pub callback_path: String,
	/// Property-bag key that smuggles a requested policy across the round trip. Must stay stable
	/// for the lifetime of a deployment.
	#[serde(default = "default_policy_property_key")]
	pub policy_property_key: String,
	/// Application route targeted when a remote failure stays unclassified.
	#[serde(default = "default_error_path")]
	pub error_path: String,
}
impl PolicyConfig {
	/// Creates a new builder for the provided client identifier.
	pub fn builder(client_id: ClientId) -> PolicyConfigBuilder {
		PolicyConfigBuilder::new(client_id)
	}

	/// The policy a challenge targets when none is requested explicitly.
	pub fn default_policy(&self) -> &PolicyId {
		&self.sign_up_sign_in_policy
	}

	/// Iterates over the three configured policies.
	pub fn policies(&self) -> impl Iterator<Item = &PolicyId> {
		[&self.sign_up_sign_in_policy, &self.edit_profile_policy, &self.reset_password_policy]
			.into_iter()
	}

	/// Looks up the configured policy matching `candidate` exactly.
	///
	/// Round-trip input is untrusted; only values that match a configured identifier
	/// byte-for-byte are ever spliced into an issuer address.
	pub fn known_policy(&self, candidate: &str) -> Option<&PolicyId> {
		self.policies().find(|policy| policy.as_ref() == candidate)
	}

	/// Authority for one policy: `{instance}/{domain}/{policy}/v2.0`.
	pub fn authority_for(&self, policy: &PolicyId) -> Url {
		self.policy_address(policy, "v2.0")
	}

	/// Authority of the default policy.
	pub fn default_authority(&self) -> Url {
		self.authority_for(self.default_policy())
	}

	/// Authorization endpoint for one policy:
	/// `{instance}/{domain}/{policy}/oauth2/v2.0/authorize`.
	pub fn authorize_endpoint_for(&self, policy: &PolicyId) -> Url {
		self.policy_address(policy, "oauth2/v2.0/authorize")
	}

	/// Authorization endpoint of the default policy; outgoing challenges start here.
	pub fn default_authorize_endpoint(&self) -> Url {
		self.authorize_endpoint_for(self.default_policy())
	}

	// The instance may carry its own path prefix (legacy `/tfp` instances), so the policy path is
	// appended to it instead of replacing it.
	fn policy_address(&self, policy: &PolicyId, suffix: &str) -> Url {
		let mut url = self.instance.clone();
		let prefix = url.path().trim_end_matches('/').to_owned();

		url.set_path(&format!("{prefix}/{}/{}/{suffix}", self.domain, policy.as_ref()));

		url
	}
}

fn default_policy_property_key() -> String {
	DEFAULT_POLICY_PROPERTY_KEY.into()
}

fn default_error_path() -> String {
	DEFAULT_ERROR_PATH.into()
}
