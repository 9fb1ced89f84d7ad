// self
use crate::{
	_prelude::*,
	policy::{ClientId, ClientSecret, PolicyConfig, PolicyId},
};

/// Errors raised while constructing or validating policy configurations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum PolicyConfigError {
	/// Provider instance base URL is required.
	#[error("Missing provider instance.")]
	MissingInstance,
	/// Tenant domain is required.
	#[error("Missing tenant domain.")]
	MissingDomain,
	/// The default policy is required.
	#[error("Missing sign-up/sign-in policy.")]
	MissingSignUpSignInPolicy,
	/// Profile-edit policy is required.
	#[error("Missing edit-profile policy.")]
	MissingEditProfilePolicy,
	/// Password-reset policy is required.
	#[error("Missing reset-password policy.")]
	MissingResetPasswordPolicy,
	/// The registered redirect path is required.
	#[error("Missing callback path.")]
	MissingCallbackPath,
	/// The instance must be an HTTPS URL.
	#[error("The provider instance must use HTTPS: {url}.")]
	InsecureInstance {
		/// Instance URL that failed validation.
		url: String,
	},
	/// Policy addresses are derived by path splicing, which needs a hierarchical base.
	#[error("The provider instance must be a hierarchical URL without query or fragment: {url}.")]
	MalformedInstance {
		/// Instance URL that failed validation.
		url: String,
	},
	/// The domain is spliced into URL paths verbatim.
	#[error("The tenant domain must be non-empty and free of path separators: {domain:?}.")]
	InvalidDomain {
		/// Domain that failed validation.
		domain: String,
	},
	/// Each configured policy must resolve to a distinct authority.
	#[error("Each policy must be distinct; {policy} is configured more than once.")]
	DuplicatePolicy {
		/// Identifier that appeared twice.
		policy: String,
	},
	/// Application-relative paths must be rooted.
	#[error("The {name} path must start with '/': {path:?}.")]
	UnrootedPath {
		/// Which path failed validation.
		name: &'static str,
		/// Path that failed validation.
		path: String,
	},
	/// An empty key would make the round-trip marker unaddressable.
	#[error("The policy property key must not be empty.")]
	EmptyPropertyKey,
}

/// Builder for [`PolicyConfig`] values.
#[derive(Debug)]
pub struct PolicyConfigBuilder {
	/// Relying-party client identifier for the configuration being constructed.
	pub client_id: ClientId,
	/// Optional confidential-client secret.
	pub client_secret: Option<ClientSecret>,
	/// Provider instance base URL.
	pub instance: Option<Url>,
	/// Tenant domain below the instance.
	pub domain: Option<String>,
	/// Combined sign-up/sign-in policy.
	pub sign_up_sign_in_policy: Option<PolicyId>,
	/// Profile-edit policy.
	pub edit_profile_policy: Option<PolicyId>,
	/// Password-reset policy.
	pub reset_password_policy: Option<PolicyId>,
	/// Redirect path registered with the provider.
	pub callback_path: Option<String>,
	/// Property-bag key that carries a requested policy across the round trip.
	pub policy_property_key: String,
	/// Application route targeted when a remote failure stays unclassified.
	pub error_path: String,
}
impl PolicyConfigBuilder {
	/// Creates a new builder seeded with the provided client identifier.
	pub fn new(client_id: ClientId) -> Self {
		Self {
			client_id,
			client_secret: None,
			instance: None,
			domain: None,
			sign_up_sign_in_policy: None,
			edit_profile_policy: None,
			reset_password_policy: None,
			callback_path: None,
			policy_property_key: super::default_policy_property_key(),
			error_path: super::default_error_path(),
		}
	}

	/// Sets the confidential-client secret.
	pub fn client_secret(mut self, secret: ClientSecret) -> Self {
		self.client_secret = Some(secret);

		self
	}

	/// Sets the provider instance base URL.
	pub fn instance(mut self, url: Url) -> Self {
		self.instance = Some(url);

		self
	}

	/// Sets the tenant domain.
	pub fn domain(mut self, domain: impl Into<String>) -> Self {
		self.domain = Some(domain.into());

		self
	}

	/// Sets the combined sign-up/sign-in policy; this becomes the default policy.
	pub fn sign_up_sign_in_policy(mut self, policy: PolicyId) -> Self {
		self.sign_up_sign_in_policy = Some(policy);

		self
	}

	/// Sets the profile-edit policy.
	pub fn edit_profile_policy(mut self, policy: PolicyId) -> Self {
		self.edit_profile_policy = Some(policy);

		self
	}

	/// Sets the password-reset policy.
	pub fn reset_password_policy(mut self, policy: PolicyId) -> Self {
		self.reset_password_policy = Some(policy);

		self
	}

	/// Sets the redirect path registered with the provider.
	pub fn callback_path(mut self, path: impl Into<String>) -> Self {
		self.callback_path = Some(path.into());

		self
	}

	/// Overrides the property-bag key that carries a requested policy.
	pub fn policy_property_key(mut self, key: impl Into<String>) -> Self {
		self.policy_property_key = key.into();

		self
	}

	/// Overrides the route targeted when a remote failure stays unclassified.
	pub fn error_path(mut self, path: impl Into<String>) -> Self {
		self.error_path = path.into();

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<PolicyConfig, PolicyConfigError> {
		let instance = self.instance.ok_or(PolicyConfigError::MissingInstance)?;
		let domain = self.domain.ok_or(PolicyConfigError::MissingDomain)?;
		let sign_up_sign_in_policy =
			self.sign_up_sign_in_policy.ok_or(PolicyConfigError::MissingSignUpSignInPolicy)?;
		let edit_profile_policy =
			self.edit_profile_policy.ok_or(PolicyConfigError::MissingEditProfilePolicy)?;
		let reset_password_policy =
			self.reset_password_policy.ok_or(PolicyConfigError::MissingResetPasswordPolicy)?;
		let callback_path = self.callback_path.ok_or(PolicyConfigError::MissingCallbackPath)?;
		let config = PolicyConfig {
			client_id: self.client_id,
			client_secret: self.client_secret,
			instance,
			domain,
			sign_up_sign_in_policy,
			edit_profile_policy,
			reset_password_policy,
			callback_path,
			policy_property_key: self.policy_property_key,
			error_path: self.error_path,
		};

		config.validate()?;

		Ok(config)
	}
}

impl PolicyConfig {
	/// Validates invariants for the configuration.
	fn validate(&self) -> Result<(), PolicyConfigError> {
		validate_instance(&self.instance)?;
		validate_domain(&self.domain)?;

		let mut seen = Vec::with_capacity(3);

		for policy in self.policies() {
			if seen.contains(&policy) {
				return Err(PolicyConfigError::DuplicatePolicy { policy: policy.to_string() });
			}

			seen.push(policy);
		}

		validate_rooted_path("callback", &self.callback_path)?;
		validate_rooted_path("error", &self.error_path)?;

		if self.policy_property_key.is_empty() {
			return Err(PolicyConfigError::EmptyPropertyKey);
		}

		Ok(())
	}
}

fn validate_instance(url: &Url) -> Result<(), PolicyConfigError> {
	if url.scheme() != "https" {
		return Err(PolicyConfigError::InsecureInstance { url: url.to_string() });
	}
	if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
		return Err(PolicyConfigError::MalformedInstance { url: url.to_string() });
	}

	Ok(())
}

fn validate_domain(domain: &str) -> Result<(), PolicyConfigError> {
	if domain.is_empty() || domain.contains('/') || domain.contains(char::is_whitespace) {
		Err(PolicyConfigError::InvalidDomain { domain: domain.into() })
	} else {
		Ok(())
	}
}

fn validate_rooted_path(name: &'static str, path: &str) -> Result<(), PolicyConfigError> {
	if path.starts_with('/') {
		Ok(())
	} else {
		Err(PolicyConfigError::UnrootedPath { name, path: path.into() })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::test_policy;

	fn test_builder() -> PolicyConfigBuilder {
		PolicyConfig::builder(
			ClientId::new("client-builder").expect("Client identifier should be valid."),
		)
		.instance(
			Url::parse("https://contoso.b2clogin.com")
				.expect("Instance fixture should parse successfully."),
		)
		.domain("contoso.onmicrosoft.com")
		.sign_up_sign_in_policy(test_policy("B2C_1_signin"))
		.edit_profile_policy(test_policy("B2C_1_edit"))
		.reset_password_policy(test_policy("B2C_1_reset"))
		.callback_path("/signin-oidc")
	}

	#[test]
	fn missing_fields_fail_fast() {
		let client = ClientId::new("client-builder").expect("Client identifier should be valid.");
		let err = PolicyConfig::builder(client)
			.build()
			.expect_err("A builder without an instance must not build.");

		assert_eq!(err, PolicyConfigError::MissingInstance);

		let err = test_builder()
			.callback_path("")
			.build()
			.expect_err("An unrooted callback path must not build.");

		assert_eq!(err, PolicyConfigError::UnrootedPath { name: "callback", path: String::new() });
	}

	#[test]
	fn insecure_or_opaque_instances_are_rejected() {
		let err = test_builder()
			.instance(
				Url::parse("http://contoso.b2clogin.com")
					.expect("Instance fixture should parse successfully."),
			)
			.build()
			.expect_err("A plain HTTP instance must not build.");

		assert!(matches!(err, PolicyConfigError::InsecureInstance { .. }));

		let err = test_builder()
			.instance(
				Url::parse("https://contoso.b2clogin.com/?mode=tfp")
					.expect("Instance fixture should parse successfully."),
			)
			.build()
			.expect_err("An instance carrying a query must not build.");

		assert!(matches!(err, PolicyConfigError::MalformedInstance { .. }));
	}

	#[test]
	fn duplicate_policies_are_rejected() {
		let err = test_builder()
			.reset_password_policy(test_policy("B2C_1_signin"))
			.build()
			.expect_err("Duplicate policy identifiers must not build.");

		assert_eq!(err, PolicyConfigError::DuplicatePolicy { policy: "B2C_1_signin".into() });
	}

	#[test]
	fn domains_with_separators_are_rejected() {
		let err = test_builder()
			.domain("contoso.onmicrosoft.com/extra")
			.build()
			.expect_err("A domain carrying a path separator must not build.");

		assert!(matches!(err, PolicyConfigError::InvalidDomain { .. }));
	}

	#[test]
	fn empty_property_keys_are_rejected() {
		let err = test_builder()
			.policy_property_key("")
			.build()
			.expect_err("An empty property key must not build.");

		assert_eq!(err, PolicyConfigError::EmptyPropertyKey);
	}
}
