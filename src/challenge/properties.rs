// self
use crate::{_prelude::*, policy::PolicyId};

/// Per-attempt authentication state that survives the redirect round trip.
///
/// The bag crosses the wire inside the `state` parameter, so every entry is visible to the end
/// user and comes back as untrusted input. Entries are plain string pairs; the policy entry is
/// addressed through the configured property key rather than a fixed field so deployments can
/// rename it without breaking in-flight attempts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationProperties {
	/// Where the user lands after the attempt completes.
	pub redirect_uri: Option<String>,
	/// Creation instant, used for round-trip expiry checks.
	pub issued_at: OffsetDateTime,
	#[serde(default)]
	items: BTreeMap<String, String>,
}
impl AuthenticationProperties {
	/// Creates an empty bag stamped with the current instant.
	pub fn new() -> Self {
		Self { redirect_uri: None, issued_at: OffsetDateTime::now_utc(), items: BTreeMap::new() }
	}

	/// Creates a bag that sends the user to `redirect_uri` after the attempt completes.
	pub fn with_redirect_uri(redirect_uri: impl Into<String>) -> Self {
		Self { redirect_uri: Some(redirect_uri.into()), ..Self::new() }
	}

	/// Stores an entry, returning the previous value for the key if any.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.items.insert(key.into(), value.into())
	}

	/// Looks up an entry.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.items.get(key).map(String::as_str)
	}

	/// Removes an entry, returning its value if it was present.
	pub fn remove(&mut self, key: &str) -> Option<String> {
		self.items.remove(key)
	}

	/// Iterates over all entries in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.items.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Requests that the next challenge targets `policy` instead of the default policy.
	///
	/// `key` must be the deployment's configured policy property key.
	pub fn request_policy(&mut self, key: &str, policy: &PolicyId) {
		self.insert(key, policy.as_ref());
	}

	/// Peeks at the requested policy entry without consuming it.
	pub fn requested_policy(&self, key: &str) -> Option<&str> {
		self.get(key)
	}

	/// Consumes the requested policy entry. The entry is read once and removed so a retry of the
	/// same attempt does not reapply it.
	pub fn take_requested_policy(&mut self, key: &str) -> Option<String> {
		self.remove(key)
	}

	/// Returns `true` if the bag is older than `max_age` at the provided instant.
	pub fn is_expired_at(&self, max_age: Duration, instant: OffsetDateTime) -> bool {
		instant - self.issued_at > max_age
	}
}
impl Default for AuthenticationProperties {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::test_policy;

	#[test]
	fn policy_entry_is_consumed_once() {
		let mut properties = AuthenticationProperties::new();

		properties.request_policy("Policy", &test_policy("B2C_1_reset"));

		assert_eq!(properties.requested_policy("Policy"), Some("B2C_1_reset"));
		assert_eq!(properties.take_requested_policy("Policy").as_deref(), Some("B2C_1_reset"));
		assert_eq!(properties.take_requested_policy("Policy"), None);
	}

	#[test]
	fn expiry_is_measured_from_the_issue_instant() {
		let properties = AuthenticationProperties::new();
		let now = properties.issued_at;

		assert!(!properties.is_expired_at(Duration::minutes(15), now + Duration::minutes(14)));
		assert!(properties.is_expired_at(Duration::minutes(15), now + Duration::minutes(16)));
	}
}
