//! Pre-challenge rewrite that retargets an authorization request at a requested policy.

// self
use crate::{
	_prelude::*,
	challenge::{AuthenticationProperties, AuthorizationRequest, DEFAULT_SCOPE, ResponseType},
	obs,
	policy::{PolicyConfig, PolicyId},
};

/// Outcome of one rewrite pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RewriteOutcome {
	/// No policy entry was present, or it named the default policy; the request is untouched.
	Unchanged,
	/// Request retargeted at the requested policy.
	Switched,
	/// Entry named a policy outside the configured set; it was consumed and the request left
	/// untouched.
	UnknownPolicy,
	/// Entry was valid but the issuer address does not contain the default policy segment; the
	/// original address was kept.
	MissingSegment,
}
impl RewriteOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RewriteOutcome::Unchanged => "unchanged",
			RewriteOutcome::Switched => "switched",
			RewriteOutcome::UnknownPolicy => "unknown_policy",
			RewriteOutcome::MissingSegment => "missing_segment",
		}
	}
}
impl Display for RewriteOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Applies the policy-switch rewrite to one outgoing request.
///
/// A requested policy equal to the default is left in the bag and changes nothing. Any other
/// entry is consumed on the first pass, so reinvoking the hook on the same attempt is a no-op.
pub(crate) fn rewrite_for_policy(
	config: &PolicyConfig,
	properties: &mut AuthenticationProperties,
	request: &mut AuthorizationRequest,
) -> RewriteOutcome {
	let is_default = match properties.requested_policy(&config.policy_property_key) {
		None => return RewriteOutcome::Unchanged,
		Some(requested) => requested == config.default_policy().as_ref(),
	};

	if is_default {
		return RewriteOutcome::Unchanged;
	}

	let Some(requested) = properties.take_requested_policy(&config.policy_property_key) else {
		return RewriteOutcome::Unchanged;
	};
	// Round-trip input; only configured policies may reach the issuer address.
	let Some(policy) = config.known_policy(&requested).cloned() else {
		obs::warn_unknown_policy(&requested);

		return RewriteOutcome::UnknownPolicy;
	};

	request.scope = DEFAULT_SCOPE.into();
	request.response_type = ResponseType::IdToken;
	// The switched flow returns an identity token directly; pending code-exchange material is
	// obsolete.
	request.code_challenge = None;

	let Some(path) =
		replace_policy_segment(request.issuer_address.path(), config.default_policy(), &policy)
	else {
		obs::warn_missing_policy_segment(config.default_policy(), &policy);

		return RewriteOutcome::MissingSegment;
	};

	request.issuer_address.set_path(&path);

	RewriteOutcome::Switched
}

/// Replaces the default policy's path segment with the requested one, matching the segment
/// case-insensitively and preserving every other byte of the path.
fn replace_policy_segment(path: &str, default: &PolicyId, requested: &PolicyId) -> Option<String> {
	let needle = format!("/{}/", default.as_ref().to_ascii_lowercase());
	// ASCII lowercasing keeps byte offsets aligned with the original path.
	let haystack = path.to_ascii_lowercase();
	let start = haystack.find(&needle)?;
	let end = start + needle.len();
	let mut replaced = String::with_capacity(path.len() + requested.as_ref().len());

	replaced.push_str(&path[..=start]);
	replaced.push_str(requested.as_ref());
	replaced.push_str(&path[end - 1..]);

	Some(replaced)
}
