//! Remote-failure classification that turns provider rejections into recovery actions.

// self
use crate::{_prelude::*, policy::{PolicyConfig, PolicyId}};

/// Error code the provider returns when the user asked for a password reset from inside the
/// sign-up/sign-in flow. Part of the wire contract; matched case-sensitively.
pub const PASSWORD_RESET_REQUESTED_CODE: &str = "AADB2C90118";
/// Error code the provider returns when the user cancelled the flow. Part of the wire contract;
/// matched case-sensitively.
pub const ACCESS_DENIED_CODE: &str = "access_denied";
/// Application root, the safe landing target for recovered failures.
pub const APPLICATION_ROOT: &str = "/";

/// Origin of a remote failure, as reported by the host's OIDC client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RemoteFailureKind {
	/// The provider answered with a protocol-level error response.
	Protocol,
	/// The exchange failed below the protocol (network, timeout, no response).
	Transport,
	/// The host could not attribute the failure.
	Unspecified,
}

/// Opaque provider failure handed to the post-failure hook.
///
/// The host maps its OIDC client's errors into this shape; the hook only ever reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteFailure {
	/// Failure origin.
	pub kind: RemoteFailureKind,
	/// Provider-supplied or host-generated failure message.
	pub message: String,
}
impl RemoteFailure {
	/// Creates a failure of the provided kind.
	pub fn new(kind: RemoteFailureKind, message: impl Into<String>) -> Self {
		Self { kind, message: message.into() }
	}

	/// Convenience constructor for protocol-level provider responses.
	pub fn protocol(message: impl Into<String>) -> Self {
		Self::new(RemoteFailureKind::Protocol, message)
	}

	/// Convenience constructor for transport-level failures, including no-response exchanges.
	pub fn transport(message: impl Into<String>) -> Self {
		Self::new(RemoteFailureKind::Transport, message)
	}

	/// Convenience constructor for failures the host could not attribute.
	pub fn unspecified(message: impl Into<String>) -> Self {
		Self::new(RemoteFailureKind::Unspecified, message)
	}
}
impl Display for RemoteFailure {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{:?}: {}", self.kind, self.message)
	}
}

/// Terminal recovery action for one remote failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureDisposition {
	/// Re-challenge into `policy`, landing the user at `redirect_path` afterwards.
	PolicySwitch {
		/// Policy the fresh challenge must target.
		policy: PolicyId,
		/// Where the user lands once the new attempt completes.
		redirect_path: String,
	},
	/// Send the user to a safe page without surfacing an error.
	SafePage {
		/// Application-relative landing path.
		path: String,
	},
	/// Send the user to the application error page.
	ErrorPage {
		/// Application-relative error path.
		path: String,
	},
}
impl FailureDisposition {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(&self) -> &'static str {
		match self {
			FailureDisposition::PolicySwitch { .. } => "policy_switch",
			FailureDisposition::SafePage { .. } => "safe_page",
			FailureDisposition::ErrorPage { .. } => "error_page",
		}
	}
}
impl Display for FailureDisposition {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Classifies a remote failure; the first matching rule wins.
///
/// The provider documents its error codes as exact strings, so matching is a case-sensitive
/// substring search and only protocol-level responses can carry them. Everything else lands on
/// the configured error page.
pub(crate) fn classify(config: &PolicyConfig, failure: &RemoteFailure) -> FailureDisposition {
	if failure.kind == RemoteFailureKind::Protocol {
		if failure.message.contains(PASSWORD_RESET_REQUESTED_CODE) {
			return FailureDisposition::PolicySwitch {
				policy: config.reset_password_policy.clone(),
				redirect_path: APPLICATION_ROOT.into(),
			};
		}
		if failure.message.contains(ACCESS_DENIED_CODE) {
			return FailureDisposition::SafePage { path: APPLICATION_ROOT.into() };
		}
	}

	FailureDisposition::ErrorPage { path: config.error_path.clone() }
}
