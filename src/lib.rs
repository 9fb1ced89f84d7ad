//! Policy-aware OIDC relying-party extension. Present an identity provider that exposes
//! multiple authentication policies (sign-up/sign-in, profile edit, password reset) as one
//! logical provider, and recover into the correct policy when the provider rejects a flow.
//!
//! The crate owns two synchronous extension points that a generic OIDC client invokes: a
//! pre-challenge hook that retargets the outgoing authorization request at a requested policy
//! ([`events::AuthenticationEvents::on_redirect_to_provider`]) and a post-failure hook that turns
//! provider failures into recovery actions ([`events::AuthenticationEvents::on_remote_failure`]).
//! Everything else stays with the host's OIDC client: token validation, sessions, transport.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod challenge;
pub mod error;
pub mod events;
pub mod obs;
pub mod policy;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::policy::{ClientId, ClientSecret, PolicyConfig, PolicyId};

	/// Builds the multi-policy configuration shared by unit and integration tests.
	pub fn test_config() -> PolicyConfig {
		PolicyConfig::builder(test_client("11111111-2222-3333-4444-555555555555"))
			.client_secret(ClientSecret::new("hush"))
			.instance(
				Url::parse("https://contoso.b2clogin.com")
					.expect("Test instance URL should parse successfully."),
			)
			.domain("contoso.onmicrosoft.com")
			.sign_up_sign_in_policy(test_policy("B2C_1_signin"))
			.edit_profile_policy(test_policy("B2C_1_edit"))
			.reset_password_policy(test_policy("B2C_1_reset"))
			.callback_path("/signin-oidc")
			.build()
			.expect("Test configuration should build successfully.")
	}

	/// Parses a policy identifier fixture, panicking on invalid input.
	pub fn test_policy(id: &str) -> PolicyId {
		PolicyId::new(id).expect("Test policy identifier should validate successfully.")
	}

	fn test_client(id: &str) -> ClientId {
		ClientId::new(id).expect("Test client identifier should validate successfully.")
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use color_eyre as _;
