//! Crate-level error types shared across policy configuration, challenges, and hooks.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Policy configuration problem, fatal at startup.
	#[error(transparent)]
	Config(#[from] crate::policy::PolicyConfigError),
	/// Identifier validation failure.
	#[error(transparent)]
	Identifier(#[from] crate::policy::IdentifierError),
	/// Challenge could not be assembled.
	#[error(transparent)]
	Challenge(#[from] crate::challenge::ChallengeError),
	/// Round-trip state parameter could not be produced or read back.
	#[error(transparent)]
	State(#[from] crate::challenge::StateError),
}
