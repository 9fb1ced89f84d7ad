//! Policy-facing configuration (data) and identifiers (validated newtypes).
//!
//! `config` exposes the immutable multi-policy snapshot ([`PolicyConfig`]) covering the
//! HTTPS-only provider instance, the tenant domain, and the three named policies, together
//! with derivation of policy-specific authorities and authorization endpoints.
//! `id` defines the validated identifier newtypes spliced into those addresses, and
//! `secret` wraps the confidential-client secret so it never reaches logs or serialized state.

pub mod config;
pub mod id;
pub mod secret;

pub use config::*;
pub use id::*;
pub use secret::*;
