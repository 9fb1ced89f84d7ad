//! Walks through the password-reset recovery loop: the provider rejects a sign-in attempt with
//! `AADB2C90118`, the failure hook absorbs it and records a fresh challenge, and the second leg
//! lands on the password-reset policy.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oidc_policy_broker::{
	challenge::Challenge,
	events::{AuthenticationEvents, FailureContext, PolicyEventHandler, RemoteFailure, ResponseCommand},
	policy::{ClientId, PolicyConfig, PolicyId},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = Arc::new(
		PolicyConfig::builder(ClientId::new("11111111-2222-3333-4444-555555555555")?)
			.instance(Url::parse("https://fabrikam.b2clogin.com")?)
			.domain("fabrikam.onmicrosoft.com")
			.sign_up_sign_in_policy(PolicyId::new("B2C_1_signupsignin")?)
			.edit_profile_policy(PolicyId::new("B2C_1_editprofile")?)
			.reset_password_policy(PolicyId::new("B2C_1_passwordreset")?)
			.callback_path("/signin-oidc")
			.build()?,
	);
	let handler = PolicyEventHandler::new(config.clone());
	let base_url = Url::parse("https://app.example.com")?;
	let sign_in = Challenge::new(config.clone(), base_url.clone()).issue(&handler)?;

	println!("Leg one, the user clicks 'Forgot your password?' at:");
	println!("  {}", &sign_in.authorize_url);

	// The provider aborts the sign-in flow with its documented reset code.
	let failure = RemoteFailure::protocol(
		"AADB2C90118: The user has forgotten their password. Correlation ID: 0000-0000",
	);
	let context = FailureContext::new();

	handler.on_remote_failure(&failure, &context);

	println!("Failure handled: {}.", context.is_handled());

	// The host adapter executes whatever the hook recorded.
	match context.take_command() {
		Some(ResponseCommand::Challenge { properties }) => {
			let recovery =
				Challenge::new(config, base_url).properties(properties).issue(&handler)?;

			println!("Leg two, the user is silently re-challenged at:");
			println!("  {}", &recovery.authorize_url);
		},
		Some(ResponseCommand::Redirect { path }) => println!("Redirecting the user to {path}."),
		None => eprintln!("The hook recorded no command; this should never happen."),
	}

	Ok(())
}
