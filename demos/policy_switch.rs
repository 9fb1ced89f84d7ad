//! Walks through issuing a sign-in challenge and a profile-edit challenge against the same
//! logical provider, showing how the pre-challenge hook retargets the issuer address.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oidc_policy_broker::{
	challenge::Challenge,
	events::PolicyEventHandler,
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

	// An ordinary login: no policy entry in the bag, so the request leaves untouched.
	let sign_in = Challenge::new(config.clone(), base_url.clone()).issue(&handler)?;

	println!("Sign-in challenge:");
	println!("  {}", &sign_in.authorize_url);

	// A profile-edit request: the application stashes the policy in the bag and the hook
	// splices the issuer address before the URL is rendered.
	let edit_profile = Challenge::new(config.clone(), base_url)
		.redirect_uri("/account")
		.request_policy(&config.edit_profile_policy)
		.issue(&handler)?;

	println!("Profile-edit challenge:");
	println!("  {}", &edit_profile.authorize_url);
	println!(
		"Both URLs point at {}, one logical provider with two policies.",
		config.instance.as_str()
	);

	Ok(())
}
