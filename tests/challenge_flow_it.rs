#![cfg(feature = "test")]

// self
use oidc_policy_broker::{
	_preludet::*,
	challenge::{AuthenticationProperties, Challenge, DEFAULT_SCOPE, ResponseType, StateEnvelope},
	events::{
		AuthenticationEvents, FailureContext, PASSWORD_RESET_REQUESTED_CODE, PolicyEventHandler,
		RemoteFailure, ResponseCommand,
	},
	policy::PolicyConfig,
};

fn test_setup() -> (Arc<PolicyConfig>, PolicyEventHandler, Url) {
	let config = Arc::new(test_config());
	let handler = PolicyEventHandler::new(config.clone());
	let base_url =
		Url::parse("https://app.example.com").expect("Base URL should parse successfully.");

	(config, handler, base_url)
}

#[test]
fn default_challenge_targets_the_sign_in_policy() {
	let (config, handler, base_url) = test_setup();
	let session = Challenge::new(config, base_url)
		.issue(&handler)
		.expect("Challenge should issue successfully.");

	assert!(session.authorize_url.as_str().starts_with(
		"https://contoso.b2clogin.com/contoso.onmicrosoft.com/B2C_1_signin/oauth2/v2.0/authorize?"
	));
	assert_eq!(session.request.scope, DEFAULT_SCOPE);
	assert_eq!(session.request.response_type, ResponseType::IdToken);
	assert_eq!(
		session.request.redirect_uri.as_str(),
		"https://app.example.com/signin-oidc"
	);
	// Identity-token challenges carry no code exchange, so no PKCE material is produced.
	assert_eq!(session.pkce_verifier(), None);
}

#[test]
fn requested_policy_rides_the_state_parameter_and_is_consumed() {
	let (config, handler, base_url) = test_setup();
	let session = Challenge::new(config.clone(), base_url)
		.redirect_uri("/account")
		.request_policy(&config.edit_profile_policy)
		.issue(&handler)
		.expect("Challenge should issue successfully.");

	assert!(session.authorize_url.as_str().starts_with(
		"https://contoso.b2clogin.com/contoso.onmicrosoft.com/B2C_1_edit/oauth2/v2.0/authorize?"
	));

	// The envelope that crossed the wire no longer carries the policy entry; the rewrite
	// consumed it before the state was rendered.
	let state = session.request.state.as_deref().expect("Issued request should carry state.");
	let envelope = StateEnvelope::decode(state).expect("State should decode back.");

	assert_eq!(envelope.properties.requested_policy(&config.policy_property_key), None);
	assert_eq!(envelope.properties.redirect_uri.as_deref(), Some("/account"));

	// The return leg restores exactly those properties.
	let restored = session
		.validate_state(state)
		.expect("Round-tripped state should validate successfully.");

	assert_eq!(restored.redirect_uri.as_deref(), Some("/account"));
}

#[test]
fn code_challenges_keep_their_pkce_verifier_unless_switched() {
	let (config, handler, base_url) = test_setup();
	let session = Challenge::new(config.clone(), base_url.clone())
		.response_type(ResponseType::Code)
		.issue(&handler)
		.expect("Challenge should issue successfully.");

	assert!(session.pkce_verifier().is_some());
	assert!(session.authorize_url.as_str().contains("code_challenge="));

	// A policy switch downgrades the request to `id_token`, so the verifier is dropped too.
	let switched = Challenge::new(config.clone(), base_url)
		.response_type(ResponseType::Code)
		.request_policy(&config.reset_password_policy)
		.issue(&handler)
		.expect("Challenge should issue successfully.");

	assert_eq!(switched.request.response_type, ResponseType::IdToken);
	assert_eq!(switched.pkce_verifier(), None);
	assert!(!switched.authorize_url.as_str().contains("code_challenge="));
}

#[test]
fn password_reset_recovery_re_enters_the_flow_on_the_reset_policy() {
	let (config, handler, base_url) = test_setup();

	// Leg one: an ordinary sign-in challenge.
	let _ = Challenge::new(config.clone(), base_url.clone())
		.issue(&handler)
		.expect("Challenge should issue successfully.");

	// The provider rejects the attempt because the user clicked "forgot password".
	let failure = RemoteFailure::protocol(format!(
		"{PASSWORD_RESET_REQUESTED_CODE}: The user has forgotten their password."
	));
	let context = FailureContext::new();

	handler.on_remote_failure(&failure, &context);

	assert!(context.is_handled());

	let Some(ResponseCommand::Challenge { properties }) = context.take_command() else {
		panic!("Password-reset recovery should record a challenge command.");
	};

	// Leg two: the host executes the command; the fresh challenge lands on the reset policy.
	let session = Challenge::new(config, base_url)
		.properties(properties)
		.issue(&handler)
		.expect("Recovery challenge should issue successfully.");

	assert!(session.authorize_url.as_str().starts_with(
		"https://contoso.b2clogin.com/contoso.onmicrosoft.com/B2C_1_reset/oauth2/v2.0/authorize?"
	));
	assert_eq!(session.request.scope, DEFAULT_SCOPE);
	assert_eq!(session.request.response_type, ResponseType::IdToken);

	// After the round trip the user lands back at the application root.
	let state = session.request.state.as_deref().expect("Issued request should carry state.");
	let restored = session
		.validate_state(state)
		.expect("Round-tripped state should validate successfully.");

	assert_eq!(restored.redirect_uri.as_deref(), Some("/"));
}

#[test]
fn foreign_state_is_rejected_on_the_return_leg() {
	let (config, handler, base_url) = test_setup();
	let session = Challenge::new(config, base_url)
		.issue(&handler)
		.expect("Challenge should issue successfully.");

	// A state parameter minted by another attempt must not validate against this session.
	let foreign = StateEnvelope::new("someone-elses-token", AuthenticationProperties::new())
		.encode()
		.expect("Envelope should encode successfully.");

	assert!(session.validate_state(&foreign).is_err());
	assert!(session.validate_state("garbage").is_err());
}
