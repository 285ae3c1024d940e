#![cfg(feature = "reqwest")]

// self
use google_oauth2_strategy::{
	_preludet::*,
	config::{DEFAULT_AUTHORIZATION_URL, DEFAULT_TOKEN_URL, DEFAULT_USER_PROFILE_URL, StrategyConfig},
	params::AuthorizationOptions,
	profile::ProfileFormat,
	strategy::{GoogleStrategy, Strategy},
};

#[test]
fn construction_applies_google_defaults() {
	let config = StrategyConfig::builder("client").build().expect("Config should build.");
	let strategy = GoogleStrategy::new(config, accept_all as AcceptAll)
		.expect("Strategy should build without network access.");

	assert_eq!(strategy.name(), "google");
	assert_eq!(strategy.config().authorization_url.as_str(), DEFAULT_AUTHORIZATION_URL);
	assert_eq!(strategy.config().token_url.as_str(), DEFAULT_TOKEN_URL);
	assert_eq!(strategy.config().user_profile_url.as_str(), DEFAULT_USER_PROFILE_URL);
	assert_eq!(strategy.profile_format(), ProfileFormat::OpenId);
}

#[test]
fn custom_profile_url_switches_format() -> color_eyre::Result<()> {
	let config = StrategyConfig::builder("client")
		.user_profile_url(Url::parse("https://www.googleapis.com/plus/v1/people/me")?)
		.build()?;
	let strategy = build_test_strategy(config);

	assert_eq!(strategy.profile_format(), ProfileFormat::ProviderNative);

	Ok(())
}

#[test]
fn authorization_params_yield_only_supplied_keys() {
	let strategy = build_test_strategy(
		StrategyConfig::builder("client").build().expect("Config should build."),
	);
	let options = AuthorizationOptions::from_json(&serde_json::json!({
		"includeGrantedScopes": true,
		"prompt": "consent"
	}));
	let params = strategy.authorization_params(&options);

	assert_eq!(
		params,
		BTreeMap::from([
			("include_granted_scopes".to_owned(), "true".to_owned()),
			("prompt".to_owned(), "consent".to_owned()),
		])
	);
}
