#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use google_oauth2_strategy::{
	_preludet::*,
	error::{ConfigError, TransportError},
	profile::{PROVIDER, ProfileFormat},
	strategy::Strategy,
};

const OPENID_BODY: &str = r#"{
	"sub": "111111111111111111111",
	"name": "Jane Doe",
	"given_name": "Jane",
	"family_name": "Doe",
	"preferred_username": "jdoe",
	"picture": "https://lh3.googleusercontent.com/a/photo.jpg",
	"email": "jane@example.com",
	"email_verified": true
}"#;

#[tokio::test]
async fn openid_profile_is_normalized() {
	let server = MockServer::start_async().await;
	let strategy = build_test_strategy(mock_config(&server.base_url(), "/oauth2/v3/userinfo"));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/oauth2/v3/userinfo")
				.header("authorization", "Bearer access-openid");
			then.status(200).header("content-type", "application/json").body(OPENID_BODY);
		})
		.await;

	assert_eq!(strategy.profile_format(), ProfileFormat::OpenId);

	let profile =
		strategy.fetch_profile("access-openid").await.expect("Profile fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(profile.provider, PROVIDER);
	assert_eq!(profile.id, "111111111111111111111");
	assert_eq!(profile.username.as_deref(), Some("jdoe"));
	assert_eq!(profile.display_name.as_deref(), Some("Jane Doe"));
	assert_eq!(profile.primary_email(), Some("jane@example.com"));
	assert_eq!(profile.emails[0].verified, Some(true));
	assert_eq!(profile.photos.len(), 1);
	assert_eq!(profile.raw, OPENID_BODY);
	assert_eq!(profile.json["given_name"], "Jane");
}

#[tokio::test]
async fn provider_native_profile_is_normalized() {
	let server = MockServer::start_async().await;
	let strategy = build_test_strategy(mock_config(&server.base_url(), "/plus/v1/people/me"));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/plus/v1/people/me");
			then.status(200).header("content-type", "application/json").body(
				r#"{"id":"42","displayName":"Jane Doe","name":{"familyName":"Doe","givenName":"Jane"},"emails":[{"value":"jane@example.com","type":"account"}],"image":{"url":"https://example.com/p.jpg"}}"#,
			);
		})
		.await;

	assert_eq!(strategy.profile_format(), ProfileFormat::ProviderNative);

	// Drive the fetch through the capability trait the host sees.
	let host: &dyn Strategy = &strategy;
	let profile = host.user_profile("access-native").await.expect("Profile fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(host.name(), "google");
	assert_eq!(profile.id, "42");
	assert_eq!(profile.username.as_deref(), Some("jane@example.com"));
	assert_eq!(profile.display_name.as_deref(), Some("Jane Doe"));
	assert_eq!(profile.emails[0].kind.as_deref(), Some("account"));
	assert_eq!(profile.photos[0].value, "https://example.com/p.jpg");
}

#[tokio::test]
async fn nested_api_errors_become_provider_api_errors() {
	let server = MockServer::start_async().await;
	let strategy = build_test_strategy(mock_config(&server.base_url(), "/oauth2/v3/userinfo"));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/v3/userinfo");
			then.status(403)
				.header("content-type", "application/json")
				.body(r#"{"error":{"message":"bad","code":7}}"#);
		})
		.await;
	let err = strategy.fetch_profile("access").await.expect_err("Fetch should fail.");

	mock.assert_async().await;

	match err {
		Error::ProviderApi { message, code } => {
			assert_eq!(message, "bad");
			assert_eq!(code, 7);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn oauth_errors_become_userinfo_errors() {
	let server = MockServer::start_async().await;
	let strategy = build_test_strategy(mock_config(&server.base_url(), "/oauth2/v3/userinfo"));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/v3/userinfo");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"error":"invalid_grant","error_description":"expired"}"#);
		})
		.await;
	let err = strategy.fetch_profile("expired-access").await.expect_err("Fetch should fail.");

	mock.assert_async().await;

	match err {
		Error::UserInfo { description, code } => {
			assert_eq!(description, "expired");
			assert_eq!(code, "invalid_grant");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn unrecognized_failures_become_transport_errors() {
	let server = MockServer::start_async().await;
	let strategy = build_test_strategy(mock_config(&server.base_url(), "/oauth2/v3/userinfo"));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/v3/userinfo");
			then.status(502).body("Bad Gateway");
		})
		.await;
	let err = strategy.fetch_profile("access").await.expect_err("Fetch should fail.");

	mock.assert_async().await;

	match err {
		Error::Transport(TransportError::Status { status, body }) => {
			assert_eq!(status, 502);
			assert_eq!(body, "Bad Gateway");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn non_json_success_body_is_malformed() {
	let server = MockServer::start_async().await;
	let strategy = build_test_strategy(mock_config(&server.base_url(), "/oauth2/v3/userinfo"));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/v3/userinfo");
			then.status(200).header("content-type", "text/html").body("<html>login</html>");
		})
		.await;
	let err = strategy.fetch_profile("access").await.expect_err("Fetch should fail.");

	mock.assert_async().await;

	assert!(matches!(err, Error::MalformedProfile { .. }), "Unexpected error: {err:?}.");
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
	// Port 9 (discard) is closed on loopback in test environments.
	let strategy = build_test_strategy(mock_config("http://127.0.0.1:9", "/oauth2/v3/userinfo"));
	let err = strategy.fetch_profile("access").await.expect_err("Fetch should fail.");

	assert!(
		matches!(err, Error::Transport(TransportError::Network { .. })),
		"Unexpected error: {err:?}."
	);
}

#[tokio::test]
async fn empty_access_token_is_rejected_locally() {
	let strategy = build_test_strategy(mock_config("http://127.0.0.1:9", "/oauth2/v3/userinfo"));
	let err = strategy.fetch_profile("").await.expect_err("Fetch should fail.");

	assert!(matches!(err, Error::Config(ConfigError::MissingAccessToken)));
}
