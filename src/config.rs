//! Strategy configuration with Google defaults, a fluent builder, and serde support.
//!
//! [`StrategyConfig`] is immutable once built. Endpoints left unset fall back to Google's
//! published URLs, and every endpoint must use HTTPS unless it points at a loopback host (handy
//! for local mock servers).

// std
use std::net::IpAddr;
// crates.io
use url::Host;
// self
use crate::{_prelude::*, error::ConfigError};

/// Google's authorization endpoint.
pub const DEFAULT_AUTHORIZATION_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
/// Google's token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://www.googleapis.com/oauth2/v4/token";
/// Google's OpenID Connect userinfo endpoint.
pub const DEFAULT_USER_PROFILE_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Immutable strategy configuration consumed by [`GoogleStrategy`](crate::strategy::GoogleStrategy).
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "StrategyConfigBuilder")]
pub struct StrategyConfig {
	/// Authorization endpoint users are redirected to.
	pub authorization_url: Url,
	/// Token endpoint used for the code exchange.
	pub token_url: Url,
	/// Profile endpoint queried with the access token.
	pub user_profile_url: Url,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret for confidential clients.
	pub client_secret: Option<String>,
	/// Redirect URI registered with the provider.
	pub callback_url: Option<Url>,
	/// Scopes requested on every authorization request.
	pub scope: Vec<String>,
	/// Adds a PKCE S256 challenge to authorization requests when set.
	pub pkce: bool,
}
impl StrategyConfig {
	/// Creates a new builder for the provided client identifier.
	pub fn builder(client_id: impl Into<String>) -> StrategyConfigBuilder {
		StrategyConfigBuilder::new(client_id)
	}

	/// Space-delimited scope parameter, or `None` when no scope is configured.
	pub fn scope_param(&self) -> Option<String> {
		if self.scope.is_empty() { None } else { Some(self.scope.join(" ")) }
	}
}
impl Debug for StrategyConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyConfig")
			.field("authorization_url", &self.authorization_url.as_str())
			.field("token_url", &self.token_url.as_str())
			.field("user_profile_url", &self.user_profile_url.as_str())
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("callback_url", &self.callback_url.as_ref().map(Url::as_str))
			.field("scope", &self.scope)
			.field("pkce", &self.pkce)
			.finish()
	}
}
impl TryFrom<StrategyConfigBuilder> for StrategyConfig {
	type Error = ConfigError;

	fn try_from(builder: StrategyConfigBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}

/// Builder for [`StrategyConfig`] values.
///
/// Also the serde shape of the configuration: `client_id` is required, everything else is
/// optional and defaults as described on each field.
#[derive(Clone, Debug, Deserialize)]
pub struct StrategyConfigBuilder {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret for confidential clients.
	#[serde(default)]
	pub client_secret: Option<String>,
	/// Authorization endpoint; defaults to [`DEFAULT_AUTHORIZATION_URL`].
	#[serde(default)]
	pub authorization_url: Option<Url>,
	/// Token endpoint; defaults to [`DEFAULT_TOKEN_URL`].
	#[serde(default)]
	pub token_url: Option<Url>,
	/// Profile endpoint; defaults to [`DEFAULT_USER_PROFILE_URL`].
	#[serde(default)]
	pub user_profile_url: Option<Url>,
	/// Redirect URI registered with the provider.
	#[serde(default)]
	pub callback_url: Option<Url>,
	/// Requested scopes.
	#[serde(default)]
	pub scope: Vec<String>,
	/// Enables PKCE.
	#[serde(default)]
	pub pkce: bool,
}
impl StrategyConfigBuilder {
	/// Creates a new builder seeded with the provided client identifier.
	pub fn new(client_id: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: None,
			authorization_url: None,
			token_url: None,
			user_profile_url: None,
			callback_url: None,
			scope: Vec::new(),
			pkce: false,
		}
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_url(mut self, url: Url) -> Self {
		self.authorization_url = Some(url);

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: Url) -> Self {
		self.token_url = Some(url);

		self
	}

	/// Overrides the profile endpoint.
	pub fn user_profile_url(mut self, url: Url) -> Self {
		self.user_profile_url = Some(url);

		self
	}

	/// Sets the redirect URI.
	pub fn callback_url(mut self, url: Url) -> Self {
		self.callback_url = Some(url);

		self
	}

	/// Appends scopes to the requested set, skipping duplicates.
	pub fn scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for scope in scopes {
			let scope = scope.into();

			if !self.scope.contains(&scope) {
				self.scope.push(scope);
			}
		}

		self
	}

	/// Enables or disables PKCE.
	pub fn pkce(mut self, enabled: bool) -> Self {
		self.pkce = enabled;

		self
	}

	/// Consumes the builder, applies defaults, and validates the resulting configuration.
	pub fn build(self) -> Result<StrategyConfig, ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingClientId);
		}

		let authorization_url =
			endpoint_or_default("authorization", self.authorization_url, DEFAULT_AUTHORIZATION_URL)?;
		let token_url = endpoint_or_default("token", self.token_url, DEFAULT_TOKEN_URL)?;
		let user_profile_url =
			endpoint_or_default("user profile", self.user_profile_url, DEFAULT_USER_PROFILE_URL)?;
		let scope = self.scope.into_iter().filter(|value| !value.trim().is_empty()).collect();

		Ok(StrategyConfig {
			authorization_url,
			token_url,
			user_profile_url,
			client_id: self.client_id,
			client_secret: self.client_secret.filter(|secret| !secret.is_empty()),
			callback_url: self.callback_url,
			scope,
			pkce: self.pkce,
		})
	}
}

fn endpoint_or_default(
	name: &'static str,
	url: Option<Url>,
	default: &str,
) -> Result<Url, ConfigError> {
	let url = match url {
		Some(url) => url,
		None => Url::parse(default)
			.map_err(|source| ConfigError::InvalidUrl { endpoint: name, source })?,
	};

	validate_endpoint(name, &url)?;

	Ok(url)
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ConfigError::InsecureUrl { endpoint: name, url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback(),
		Some(Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback(),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test URL.")
	}

	#[test]
	fn defaults_point_at_google() {
		let config = StrategyConfig::builder("client").build().expect("Config should build.");

		assert_eq!(config.authorization_url.as_str(), DEFAULT_AUTHORIZATION_URL);
		assert_eq!(config.token_url.as_str(), DEFAULT_TOKEN_URL);
		assert_eq!(config.user_profile_url.as_str(), DEFAULT_USER_PROFILE_URL);
		assert!(config.client_secret.is_none());
		assert!(config.scope_param().is_none());
		assert!(!config.pkce);
	}

	#[test]
	fn rejects_insecure_and_empty_values() {
		let err = StrategyConfig::builder("client")
			.token_url(url("http://example.com/token"))
			.build()
			.expect_err("Plain HTTP should be rejected for public hosts.");

		assert!(matches!(err, ConfigError::InsecureUrl { endpoint: "token", .. }));

		let err = StrategyConfig::builder("  ").build().expect_err("Empty client id should fail.");

		assert!(matches!(err, ConfigError::MissingClientId));
	}

	#[test]
	fn allows_plain_http_on_loopback() {
		let config = StrategyConfig::builder("client")
			.user_profile_url(url("http://127.0.0.1:8080/userinfo"))
			.token_url(url("http://localhost:8080/token"))
			.authorization_url(url("http://[::1]:8080/auth"))
			.build()
			.expect("Loopback endpoints should be accepted.");

		assert_eq!(config.user_profile_url.as_str(), "http://127.0.0.1:8080/userinfo");
	}

	#[test]
	fn scopes_are_deduplicated_and_joined() {
		let config = StrategyConfig::builder("client")
			.scopes(["openid", "email"])
			.scopes(["email", "profile", ""])
			.build()
			.expect("Config should build.");

		assert_eq!(config.scope_param().as_deref(), Some("openid email profile"));
	}

	#[test]
	fn deserializes_with_defaults() {
		let config: StrategyConfig = serde_json::from_str(
			r#"{"client_id":"abc","client_secret":"shh","callback_url":"https://app.example.com/cb","scope":["profile"]}"#,
		)
		.expect("Config should deserialize.");

		assert_eq!(config.client_id, "abc");
		assert_eq!(config.client_secret.as_deref(), Some("shh"));
		assert_eq!(config.user_profile_url.as_str(), DEFAULT_USER_PROFILE_URL);
		assert_eq!(config.scope, vec!["profile".to_owned()]);

		let err = serde_json::from_str::<StrategyConfig>(
			r#"{"client_id":"abc","token_url":"http://example.com/token"}"#,
		)
		.expect_err("Insecure endpoints should fail deserialization.");

		assert!(err.to_string().contains("must use HTTPS"));
	}

	#[test]
	fn debug_redacts_secret() {
		let config = StrategyConfig::builder("client")
			.client_secret("super-secret")
			.build()
			.expect("Config should build.");
		let rendered = format!("{config:?}");

		assert!(!rendered.contains("super-secret"));
		assert!(rendered.contains("client_secret_set: true"));
	}
}
