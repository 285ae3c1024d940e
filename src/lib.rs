//! Google OAuth 2.0 login strategy: authorization URLs, code exchange, and normalized user profiles
//! for any authentication middleware.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod params;
pub mod profile;
pub mod strategy;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::StrategyConfig,
		http::ReqwestHttpClient,
		profile::Profile,
		strategy::{GoogleStrategy, TokenSet, VerifyError},
	};

	/// Strategy type alias used by reqwest-backed integration tests.
	pub type TestStrategy<V> = GoogleStrategy<V, ReqwestHttpClient>;

	/// Verify callback that accepts every login and returns the profile identifier.
	pub type AcceptAll = fn(TokenSet, Profile) -> std::future::Ready<Result<String, VerifyError>>;

	/// Returns the profile identifier of every verified login.
	pub fn accept_all(
		_tokens: TokenSet,
		profile: Profile,
	) -> std::future::Ready<Result<String, VerifyError>> {
		std::future::ready(Ok(profile.id))
	}

	/// Builds a configuration whose endpoints all point at the provided mock server base URL.
	pub fn mock_config(base: &str, profile_path: &str) -> StrategyConfig {
		let url = |path: &str| {
			Url::parse(&format!("{base}{path}")).expect("Failed to parse mock endpoint URL.")
		};

		StrategyConfig::builder("client-it")
			.client_secret("secret-it")
			.authorization_url(url("/o/oauth2/v2/auth"))
			.token_url(url("/oauth2/v4/token"))
			.user_profile_url(url(profile_path))
			.callback_url(
				Url::parse("https://app.example.com/auth/google/callback")
					.expect("Failed to parse callback URL."),
			)
			.build()
			.expect("Failed to build mock strategy configuration.")
	}

	/// Constructs a strategy backed by reqwest and the accept-all verify callback.
	pub fn build_test_strategy(config: StrategyConfig) -> TestStrategy<AcceptAll> {
		let verify: AcceptAll = accept_all;

		GoogleStrategy::with_http_client(config, verify, ReqwestHttpClient::default())
			.expect("Failed to build test strategy.")
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value as Json;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
