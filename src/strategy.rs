//! The Google login strategy and the capability trait hosts drive it through.
//!
//! Hosts hold a [`GoogleStrategy`] (or a `dyn Strategy`) and call it at three points of a login:
//! [`GoogleStrategy::authorization_request`] when redirecting the user,
//! [`GoogleStrategy::authenticate`] on the callback, and [`Strategy::user_profile`] whenever they
//! already hold an access token.

pub mod authorize;
pub mod token;
pub mod verify;

pub use authorize::*;
pub use token::*;
pub use verify::*;

// crates.io
use oauth2::{
	AsyncHttpClient,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION},
	},
};
// self
use crate::{
	_prelude::*,
	config::StrategyConfig,
	error::ConfigError,
	http::{self, StrategyHttpClient},
	oauth::OAuthDelegate,
	obs::{self, Stage, StageOutcome},
	params::AuthorizationOptions,
	profile::{self, Profile, ProfileFormat},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Boxed future returned by [`Strategy`] hooks.
pub type StrategyFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Capabilities an authentication middleware invokes on an OAuth 2.0 login strategy.
pub trait Strategy
where
	Self: Send + Sync,
{
	/// Name the host registers the strategy under.
	fn name(&self) -> &'static str;

	/// Provider-specific query parameters for the authorization request.
	///
	/// The default implementation adds nothing.
	fn authorization_params(&self, _options: &AuthorizationOptions) -> BTreeMap<String, String> {
		BTreeMap::new()
	}

	/// Fetches and normalizes the profile of the user owning `access_token`.
	fn user_profile<'a>(&'a self, access_token: &'a str) -> StrategyFuture<'a, Profile>;
}

/// Google OAuth 2.0 login strategy.
///
/// Construction applies configuration defaults, fixes the [`ProfileFormat`], and prepares the
/// `oauth2` client without touching the network. The strategy is immutable afterwards, so one
/// instance can serve every request.
pub struct GoogleStrategy<V, C>
where
	C: ?Sized + StrategyHttpClient,
{
	config: StrategyConfig,
	format: ProfileFormat,
	delegate: OAuthDelegate,
	http_client: Arc<C>,
	verify: V,
}
#[cfg(feature = "reqwest")]
impl<V> GoogleStrategy<V, ReqwestHttpClient>
where
	V: Verify,
{
	/// Creates a strategy backed by a default reqwest client.
	pub fn new(config: StrategyConfig, verify: V) -> Result<Self> {
		Self::with_http_client(config, verify, ReqwestHttpClient::default())
	}
}
impl<V, C> GoogleStrategy<V, C>
where
	V: Verify,
	C: ?Sized + StrategyHttpClient,
{
	/// Creates a strategy that reuses the caller-provided transport.
	pub fn with_http_client(
		config: StrategyConfig,
		verify: V,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let format = ProfileFormat::detect(&config.user_profile_url);
		let delegate = OAuthDelegate::from_config(&config)?;

		Ok(Self { config, format, delegate, http_client: http_client.into(), verify })
	}

	/// Configuration the strategy was built with, defaults applied.
	pub fn config(&self) -> &StrategyConfig {
		&self.config
	}

	/// Profile schema chosen at construction.
	pub fn profile_format(&self) -> ProfileFormat {
		self.format
	}

	/// Builds the redirect that starts a login.
	///
	/// The returned [`PendingAuthorization`] must be stored by the host and passed back to
	/// [`GoogleStrategy::authenticate`].
	pub fn authorization_request(&self, options: &AuthorizationOptions) -> AuthorizationRequest {
		obs::record_stage_outcome(Stage::Authorize, StageOutcome::Attempt);

		let request = authorize::build_request(&self.config, &self.authorization_params(options));

		obs::record_stage_outcome(Stage::Authorize, StageOutcome::Success);

		request
	}

	/// Completes a login from the provider's callback parameters.
	///
	/// Provider-reported errors and state mismatches fail before any network call. Otherwise the
	/// code is exchanged, the profile fetched, and both are handed to the verify callback.
	pub async fn authenticate(
		&self,
		pending: &PendingAuthorization,
		callback: &CallbackParams,
	) -> Result<V::User> {
		if let Some(error) = &callback.error {
			let message = callback.error_description.clone().unwrap_or_else(|| error.clone());

			return Err(Error::Rejected { message });
		}

		pending.validate_state(callback.state.as_deref())?;

		let code = callback
			.code
			.as_deref()
			.filter(|code| !code.is_empty())
			.ok_or(ConfigError::MissingCode)?;
		let tokens = self.exchange_code(code, pending.pkce_verifier.as_deref()).await?;
		let profile = self.fetch_profile(tokens.access_token.expose()).await?;

		obs::observe(Stage::Verify, "authenticate", async move {
			self.verify.verify(tokens, profile).await.map_err(|source| Error::Verify { source })
		})
		.await
	}

	/// Exchanges an authorization code for tokens.
	pub async fn exchange_code(&self, code: &str, pkce_verifier: Option<&str>) -> Result<TokenSet> {
		obs::observe(
			Stage::Exchange,
			"exchange_code",
			self.delegate.exchange_code(self.http_client.as_ref(), code, pkce_verifier),
		)
		.await
	}

	/// Issues one bearer-authenticated GET to the profile URL and normalizes the result.
	pub async fn fetch_profile(&self, access_token: &str) -> Result<Profile> {
		obs::observe(Stage::Profile, "fetch_profile", self.request_profile(access_token)).await
	}

	async fn request_profile(&self, access_token: &str) -> Result<Profile> {
		if access_token.is_empty() {
			return Err(ConfigError::MissingAccessToken.into());
		}

		let request = Request::builder()
			.method(Method::GET)
			.uri(self.config.user_profile_url.as_str())
			.header(AUTHORIZATION, format!("Bearer {access_token}"))
			.header(ACCEPT, "application/json")
			.body(Vec::new())
			.map_err(ConfigError::from)?;
		let handle = self.http_client.handle();
		let response = handle.call(request).await.map_err(http::map_client_error)?;
		let status = response.status();

		if status.is_success() {
			self.format.parse(response.body())
		} else {
			Err(profile::classify_failure(status.as_u16(), response.body()))
		}
	}
}
impl<V, C> Strategy for GoogleStrategy<V, C>
where
	V: Verify,
	C: ?Sized + StrategyHttpClient,
{
	fn name(&self) -> &'static str {
		profile::PROVIDER
	}

	fn authorization_params(&self, options: &AuthorizationOptions) -> BTreeMap<String, String> {
		options.to_params()
	}

	fn user_profile<'a>(&'a self, access_token: &'a str) -> StrategyFuture<'a, Profile> {
		Box::pin(self.fetch_profile(access_token))
	}
}
impl<V, C> Debug for GoogleStrategy<V, C>
where
	C: ?Sized + StrategyHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GoogleStrategy")
			.field("config", &self.config)
			.field("format", &self.format)
			.finish()
	}
}

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport.
pub type ReqwestGoogleStrategy<V> = GoogleStrategy<V, ReqwestHttpClient>;
