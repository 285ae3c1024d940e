//! OAuth 2.0 client delegate built on the `oauth2` crate.
//!
//! The strategy never speaks the token protocol itself: [`OAuthDelegate`] wraps a configured
//! [`BasicClient`] and turns its outcomes into strategy values and errors.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	HttpClientError, PkceCodeVerifier, RedirectUrl, RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicRequestTokenError, BasicTokenResponse},
};
// self
use crate::{
	_prelude::*,
	config::StrategyConfig,
	error::ConfigError,
	http::{self, StrategyHttpClient},
	strategy::{TokenSecret, TokenSet},
};

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Configured `oauth2` client performing the authorization-code exchange.
#[derive(Clone, Debug)]
pub(crate) struct OAuthDelegate {
	oauth_client: ConfiguredBasicClient,
}
impl OAuthDelegate {
	pub(crate) fn from_config(config: &StrategyConfig) -> Result<Self> {
		let auth_url = AuthUrl::new(config.authorization_url.to_string())
			.map_err(|source| ConfigError::InvalidUrl { endpoint: "authorization", source })?;
		let token_url = TokenUrl::new(config.token_url.to_string())
			.map_err(|source| ConfigError::InvalidUrl { endpoint: "token", source })?;
		// Google expects client credentials in the form body.
		let mut oauth_client = BasicClient::new(ClientId::new(config.client_id.clone()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_auth_type(AuthType::RequestBody);

		if let Some(secret) = &config.client_secret {
			oauth_client = oauth_client.set_client_secret(ClientSecret::new(secret.clone()));
		}
		if let Some(callback) = &config.callback_url {
			let redirect_url = RedirectUrl::new(callback.to_string())
				.map_err(|source| ConfigError::InvalidUrl { endpoint: "callback", source })?;

			oauth_client = oauth_client.set_redirect_uri(redirect_url);
		}

		Ok(Self { oauth_client })
	}

	pub(crate) async fn exchange_code<C>(
		&self,
		http_client: &C,
		code: &str,
		pkce_verifier: Option<&str>,
	) -> Result<TokenSet>
	where
		C: ?Sized + StrategyHttpClient,
	{
		let handle = http_client.handle();
		let mut request = self.oauth_client.exchange_code(AuthorizationCode::new(code.to_owned()));

		if let Some(verifier) = pkce_verifier {
			request = request.set_pkce_verifier(PkceCodeVerifier::new(verifier.to_owned()));
		}

		let response = request.request_async(&handle).await.map_err(map_request_error)?;

		token_set(response)
	}
}

fn token_set(response: BasicTokenResponse) -> Result<TokenSet> {
	let expires_at = match response.expires_in() {
		Some(expires_in) => {
			let secs = i64::try_from(expires_in.as_secs())
				.map_err(|_| ConfigError::ExpiresInOutOfRange)?;

			OffsetDateTime::now_utc().checked_add(Duration::seconds(secs))
		},
		None => None,
	};

	Ok(TokenSet {
		access_token: TokenSecret::new(response.access_token().secret().to_owned()),
		refresh_token: response
			.refresh_token()
			.map(|token| TokenSecret::new(token.secret().to_owned())),
		token_type: response.token_type().as_ref().to_owned(),
		scope: response
			.scopes()
			.map(|scopes| scopes.iter().map(|scope| scope.to_string()).collect())
			.unwrap_or_default(),
		expires_at,
	})
}

fn map_request_error<E>(err: BasicRequestTokenError<HttpClientError<E>>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		RequestTokenError::ServerResponse(response) => Error::TokenExchange {
			code: response.error().as_ref().to_owned(),
			description: response.error_description().cloned(),
		},
		RequestTokenError::Request(error) => http::map_client_error(error),
		RequestTokenError::Parse(error, _body) =>
			Error::TokenResponse { message: format!("malformed JSON ({error})") },
		RequestTokenError::Other(message) => Error::TokenResponse { message },
	}
}
