//! Strategy-level error types shared across configuration, token exchange, and profile fetches.

// self
use crate::_prelude::*;

/// Strategy-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS) or an unrecognized failure response.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Google API error carried as `{"error":{"message":..,"code":..}}`.
	#[error("Google API returned an error ({code}): {message}.")]
	ProviderApi {
		/// Provider-supplied message.
		message: String,
		/// Provider-supplied numeric code, usually mirroring the HTTP status.
		code: i64,
	},
	/// OAuth-style userinfo error carried as `{"error":..,"error_description":..}`.
	#[error("Userinfo endpoint returned `{code}`: {description}.")]
	UserInfo {
		/// Provider-supplied `error_description`.
		description: String,
		/// Provider-supplied `error` code.
		code: String,
	},
	/// Profile endpoint answered successfully but the body does not match the expected schema.
	#[error("Failed to parse user profile.")]
	MalformedProfile {
		/// Structured parsing failure, including the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint rejected the authorization code.
	#[error("Token endpoint returned an OAuth error `{code}`{}.", detail(.description))]
	TokenExchange {
		/// OAuth `error` field.
		code: String,
		/// OAuth `error_description` field, when supplied.
		description: Option<String>,
	},
	/// Token endpoint responded with something other than a token response.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	TokenResponse {
		/// Summary of the failure.
		message: String,
	},
	/// The `state` returned on the callback differs from the one issued with the request.
	#[error("Authorization state mismatch.")]
	StateMismatch,
	/// The provider redirected back with an error instead of an authorization code.
	#[error("Authorization was rejected: {message}.")]
	Rejected {
		/// Provider-supplied reason (`error_description` or `error`).
		message: String,
	},
	/// The host's verify callback failed.
	#[error("Verify callback failed.")]
	Verify {
		/// Error returned by the host.
		#[source]
		source: BoxError,
	},
}

/// Configuration and validation failures raised while building a strategy.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// An endpoint URL cannot be used by the OAuth2 client.
	#[error("The {endpoint} URL is invalid.")]
	InvalidUrl {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} URL must use HTTPS: {url}.")]
	InsecureUrl {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// The client identifier is empty.
	#[error("Client identifier must not be empty.")]
	MissingClientId,
	/// An access token was empty.
	#[error("Access token must not be empty.")]
	MissingAccessToken,
	/// The callback did not carry an authorization code.
	#[error("Callback is missing the authorization code.")]
	MissingCode,
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO, unrecognized error responses).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// Provider answered with a non-success status and a body matching no known error shape.
	#[error("Failed to fetch user profile: HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, lossily decoded.
		body: String,
	},
	/// The HTTP client failed in a way it could not describe further.
	#[error("HTTP client error occurred while calling the provider: {message}.")]
	Other {
		/// Client-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Returns the HTTP status of a failed response, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}

fn detail(description: &Option<String>) -> String {
	description.as_deref().map(|value| format!(": {value}")).unwrap_or_default()
}

#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
