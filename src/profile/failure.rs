//! Classification of failed profile responses.

// self
use crate::{_prelude::*, error::TransportError};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FailureBody {
	// Google API errors nest a message and numeric code under `error`.
	Api { error: ApiError },
	OAuth { error: String, error_description: String },
}

#[derive(Debug, Deserialize)]
struct ApiError {
	message: String,
	code: i64,
}

/// Maps a non-success profile response onto the strategy error taxonomy.
///
/// `{"error":{"message":..,"code":..}}` becomes [`Error::ProviderApi`],
/// `{"error":..,"error_description":..}` becomes [`Error::UserInfo`], and anything else
/// (including non-JSON bodies) becomes [`TransportError::Status`].
pub fn classify_failure(status: u16, body: &[u8]) -> Error {
	match serde_json::from_slice::<FailureBody>(body) {
		Ok(FailureBody::Api { error }) =>
			Error::ProviderApi { message: error.message, code: error.code },
		Ok(FailureBody::OAuth { error, error_description }) =>
			Error::UserInfo { description: error_description, code: error },
		Err(_) =>
			TransportError::Status { status, body: String::from_utf8_lossy(body).into_owned() }
				.into(),
	}
}
