//! Authorization redirect construction and callback parameters.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
// self
use crate::{_prelude::*, config::StrategyConfig};

const STATE_LEN: usize = 32;
const PKCE_VERIFIER_LEN: usize = 64;

/// Redirect the host sends the user to, plus the values it must keep until the callback.
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
	/// Fully-formed authorize URL.
	pub authorize_url: Url,
	/// State and PKCE verifier to persist in the host's session.
	pub pending: PendingAuthorization,
}

/// Values that must round-trip through the host's session between redirect and callback.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAuthorization {
	/// Opaque state value echoed back by the provider.
	pub state: String,
	/// PKCE verifier, present when PKCE is enabled.
	pub pkce_verifier: Option<String>,
}
impl PendingAuthorization {
	/// Validates the `state` returned on the callback.
	pub fn validate_state(&self, returned_state: Option<&str>) -> Result<()> {
		if returned_state == Some(self.state.as_str()) { Ok(()) } else { Err(Error::StateMismatch) }
	}
}
impl Debug for PendingAuthorization {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PendingAuthorization")
			.field("state", &self.state)
			.field("pkce_verifier_set", &self.pkce_verifier.is_some())
			.finish()
	}
}

/// Query parameters the provider appends to the callback URL.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CallbackParams {
	/// Authorization code.
	pub code: Option<String>,
	/// Echoed state.
	pub state: Option<String>,
	/// OAuth error code (`access_denied`, ...).
	pub error: Option<String>,
	/// Human-readable error description.
	pub error_description: Option<String>,
}
impl CallbackParams {
	/// Extracts the callback parameters from the full callback URL.
	pub fn from_url(url: &Url) -> Self {
		let mut params = Self::default();

		for (key, value) in url.query_pairs() {
			let slot = match key.as_ref() {
				"code" => &mut params.code,
				"state" => &mut params.state,
				"error" => &mut params.error,
				"error_description" => &mut params.error_description,
				_ => continue,
			};

			*slot = Some(value.into_owned());
		}

		params
	}
}

#[derive(Clone)]
struct PkcePair {
	verifier: String,
	challenge: String,
}
impl PkcePair {
	fn generate() -> Self {
		let verifier = random_string(PKCE_VERIFIER_LEN);
		let challenge = compute_pkce_challenge(&verifier);

		Self { verifier, challenge }
	}
}

pub(super) fn build_request(
	config: &StrategyConfig,
	params: &BTreeMap<String, String>,
) -> AuthorizationRequest {
	let state = random_string(STATE_LEN);
	let pkce = config.pkce.then(PkcePair::generate);
	let mut authorize_url = config.authorization_url.clone();
	let mut pairs = authorize_url.query_pairs_mut();

	pairs.append_pair("response_type", "code");
	pairs.append_pair("client_id", &config.client_id);

	if let Some(callback) = &config.callback_url {
		pairs.append_pair("redirect_uri", callback.as_str());
	}
	if let Some(scope) = config.scope_param() {
		pairs.append_pair("scope", &scope);
	}

	for (key, value) in params {
		pairs.append_pair(key, value);
	}

	pairs.append_pair("state", &state);

	if let Some(pkce) = &pkce {
		pairs.append_pair("code_challenge", &pkce.challenge);
		pairs.append_pair("code_challenge_method", "S256");
	}

	drop(pairs);

	AuthorizationRequest {
		authorize_url,
		pending: PendingAuthorization { state, pkce_verifier: pkce.map(|pkce| pkce.verifier) },
	}
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

fn compute_pkce_challenge(verifier: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(verifier.as_bytes());
	let digest = hasher.finalize();
	URL_SAFE_NO_PAD.encode(digest)
}
