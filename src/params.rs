//! Google-specific authorization request parameters.
//!
//! [`AuthorizationOptions`] accepts the loosely typed option objects hosts tend to forward from
//! their routing layer (camelCase keys, unknown keys ignored) and
//! [`AuthorizationOptions::to_params`] turns them into query parameters.

// self
use crate::_prelude::*;

/// Per-request authorization options understood by Google.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorizationOptions {
	/// `online` or `offline`; `offline` yields a refresh token.
	#[serde(deserialize_with = "lenient_string")]
	pub access_type: Option<String>,
	/// Space-delimited prompt list (`none`, `consent`, `select_account`).
	#[serde(deserialize_with = "lenient_string")]
	pub prompt: Option<String>,
	/// Email address or `sub` used to pre-fill the account chooser.
	#[serde(deserialize_with = "lenient_string")]
	pub login_hint: Option<String>,
	/// Enables incremental authorization.
	#[serde(deserialize_with = "truthy")]
	pub include_granted_scopes: bool,
	/// Consent page display mode.
	#[serde(deserialize_with = "lenient_string")]
	pub display: Option<String>,
	/// OpenID 2.0 realm for migrating legacy identifiers.
	#[serde(rename = "openIDRealm", deserialize_with = "lenient_string")]
	pub openid_realm: Option<String>,
	/// Undocumented `approval_prompt` passthrough.
	#[serde(deserialize_with = "lenient_string")]
	pub approval_prompt: Option<String>,
	/// Undocumented `user_id` passthrough.
	#[serde(rename = "userID", deserialize_with = "lenient_string")]
	pub user_id: Option<String>,
}
impl AuthorizationOptions {
	/// Parses options out of an arbitrary JSON value; anything that is not an object yields the
	/// default (empty) options.
	///
	/// Values are read loosely: numbers and booleans are stringified, and falsy values (`null`,
	/// `false`, `0`, `""`) count as not supplied.
	pub fn from_json(value: &Json) -> Self {
		if !value.is_object() {
			return Self::default();
		}

		Self::deserialize(value).unwrap_or_default()
	}

	/// Sets the access type.
	pub fn access_type(mut self, value: impl Into<String>) -> Self {
		self.access_type = Some(value.into());

		self
	}

	/// Sets the prompt.
	pub fn prompt(mut self, value: impl Into<String>) -> Self {
		self.prompt = Some(value.into());

		self
	}

	/// Sets the login hint.
	pub fn login_hint(mut self, value: impl Into<String>) -> Self {
		self.login_hint = Some(value.into());

		self
	}

	/// Enables or disables incremental authorization.
	pub fn include_granted_scopes(mut self, enabled: bool) -> Self {
		self.include_granted_scopes = enabled;

		self
	}

	/// Sets the display mode.
	pub fn display(mut self, value: impl Into<String>) -> Self {
		self.display = Some(value.into());

		self
	}

	/// Sets the OpenID 2.0 realm.
	pub fn openid_realm(mut self, value: impl Into<String>) -> Self {
		self.openid_realm = Some(value.into());

		self
	}

	/// Sets the `approval_prompt` passthrough.
	pub fn approval_prompt(mut self, value: impl Into<String>) -> Self {
		self.approval_prompt = Some(value.into());

		self
	}

	/// Sets the `user_id` passthrough.
	pub fn user_id(mut self, value: impl Into<String>) -> Self {
		self.user_id = Some(value.into());

		self
	}

	/// Maps the supplied options onto Google's query parameter names.
	///
	/// Only supplied, non-empty options produce a key.
	pub fn to_params(&self) -> BTreeMap<String, String> {
		let mut params = BTreeMap::new();
		let mut put = |key: &str, value: Option<&String>| {
			if let Some(value) = value.filter(|value| !value.is_empty()) {
				params.insert(key.to_owned(), value.clone());
			}
		};

		put("access_type", self.access_type.as_ref());
		put("prompt", self.prompt.as_ref());
		put("login_hint", self.login_hint.as_ref());
		put("display", self.display.as_ref());
		put("openid.realm", self.openid_realm.as_ref());
		put("approval_prompt", self.approval_prompt.as_ref());
		put("user_id", self.user_id.as_ref());

		if self.include_granted_scopes {
			params.insert("include_granted_scopes".into(), "true".into());
		}

		params
	}
}

// JavaScript-style truthiness: `false`, `0`, `""` and `null` are falsy.
fn is_truthy(value: &Json) -> bool {
	match value {
		Json::Null => false,
		Json::Bool(flag) => *flag,
		Json::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
		Json::String(text) => !text.is_empty(),
		Json::Array(_) | Json::Object(_) => true,
	}
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(is_truthy(&Json::deserialize(deserializer)?))
}

// Truthy scalars become strings; falsy values and structured values are dropped.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let value = Json::deserialize(deserializer)?;

	if !is_truthy(&value) {
		return Ok(None);
	}

	Ok(match value {
		Json::String(text) => Some(text),
		Json::Number(number) => Some(number.to_string()),
		Json::Bool(flag) => Some(flag.to_string()),
		Json::Null | Json::Array(_) | Json::Object(_) => None,
	})
}
