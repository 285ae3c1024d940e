//! Normalized user profiles and the two Google profile schemas they are parsed from.
//!
//! The schema is chosen once per strategy by [`ProfileFormat::detect`], which looks at the
//! configured profile URL. `/userinfo` endpoints speak OpenID Connect claims ([`openid`]); any
//! other path is treated as a legacy Google+ people document ([`native`]).

pub mod failure;
pub mod native;
pub mod openid;

pub use failure::*;

// self
use crate::_prelude::*;

/// Provider identifier attached to every [`Profile`].
pub const PROVIDER: &str = "google";

/// Profile schema spoken by the configured profile endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileFormat {
	/// OpenID Connect userinfo claims (`sub`, `name`, `email`, ...).
	OpenId,
	/// Google+ people resource (`id`, `displayName`, `emails`, ...).
	ProviderNative,
}
impl ProfileFormat {
	/// Path suffix identifying an OpenID Connect userinfo endpoint.
	pub const OPENID_PATH_SUFFIX: &'static str = "/userinfo";

	/// Picks the schema from the profile URL's path.
	///
	/// This is a naming heuristic, not a negotiated contract: a userinfo endpoint mounted under a
	/// different path is parsed with the provider-native schema.
	pub fn detect(user_profile_url: &Url) -> Self {
		if user_profile_url.path().ends_with(Self::OPENID_PATH_SUFFIX) {
			Self::OpenId
		} else {
			Self::ProviderNative
		}
	}

	/// Returns a stable label suitable for logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::OpenId => "openid",
			Self::ProviderNative => "provider_native",
		}
	}

	/// Parses a successful profile response body under this schema.
	pub fn parse(self, body: &[u8]) -> Result<Profile> {
		let json: Json =
			serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(body))
				.map_err(|source| Error::MalformedProfile { source })?;
		let fields = match self {
			Self::OpenId => openid::fields(&json)?,
			Self::ProviderNative => native::fields(&json)?,
		};

		Ok(Profile::from_fields(fields, String::from_utf8_lossy(body).into_owned(), json))
	}
}
impl Display for ProfileFormat {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Provider-agnostic user profile handed to the verify callback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
	/// Constant provider identifier ([`PROVIDER`]).
	pub provider: String,
	/// Stable provider-side user identifier.
	pub id: String,
	/// Handle-like name, when the provider exposes one.
	pub username: Option<String>,
	/// Full display name.
	pub display_name: Option<String>,
	/// Structured name parts.
	pub name: Option<ProfileName>,
	/// Known email addresses.
	pub emails: Vec<ProfileEmail>,
	/// Avatar URLs.
	pub photos: Vec<ProfilePhoto>,
	/// Response body as received.
	pub raw: String,
	/// Parsed response body.
	pub json: Json,
}
impl Profile {
	fn from_fields(fields: ProfileFields, raw: String, json: Json) -> Self {
		let ProfileFields { id, username, display_name, name, emails, photos } = fields;

		Self {
			provider: PROVIDER.into(),
			id,
			username,
			display_name,
			name,
			emails,
			photos,
			raw,
			json,
		}
	}

	/// First email address, verified or not.
	pub fn primary_email(&self) -> Option<&str> {
		self.emails.first().map(|email| email.value.as_str())
	}
}

/// Structured name parts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileName {
	/// Family (last) name.
	pub family_name: Option<String>,
	/// Given (first) name.
	pub given_name: Option<String>,
}
impl ProfileName {
	fn from_parts(family_name: Option<String>, given_name: Option<String>) -> Option<Self> {
		if family_name.is_none() && given_name.is_none() {
			None
		} else {
			Some(Self { family_name, given_name })
		}
	}
}

/// Email address attached to a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEmail {
	/// Address.
	pub value: String,
	/// Whether the provider verified the address, when reported.
	pub verified: Option<bool>,
	/// Provider-specific address kind (`account`, `home`, ...).
	pub kind: Option<String>,
}

/// Avatar attached to a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePhoto {
	/// Image URL.
	pub value: String,
}

/// Schema-independent fields produced by the per-format parsers.
#[derive(Debug, Default)]
pub(crate) struct ProfileFields {
	pub(crate) id: String,
	pub(crate) username: Option<String>,
	pub(crate) display_name: Option<String>,
	pub(crate) name: Option<ProfileName>,
	pub(crate) emails: Vec<ProfileEmail>,
	pub(crate) photos: Vec<ProfilePhoto>,
}

/// Deserializes a typed schema out of an already parsed body, keeping the failing field path.
pub(crate) fn from_json<'de, T>(json: &'de Json) -> Result<T>
where
	T: Deserialize<'de>,
{
	serde_path_to_error::deserialize(json).map_err(|source| Error::MalformedProfile { source })
}
