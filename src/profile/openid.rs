//! OpenID Connect userinfo claims.

// self
use crate::{
	_prelude::*,
	profile::{self, ProfileEmail, ProfileFields, ProfileName, ProfilePhoto},
};

#[derive(Debug, Deserialize)]
struct Claims {
	sub: String,
	name: Option<String>,
	given_name: Option<String>,
	family_name: Option<String>,
	preferred_username: Option<String>,
	email: Option<String>,
	#[serde(default)]
	email_verified: Option<Verified>,
	picture: Option<String>,
}

// Some deployments serialize `email_verified` as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Verified {
	Flag(bool),
	Text(String),
}
impl Verified {
	fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Flag(flag) => Some(*flag),
			Self::Text(text) => text.parse().ok(),
		}
	}
}

pub(crate) fn fields(json: &Json) -> Result<ProfileFields> {
	let claims: Claims = profile::from_json(json)?;
	let verified = claims.email_verified.as_ref().and_then(Verified::as_bool);
	let emails = claims
		.email
		.iter()
		.map(|value| ProfileEmail { value: value.clone(), verified, kind: None })
		.collect();

	Ok(ProfileFields {
		username: claims.preferred_username.or_else(|| claims.email.clone()),
		display_name: claims.name,
		name: ProfileName::from_parts(claims.family_name, claims.given_name),
		emails,
		photos: claims.picture.map(|value| ProfilePhoto { value }).into_iter().collect(),
		id: claims.sub,
	})
}
