//! Google+ people resource (`plus/v1/people/me`).

// self
use crate::{
	_prelude::*,
	profile::{self, ProfileEmail, ProfileFields, ProfileName, ProfilePhoto},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Person {
	id: String,
	display_name: Option<String>,
	nickname: Option<String>,
	name: Option<PersonName>,
	#[serde(default)]
	emails: Vec<PersonEmail>,
	image: Option<PersonImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonName {
	family_name: Option<String>,
	given_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PersonEmail {
	value: String,
	#[serde(rename = "type")]
	kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PersonImage {
	url: String,
}

pub(crate) fn fields(json: &Json) -> Result<ProfileFields> {
	let person: Person = profile::from_json(json)?;
	let emails: Vec<ProfileEmail> = person
		.emails
		.into_iter()
		.map(|email| ProfileEmail { value: email.value, verified: None, kind: email.kind })
		.collect();
	let username = person.nickname.or_else(|| emails.first().map(|email| email.value.clone()));

	Ok(ProfileFields {
		id: person.id,
		username,
		display_name: person.display_name,
		name: person.name.and_then(|name| ProfileName::from_parts(name.family_name, name.given_name)),
		emails,
		photos: person.image.map(|image| ProfilePhoto { value: image.url }).into_iter().collect(),
	})
}
