//! User records and their linked identities.

// std
use std::collections::btree_map::{Entry, Values};
// crates.io
use serde::Deserializer;
// self
use crate::{
	_prelude::*,
	auth::{ConnectionName, TokenSecret},
};

/// Linkage between a user and one external provider.
///
/// Attributes the bridge does not read (`profileData`, `expires_in`, ...) are kept in
/// `other` so the identity serializes back as received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
	/// Connection discriminator (for example `spotify`).
	pub connection: ConnectionName,
	/// Provider-side user identifier; numeric identifiers are stringified.
	#[serde(deserialize_with = "string_or_number")]
	pub user_id: String,
	/// Provider label, usually the same as the connection for social logins.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub provider: Option<String>,
	/// Whether the identity comes from a social connection.
	#[serde(default, rename = "isSocial", skip_serializing_if = "Option::is_none")]
	pub is_social: Option<bool>,
	/// Long-lived refresh token issued by the provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Last access token issued by the provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_token: Option<TokenSecret>,
	/// Remaining identity attributes.
	#[serde(flatten)]
	pub other: BTreeMap<String, JsonValue>,
}
impl Identity {
	/// Creates an identity without tokens.
	pub fn new(connection: ConnectionName, user_id: impl Into<String>) -> Self {
		Self {
			connection,
			user_id: user_id.into(),
			provider: None,
			is_social: None,
			refresh_token: None,
			access_token: None,
			other: BTreeMap::new(),
		}
	}

	/// Attaches a refresh token.
	pub fn with_refresh_token(mut self, token: impl Into<TokenSecret>) -> Self {
		self.refresh_token = Some(token.into());

		self
	}
}

/// Linked identities keyed by connection name.
///
/// Serialized as a JSON array. When the array lists a connection twice, the first entry is
/// kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Identity>", into = "Vec<Identity>")]
pub struct Identities(BTreeMap<ConnectionName, Identity>);
impl Identities {
	/// Returns the identity linked through `connection`, if any.
	pub fn get(&self, connection: &str) -> Option<&Identity> {
		self.0.get(connection)
	}

	/// Inserts an identity unless its connection is already linked.
	///
	/// Returns `false` when an identity for the same connection already exists.
	pub fn insert(&mut self, identity: Identity) -> bool {
		match self.0.entry(identity.connection.clone()) {
			Entry::Vacant(slot) => {
				slot.insert(identity);

				true
			},
			Entry::Occupied(_) => false,
		}
	}

	/// Iterates identities ordered by connection name.
	pub fn iter(&self) -> Values<'_, ConnectionName, Identity> {
		self.0.values()
	}

	/// Returns the number of linked identities.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no identity is linked.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl From<Vec<Identity>> for Identities {
	fn from(list: Vec<Identity>) -> Self {
		list.into_iter().collect()
	}
}
impl From<Identities> for Vec<Identity> {
	fn from(identities: Identities) -> Self {
		identities.0.into_values().collect()
	}
}
impl FromIterator<Identity> for Identities {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = Identity>,
	{
		let mut identities = Self::default();

		for identity in iter {
			identities.insert(identity);
		}

		identities
	}
}

/// User record handed to the refresh flow.
///
/// Fields other than `user_id` and `identities` are preserved verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
	/// Pipeline-level user identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	/// Linked provider identities.
	#[serde(default)]
	pub identities: Identities,
	/// Remaining user attributes.
	#[serde(flatten)]
	pub other: BTreeMap<String, JsonValue>,
}
impl UserRecord {
	/// Returns the identity linked through `connection`, if any.
	pub fn identity(&self, connection: &str) -> Option<&Identity> {
		self.identities.get(connection)
	}
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Text(String),
		Number(serde_json::Number),
	}

	Ok(match Raw::deserialize(deserializer)? {
		Raw::Text(value) => value,
		Raw::Number(value) => value.to_string(),
	})
}
