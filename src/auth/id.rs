//! Strongly typed connection names used to key linked identities.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const CONNECTION_MAX_LEN: usize = 128;

/// Error returned when a connection name fails validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The connection name was empty.
	#[error("Connection name cannot be empty.")]
	Empty,
	/// The connection name contains whitespace characters.
	#[error("Connection name contains whitespace.")]
	ContainsWhitespace,
	/// The connection name exceeded the allowed character count.
	#[error("Connection name exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Discriminator naming the provider an identity belongs to (for example `spotify`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConnectionName(String);
impl ConnectionName {
	/// Creates a new connection name after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Returns the canonical Spotify connection name.
	pub fn spotify() -> Self {
		Self("spotify".into())
	}
}
impl Deref for ConnectionName {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for ConnectionName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for ConnectionName {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<ConnectionName> for String {
	fn from(value: ConnectionName) -> Self {
		value.0
	}
}
impl TryFrom<String> for ConnectionName {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Debug for ConnectionName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Connection({})", self.0)
	}
}
impl Display for ConnectionName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for ConnectionName {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace);
	}
	if view.len() > CONNECTION_MAX_LEN {
		return Err(IdentifierError::TooLong { max: CONNECTION_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn connection_names_validate() {
		assert!(ConnectionName::new("").is_err());
		assert!(ConnectionName::new(" spotify").is_err());
		assert!(ConnectionName::new("google oauth2").is_err());
		assert!(ConnectionName::new("a".repeat(CONNECTION_MAX_LEN + 1)).is_err());

		let name = ConnectionName::new("spotify").expect("Connection fixture should be valid.");

		assert_eq!(name, ConnectionName::spotify());
		assert_eq!(name.as_ref(), "spotify");
	}

	#[test]
	fn serde_enforces_validation() {
		let name: ConnectionName =
			serde_json::from_str("\"github\"").expect("Connection should deserialize.");

		assert_eq!(&*name, "github");
		assert!(serde_json::from_str::<ConnectionName>("\"with space\"").is_err());
	}
}
