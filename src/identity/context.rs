//! Claim namespaces and the authentication context claims are written into.

// self
use crate::{_prelude::*, auth::ConnectionName};

/// Error returned when a claim namespace cannot be used.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ClaimNamespaceError {
	/// The namespace is not an absolute URL.
	#[error("Claim namespace `{namespace}` is not an absolute URL.")]
	NotAUrl {
		/// Rejected namespace.
		namespace: String,
	},
	/// The namespace must end with `/` so claim paths can be appended.
	#[error("Claim namespace `{namespace}` must end with `/`.")]
	MissingTrailingSlash {
		/// Rejected namespace.
		namespace: String,
	},
}

/// URL prefix that keeps custom claims from colliding with registered claim names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClaimNamespace(String);
impl ClaimNamespace {
	/// Namespace used when none is configured.
	pub const DEFAULT: &'static str = "https://my.ns/";

	/// Creates a namespace after validating it is an absolute URL ending with `/`.
	pub fn new(value: impl Into<String>) -> Result<Self, ClaimNamespaceError> {
		let value = value.into();

		if Url::parse(&value).is_err() {
			return Err(ClaimNamespaceError::NotAUrl { namespace: value });
		}
		if !value.ends_with('/') {
			return Err(ClaimNamespaceError::MissingTrailingSlash { namespace: value });
		}

		Ok(Self(value))
	}

	/// Returns the claim key under which the connection's access token is published.
	pub fn access_token_claim(&self, connection: &ConnectionName) -> String {
		format!("{}{connection}/access_token", self.0)
	}
}
impl Default for ClaimNamespace {
	fn default() -> Self {
		Self(Self::DEFAULT.into())
	}
}
impl AsRef<str> for ClaimNamespace {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for ClaimNamespace {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl From<ClaimNamespace> for String {
	fn from(value: ClaimNamespace) -> Self {
		value.0
	}
}
impl TryFrom<String> for ClaimNamespace {
	type Error = ClaimNamespaceError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

/// Claim map attached to an issued token.
pub type Claims = BTreeMap<String, JsonValue>;

/// Caller-owned authentication context the refresh flow writes claims into.
///
/// Fields other than the two claim bags are preserved verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
	/// Claims added to the issued ID token.
	#[serde(default)]
	pub id_token: Claims,
	/// Claims added to the issued access token.
	#[serde(default)]
	pub access_token: Claims,
	/// Remaining context attributes.
	#[serde(flatten)]
	pub other: BTreeMap<String, JsonValue>,
}
impl AuthContext {
	/// Returns an ID token claim by key.
	pub fn claim(&self, key: &str) -> Option<&JsonValue> {
		self.id_token.get(key)
	}

	/// Sets an ID token claim, returning the previous value.
	pub fn set_claim(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Option<JsonValue> {
		self.id_token.insert(key.into(), value.into())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_namespace_builds_spotify_claim() {
		let key = ClaimNamespace::default().access_token_claim(&ConnectionName::spotify());

		assert_eq!(key, "https://my.ns/spotify/access_token");
	}

	#[test]
	fn namespaces_are_validated() {
		assert!(matches!(
			ClaimNamespace::new("my.ns/"),
			Err(ClaimNamespaceError::NotAUrl { .. })
		));
		assert!(matches!(
			ClaimNamespace::new("https://my.ns"),
			Err(ClaimNamespaceError::MissingTrailingSlash { .. })
		));
		assert!(ClaimNamespace::new("https://claims.example.com/").is_ok());
	}

	#[test]
	fn context_round_trips_camel_case_and_extra_fields() {
		let mut context: AuthContext = serde_json::from_str(
			r#"{"clientID":"abc","idToken":{"https://my.ns/role":"admin"}}"#,
		)
		.expect("Context fixture should deserialize.");

		assert_eq!(context.claim("https://my.ns/role"), Some(&JsonValue::from("admin")));
		assert_eq!(context.set_claim("https://my.ns/role", "viewer"), Some("admin".into()));

		let value = serde_json::to_value(&context).expect("Context should serialize.");

		assert_eq!(value["clientID"], "abc");
		assert_eq!(value["idToken"]["https://my.ns/role"], "viewer");
		assert!(value["accessToken"].as_object().is_some_and(|claims| claims.is_empty()));
	}
}
