//! OAuth client credentials handed to the bridge explicitly.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Confidential client credentials registered with the provider.
///
/// Accepts `spotify_client_id`/`spotify_client_secret` as aliases so rule-style
/// configuration maps deserialize directly.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientCredentials {
	/// OAuth 2.0 client identifier.
	#[serde(alias = "spotify_client_id")]
	pub client_id: String,
	/// OAuth 2.0 client secret.
	#[serde(alias = "spotify_client_secret")]
	pub client_secret: TokenSecret,
}
impl ClientCredentials {
	/// Creates a credential pair; values are opaque and not validated locally.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<TokenSecret>) -> Self {
		Self { client_id: client_id.into(), client_secret: client_secret.into() }
	}

	/// Returns the `Authorization` header value for `client_secret_basic`.
	pub fn basic_authorization(&self) -> String {
		let raw = format!("{}:{}", self.client_id, self.client_secret.expose());

		format!("Basic {}", STANDARD.encode(raw))
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.finish()
	}
}
