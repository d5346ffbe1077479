//! Typed bridge configuration loaded from JSON documents.

// self
use crate::{
	_prelude::*,
	auth::ClientCredentials,
	error::ConfigError,
	identity::ClaimNamespace,
	provider::ProviderDescriptor,
};

/// Everything a bridge needs besides its transport.
///
/// `descriptor` and `claim_namespace` default to the Spotify preset and
/// `https://my.ns/`; credentials may be given nested or flattened with their rule-style
/// `spotify_client_*` names.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BridgeConfig {
	/// Provider descriptor.
	#[serde(default)]
	pub descriptor: ProviderDescriptor,
	/// Client credentials for the token endpoint.
	#[serde(flatten)]
	pub credentials: ClientCredentials,
	/// Namespace prefixed to published claims.
	#[serde(default)]
	pub claim_namespace: ClaimNamespace,
}
impl BridgeConfig {
	/// Creates a Spotify configuration for the given credentials.
	pub fn new(credentials: ClientCredentials) -> Self {
		Self {
			descriptor: ProviderDescriptor::spotify(),
			credentials,
			claim_namespace: ClaimNamespace::default(),
		}
	}

	/// Parses and validates a JSON configuration document.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let deserializer = &mut serde_json::Deserializer::from_str(json);
		let config: Self = serde_path_to_error::deserialize(deserializer).map_err(|err| {
			let path = err.path().to_string();

			ConfigError::InvalidConfig { path, source: err.into_inner() }
		})?;

		config.descriptor.validate().map_err(ConfigError::from)?;

		Ok(config)
	}
}
