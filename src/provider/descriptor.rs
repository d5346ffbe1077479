//! Provider descriptor data structures shared by all flows.

/// Builder API for assembling provider descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, auth::ConnectionName};

/// User agent sent with every provider request unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
/// Upper bound applied to every provider request unless overridden.
pub const DEFAULT_REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// Client authentication modes for token endpoint calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	#[default]
	/// HTTP Basic with `client_id`/`client_secret`.
	ClientSecretBasic,
	/// Form POST body parameters for `client_id`/`client_secret`.
	ClientSecretPost,
}

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Current-user profile endpoint.
	pub profile: Url,
	/// Token endpoint used for refresh exchanges.
	pub token: Url,
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Connection discriminator matched against linked identities.
	pub connection: ConnectionName,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Client authentication mechanism for the token endpoint.
	#[serde(default)]
	pub client_auth_method: ClientAuthMethod,
	/// `User-Agent` header value.
	#[serde(default = "default_user_agent")]
	pub user_agent: String,
	/// Timeout applied to each request.
	#[serde(default = "default_request_timeout", rename = "request_timeout_ms", with = "millis")]
	pub request_timeout: StdDuration,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided connection.
	pub fn builder(connection: ConnectionName) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(connection)
	}

	/// Descriptor for Spotify's Web API and accounts service.
	pub fn spotify() -> Self {
		Self {
			connection: ConnectionName::spotify(),
			endpoints: ProviderEndpoints {
				profile: Url::parse("https://api.spotify.com/v1/me")
					.expect("Spotify profile endpoint literal must parse."),
				token: Url::parse("https://accounts.spotify.com/api/token")
					.expect("Spotify token endpoint literal must parse."),
			},
			client_auth_method: ClientAuthMethod::ClientSecretBasic,
			user_agent: default_user_agent(),
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
		}
	}
}
impl Default for ProviderDescriptor {
	fn default() -> Self {
		Self::spotify()
	}
}

fn default_user_agent() -> String {
	DEFAULT_USER_AGENT.into()
}

fn default_request_timeout() -> StdDuration {
	DEFAULT_REQUEST_TIMEOUT
}

mod millis {
	// crates.io
	use serde::{Deserializer, Serializer};
	// self
	use crate::_prelude::*;

	pub(super) fn serialize<S>(value: &StdDuration, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
	}

	pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<StdDuration, D::Error>
	where
		D: Deserializer<'de>,
	{
		u64::deserialize(deserializer).map(StdDuration::from_millis)
	}
}
