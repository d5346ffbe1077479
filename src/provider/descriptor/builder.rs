// self
use crate::{
	_prelude::*,
	auth::ConnectionName,
	provider::{
		ClientAuthMethod, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT, ProviderDescriptor,
		ProviderEndpoints,
	},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ProviderDescriptorError {
	/// Profile endpoint is required by the profile flow.
	#[error("Missing profile endpoint.")]
	MissingProfileEndpoint,
	/// Token endpoint is required by the refresh flow.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Header values cannot carry control characters.
	#[error("User agent must be non-empty printable text.")]
	InvalidUserAgent,
	/// A zero timeout would fail every request.
	#[error("Request timeout must be greater than zero.")]
	ZeroTimeout,
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Connection discriminator for the descriptor being constructed.
	pub connection: ConnectionName,
	/// Current-user profile endpoint.
	pub profile_endpoint: Option<Url>,
	/// Token endpoint used for refresh exchanges.
	pub token_endpoint: Option<Url>,
	/// Client authentication method for the token endpoint.
	pub client_auth_method: ClientAuthMethod,
	/// `User-Agent` header value.
	pub user_agent: String,
	/// Timeout applied to each request.
	pub request_timeout: StdDuration,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided connection.
	pub fn new(connection: ConnectionName) -> Self {
		Self {
			connection,
			profile_endpoint: None,
			token_endpoint: None,
			client_auth_method: ClientAuthMethod::default(),
			user_agent: DEFAULT_USER_AGENT.into(),
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
		}
	}

	/// Sets the profile endpoint.
	pub fn profile_endpoint(mut self, url: Url) -> Self {
		self.profile_endpoint = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Overrides the client authentication method.
	pub fn client_auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.client_auth_method = method;

		self
	}

	/// Overrides the `User-Agent` header value.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();

		self
	}

	/// Overrides the per-request timeout (defaults to 10 seconds).
	pub fn request_timeout(mut self, timeout: StdDuration) -> Self {
		self.request_timeout = timeout;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let profile =
			self.profile_endpoint.ok_or(ProviderDescriptorError::MissingProfileEndpoint)?;
		let token = self.token_endpoint.ok_or(ProviderDescriptorError::MissingTokenEndpoint)?;
		let descriptor = ProviderDescriptor {
			connection: self.connection,
			endpoints: ProviderEndpoints { profile, token },
			client_auth_method: self.client_auth_method,
			user_agent: self.user_agent,
			request_timeout: self.request_timeout,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	///
	/// Deserialized descriptors skip the builder, so loaders call this explicitly.
	pub fn validate(&self) -> Result<(), ProviderDescriptorError> {
		validate_endpoint("profile", &self.endpoints.profile)?;
		validate_endpoint("token", &self.endpoints.token)?;

		if self.user_agent.is_empty() || self.user_agent.chars().any(char::is_control) {
			return Err(ProviderDescriptorError::InvalidUserAgent);
		}
		if self.request_timeout.is_zero() {
			return Err(ProviderDescriptorError::ZeroTimeout);
		}

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if url.scheme() != "https" {
		Err(ProviderDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}
