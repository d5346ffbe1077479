//! Profile and refresh flows powered by the bridge.

pub mod profile;
pub mod refresh;

pub use refresh::*;

// crates.io
use oauth2::{AsyncHttpClient, HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	auth::ClientCredentials,
	http::ProviderHttpClient,
	identity::ClaimNamespace,
	oauth::{Endpoint, TransportErrorMapper},
	obs::FlowMetrics,
	provider::ProviderDescriptor,
};
#[cfg(feature = "reqwest")]
use crate::{config::BridgeConfig, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Bridge specialized for the crate's default reqwest transport stack.
pub type ReqwestBridge = IdentityBridge<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Runs the profile and refresh flows against a single provider descriptor.
///
/// The bridge owns the HTTP client, error mapper, descriptor, and client credentials so
/// each flow only deals with its own request and response shape. Every call issues at
/// most one request and resolves to a single [`Result`].
#[derive(Clone)]
pub struct IdentityBridge<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Provider descriptor that defines endpoints and request settings.
	pub descriptor: ProviderDescriptor,
	/// Credentials used to authenticate against the token endpoint.
	pub credentials: ClientCredentials,
	/// Namespace prefixed to published claims.
	pub claim_namespace: ClaimNamespace,
	/// Outcome counters for the profile flow.
	pub profile_metrics: Arc<FlowMetrics>,
	/// Outcome counters for the refresh flow.
	pub refresh_metrics: Arc<FlowMetrics>,
}
impl<C, M> IdentityBridge<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a bridge that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		credentials: ClientCredentials,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			descriptor,
			credentials,
			claim_namespace: ClaimNamespace::default(),
			profile_metrics: Default::default(),
			refresh_metrics: Default::default(),
		}
	}

	/// Replaces the namespace used for published claims.
	pub fn with_claim_namespace(mut self, namespace: ClaimNamespace) -> Self {
		self.claim_namespace = namespace;

		self
	}

	/// Sends one request with the descriptor timeout, mapping transport failures.
	pub(crate) async fn send(&self, endpoint: Endpoint, request: HttpRequest) -> Result<HttpResponse> {
		let handle = self.http_client.with_timeout(self.descriptor.request_timeout);

		handle
			.call(request)
			.await
			.map_err(|err| self.transport_mapper.map_transport_error(endpoint, err))
	}
}
#[cfg(feature = "reqwest")]
impl IdentityBridge<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a bridge with its own reqwest-backed transport.
	pub fn new(descriptor: ProviderDescriptor, credentials: ClientCredentials) -> Result<Self> {
		Ok(Self::with_http_client(
			descriptor,
			credentials,
			ReqwestHttpClient::new()?,
			Arc::new(ReqwestTransportErrorMapper),
		))
	}

	/// Creates a bridge from a loaded [`BridgeConfig`].
	pub fn from_config(config: BridgeConfig) -> Result<Self> {
		let BridgeConfig { descriptor, credentials, claim_namespace } = config;

		Ok(Self::new(descriptor, credentials)?.with_claim_namespace(claim_namespace))
	}
}
impl<C, M> Debug for IdentityBridge<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("IdentityBridge")
			.field("descriptor", &self.descriptor)
			.field("client_id", &self.credentials.client_id)
			.field("claim_namespace", &self.claim_namespace)
			.finish()
	}
}
