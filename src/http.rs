//! Transport primitives for provider calls.
//!
//! The module exposes [`ProviderHttpClient`] so downstream crates can plug in their own
//! HTTP stack. The bridge asks the client for a short-lived [`AsyncHttpClient`] handle
//! bound to a request timeout, sends one request through it, and interprets the returned
//! status, headers, and body itself.

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError};
#[cfg(feature = "reqwest")] use oauth2::{HttpRequest, HttpResponse};
// self
use crate::_prelude::*;

/// Abstraction over HTTP transports capable of executing provider requests.
///
/// The trait is the bridge's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so they can be shared across bridge clones, and the handles
/// they return must own whatever state is required so their request futures remain
/// `Send` for the lifetime of the in-flight operation.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle bound to a single timeout.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle whose requests fail once `timeout` elapses.
	///
	/// Implementations must surface an elapsed timeout as an error rather than waiting
	/// indefinitely; redirects must not be followed.
	fn with_timeout(&self, timeout: StdDuration) -> Self::Handle;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Provider endpoints answer directly, so a custom [`ReqwestClient`] should be built with
/// redirect following disabled.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client that refuses redirects.
	pub fn new() -> Result<Self> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(crate::error::ConfigError::from)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}

/// Handle returned by [`ReqwestHttpClient`] that applies a per-request timeout.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct TimedHandle {
	client: ReqwestClient,
	timeout: StdDuration,
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for TimedHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.client.clone();
		let timeout = self.timeout;

		Box::pin(async move {
			let mut request: reqwest::Request = request.try_into().map_err(Box::new)?;

			*request.timeout_mut() = Some(timeout);

			let response = client.execute(request).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	type Handle = TimedHandle;
	type TransportError = ReqwestError;

	fn with_timeout(&self, timeout: StdDuration) -> Self::Handle {
		TimedHandle { client: self.0.clone(), timeout }
	}
}
