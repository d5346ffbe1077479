//! Bridge-level error types shared across flows, transports, and configuration.

// self
use crate::{_prelude::*, oauth::Endpoint};

/// Bridge-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical bridge error exposed by public APIs.
///
/// Every terminal failure of a flow is reported through exactly one of these variants;
/// nothing is logged and dropped.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Provider answered with a status other than `200 OK`.
	#[error("The {endpoint} endpoint responded with HTTP status {status}.")]
	UpstreamStatus {
		/// Endpoint that produced the response.
		endpoint: Endpoint,
		/// HTTP status code received.
		status: u16,
		/// Structured provider reason (`error_description`, `error.message`), if any.
		reason: Option<String>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Provider body could not be decoded into the expected shape.
	///
	/// The message names the endpoint and JSON path only; the payload is never echoed.
	#[error("The {endpoint} endpoint returned a malformed response body.")]
	MalformedResponse {
		/// Endpoint that produced the response.
		endpoint: Endpoint,
		/// HTTP status code of the response.
		status: u16,
		/// JSON path at which decoding stopped (`.` for the document root).
		path: String,
	},
}
impl Error {
	/// Returns the HTTP status associated with the failure, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::UpstreamStatus { status, .. } | Self::MalformedResponse { status, .. } =>
				Some(*status),
			_ => None,
		}
	}

	/// Hints whether a caller-side retry could succeed.
	///
	/// The bridge never retries on its own.
	pub fn is_retryable(&self) -> bool {
		match self {
			Self::Transport(_) => true,
			Self::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
			_ => false,
		}
	}
}

/// Configuration and validation failures raised by the bridge.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Configuration document could not be parsed.
	#[error("Bridge configuration is invalid at `{path}`.")]
	InvalidConfig {
		/// JSON path of the offending field.
		path: String,
		/// Underlying decoding failure.
		#[source]
		source: serde_json::Error,
	},
	/// Provider descriptor failed validation.
	#[error(transparent)]
	InvalidDescriptor(#[from] crate::provider::ProviderDescriptorError),

	/// Identity belongs to a different connection than the bridge's descriptor.
	#[error("The `{found}` identity cannot be refreshed through the `{expected}` connection.")]
	ConnectionMismatch {
		/// Connection served by the descriptor.
		expected: String,
		/// Connection the identity belongs to.
		found: String,
	},
	/// Linked identity carries no refresh token.
	#[error("The `{connection}` identity is missing a refresh token.")]
	MissingRefreshToken {
		/// Connection the identity belongs to.
		connection: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, timeout).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Network {
		/// Endpoint being called.
		endpoint: Endpoint,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request did not complete within the configured timeout.
	#[error("Request to the {endpoint} endpoint timed out.")]
	Timeout {
		/// Endpoint being called.
		endpoint: Endpoint,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling a provider endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(endpoint: Endpoint, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(endpoint: Endpoint, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { endpoint, source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn upstream_status_message_names_the_code() {
		let err = Error::UpstreamStatus {
			endpoint: Endpoint::Profile,
			status: 404,
			reason: None,
			retry_after: None,
		};

		assert!(err.to_string().contains("404"));
		assert_eq!(err.status(), Some(404));
		assert!(!err.is_retryable());
	}

	#[test]
	fn malformed_response_message_hides_payload() {
		let err = Error::MalformedResponse {
			endpoint: Endpoint::Token,
			status: 200,
			path: "access_token".into(),
		};

		assert_eq!(err.to_string(), "The token endpoint returned a malformed response body.");
	}

	#[test]
	fn retry_hints_follow_status_class() {
		let throttled = Error::UpstreamStatus {
			endpoint: Endpoint::Token,
			status: 429,
			reason: None,
			retry_after: Some(Duration::seconds(3)),
		};
		let outage = Error::UpstreamStatus {
			endpoint: Endpoint::Profile,
			status: 503,
			reason: None,
			retry_after: None,
		};

		assert!(throttled.is_retryable());
		assert!(outage.is_retryable());
	}
}
