//! Request construction and response interpretation for provider endpoints.

pub use oauth2;

// crates.io
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{
		HeaderMap, HeaderValue, Method, Request, StatusCode,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER, USER_AGENT},
	},
};
use serde::de::DeserializeOwned;
use time::format_description::well_known::Rfc2822;
use url::form_urlencoded::Serializer as FormSerializer;
// self
#[cfg(feature = "reqwest")] use crate::error::TransportError;
use crate::{
	_prelude::*,
	auth::{ClientCredentials, TokenSecret},
	error::ConfigError,
	provider::{ClientAuthMethod, ProviderDescriptor},
};

/// Provider endpoints called by the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Current-user profile endpoint.
	Profile,
	/// Token endpoint.
	Token,
}
impl Endpoint {
	/// Returns a stable label suitable for messages and span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Endpoint::Profile => "profile",
			Endpoint::Token => "token",
		}
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Maps HTTP transport failures into bridge [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a bridge error.
	fn map_transport_error(&self, endpoint: Endpoint, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, endpoint: Endpoint, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(endpoint, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) =>
				TransportError::network(endpoint, std::io::Error::other(message)).into(),
			other => TransportError::network(endpoint, other).into(),
		}
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(endpoint: Endpoint, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::timeout(endpoint, err).into();
	}

	TransportError::network(endpoint, err).into()
}

/// Builds the `GET` request for the current-user profile.
pub(crate) fn profile_request(
	descriptor: &ProviderDescriptor,
	access_token: &TokenSecret,
) -> Result<HttpRequest> {
	let request = Request::builder()
		.method(Method::GET)
		.uri(descriptor.endpoints.profile.as_str())
		.header(AUTHORIZATION, bearer(access_token)?)
		.header(USER_AGENT, &descriptor.user_agent)
		.header(ACCEPT, "application/json")
		.body(Vec::new())
		.map_err(ConfigError::from)?;

	Ok(request)
}

/// Builds the `grant_type=refresh_token` `POST` for the token endpoint.
pub(crate) fn refresh_request(
	descriptor: &ProviderDescriptor,
	credentials: &ClientCredentials,
	refresh_token: &TokenSecret,
) -> Result<HttpRequest> {
	let mut form = FormSerializer::new(String::new());

	form.append_pair("grant_type", "refresh_token");
	form.append_pair("refresh_token", refresh_token.expose());

	let mut builder = Request::builder()
		.method(Method::POST)
		.uri(descriptor.endpoints.token.as_str())
		.header(USER_AGENT, &descriptor.user_agent)
		.header(ACCEPT, "application/json")
		.header(CONTENT_TYPE, "application/x-www-form-urlencoded");

	match descriptor.client_auth_method {
		ClientAuthMethod::ClientSecretBasic => {
			builder = builder.header(AUTHORIZATION, sensitive(credentials.basic_authorization())?);
		},
		ClientAuthMethod::ClientSecretPost => {
			form.append_pair("client_id", &credentials.client_id);
			form.append_pair("client_secret", credentials.client_secret.expose());
		},
	}

	let request = builder.body(form.finish().into_bytes()).map_err(ConfigError::from)?;

	Ok(request)
}

/// Decodes a `200 OK` JSON body, mapping every other outcome into the bridge taxonomy.
pub(crate) fn decode_response<T>(endpoint: Endpoint, response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status();

	if status != StatusCode::OK {
		return Err(Error::UpstreamStatus {
			endpoint,
			status: status.as_u16(),
			reason: provider_reason(response.body()),
			retry_after: parse_retry_after(response.headers()),
		});
	}

	let deserializer = &mut serde_json::Deserializer::from_slice(response.body());

	serde_path_to_error::deserialize(deserializer).map_err(|err| Error::MalformedResponse {
		endpoint,
		status: status.as_u16(),
		path: err.path().to_string(),
	})
}

fn bearer(token: &TokenSecret) -> Result<HeaderValue> {
	sensitive(format!("Bearer {}", token.expose()))
}

fn sensitive(value: String) -> Result<HeaderValue> {
	let mut header = HeaderValue::try_from(value)
		.map_err(|e| ConfigError::from(oauth2::http::Error::from(e)))?;

	header.set_sensitive(true);

	Ok(header)
}

/// Error payloads providers send alongside non-200 statuses.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProviderErrorBody {
	/// RFC 6749 §5.2 style: `{"error":"invalid_grant","error_description":"..."}`.
	OAuth { error: String, error_description: Option<String> },
	/// Web API style: `{"error":{"status":401,"message":"..."}}`.
	Api { error: ApiErrorDetail },
}

#[derive(Deserialize)]
struct ApiErrorDetail {
	message: Option<String>,
}

fn provider_reason(body: &[u8]) -> Option<String> {
	match serde_json::from_slice::<ProviderErrorBody>(body).ok()? {
		ProviderErrorBody::OAuth { error, error_description } =>
			Some(error_description.unwrap_or(error)),
		ProviderErrorBody::Api { error } => error.message,
	}
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(i64::from(secs)));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
