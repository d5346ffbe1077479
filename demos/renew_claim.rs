//! Demonstrates renewing a linked Spotify identity's access token and reading the namespaced
//! claim back from the authentication context.
//!
//! A local mock stands in for the Spotify accounts service so the demo runs offline.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use spotify_identity::{
	auth::{ClientCredentials, ConnectionName},
	flows::IdentityBridge,
	http::ReqwestHttpClient,
	identity::{AuthContext, Identity, UserRecord},
	oauth::ReqwestTransportErrorMapper,
	provider::ProviderDescriptor,
	reqwest::Client,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let https = |path: &str| Url::parse(&server.url(path).replacen("http://", "https://", 1));
	let descriptor = ProviderDescriptor::builder(ConnectionName::spotify())
		.profile_endpoint(https("/v1/me")?)
		.token_endpoint(https("/api/token")?)
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let bridge = <IdentityBridge<ReqwestHttpClient, ReqwestTransportErrorMapper>>::with_http_client(
		descriptor,
		ClientCredentials::new("demo-client", "demo-secret"),
		http_client,
		ReqwestTransportErrorMapper,
	);
	let mut user = UserRecord::default();

	user.identities
		.insert(Identity::new(ConnectionName::spotify(), "wizzler").with_refresh_token("demo-refresh"));

	let claim = bridge.claim_namespace.access_token_claim(&bridge.descriptor.connection);
	let (_, context) = bridge.renew_access_token(user, AuthContext::default()).await?;

	println!("{claim} = {}.", context.claim(&claim).cloned().unwrap_or_default());

	token_mock.assert_async().await;

	Ok(())
}
