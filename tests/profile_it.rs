#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use spotify_identity::{
	_preludet::*,
	auth::{ConnectionName, TokenSecret},
	error::TransportError,
	oauth::Endpoint,
	provider::ProviderDescriptor,
};

const CLIENT_ID: &str = "client-profile";
const CLIENT_SECRET: &str = "secret-profile";
const USER_AGENT: &str = "profile-it";

fn https_url(server: &MockServer, path: &str) -> Url {
	let raw = server.url(path).replacen("http://", "https://", 1);

	Url::parse(&raw).expect("Mock endpoint should parse successfully.")
}

fn build_descriptor(server: &MockServer, timeout: StdDuration) -> ProviderDescriptor {
	ProviderDescriptor::builder(ConnectionName::spotify())
		.profile_endpoint(https_url(server, "/v1/me"))
		.token_endpoint(https_url(server, "/api/token"))
		.user_agent(USER_AGENT)
		.request_timeout(timeout)
		.build()
		.expect("Provider descriptor should build successfully.")
}

#[tokio::test]
async fn profile_is_fetched_and_normalized() {
	let server = MockServer::start_async().await;
	let bridge = build_reqwest_test_bridge(
		build_descriptor(&server, StdDuration::from_secs(10)),
		CLIENT_ID,
		CLIENT_SECRET,
	);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/me")
				.header("authorization", "Bearer access-1")
				.header("user-agent", USER_AGENT);
			then.status(200).header("content-type", "application/json").body(
				r#"{
					"id": "wizzler",
					"display_name": "JM Wizzler",
					"href": "https://api.spotify.com/v1/users/wizzler",
					"email": "email@example.com",
					"images": [
						{"url": "https://i.scdn.co/image/large", "height": 300, "width": 300},
						{"url": "https://i.scdn.co/image/small", "height": 64, "width": 64}
					],
					"product": "premium"
				}"#,
			);
		})
		.await;
	let profile = bridge
		.fetch_profile(&TokenSecret::new("access-1"))
		.await
		.expect("Profile fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(profile.user_id, "wizzler");
	assert_eq!(profile.nickname, "wizzler");
	assert_eq!(profile.name.as_deref(), Some("JM Wizzler"));
	assert_eq!(
		profile.app_metadata.spotify_link.as_deref(),
		Some("https://api.spotify.com/v1/users/wizzler")
	);
	assert_eq!(profile.email.as_deref(), Some("email@example.com"));
	assert_eq!(profile.email_verified, Some(false));
	assert_eq!(profile.picture_url(), Some("https://i.scdn.co/image/large"));
	assert_eq!(bridge.profile_metrics.successes(), 1);
}

#[tokio::test]
async fn not_found_surfaces_upstream_status() {
	let server = MockServer::start_async().await;
	let bridge = build_reqwest_test_bridge(
		build_descriptor(&server, StdDuration::from_secs(10)),
		CLIENT_ID,
		CLIENT_SECRET,
	);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me");
			then.status(404).body("not here");
		})
		.await;
	let err = bridge
		.fetch_profile(&TokenSecret::new("access-404"))
		.await
		.expect_err("A 404 should fail the profile fetch.");

	mock.assert_calls_async(1).await;

	assert!(matches!(err, Error::UpstreamStatus { endpoint: Endpoint::Profile, status: 404, .. }));
	assert!(err.to_string().contains("404"));
	assert_eq!(bridge.profile_metrics.failures(), 1);
	assert_eq!(bridge.profile_metrics.completed(), 1);
}

#[tokio::test]
async fn non_json_body_is_malformed() {
	let server = MockServer::start_async().await;
	let bridge = build_reqwest_test_bridge(
		build_descriptor(&server, StdDuration::from_secs(10)),
		CLIENT_ID,
		CLIENT_SECRET,
	);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me");
			then.status(200).body("<html>definitely not json</html>");
		})
		.await;
	let err = bridge
		.fetch_profile(&TokenSecret::new("access-html"))
		.await
		.expect_err("A non-JSON body should fail the profile fetch.");

	mock.assert_calls_async(1).await;

	assert!(matches!(err, Error::MalformedResponse { endpoint: Endpoint::Profile, .. }));
	assert!(!err.to_string().contains("html"));
	assert_eq!(bridge.profile_metrics.completed(), 1);
}

#[tokio::test]
async fn slow_provider_times_out() {
	let server = MockServer::start_async().await;
	let bridge = build_reqwest_test_bridge(
		build_descriptor(&server, StdDuration::from_millis(200)),
		CLIENT_ID,
		CLIENT_SECRET,
	);
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me");
			then.status(200).delay(StdDuration::from_secs(3)).body(r#"{"id":"late"}"#);
		})
		.await;
	let err = bridge
		.fetch_profile(&TokenSecret::new("access-slow"))
		.await
		.expect_err("A slow provider should hit the request timeout.");

	assert!(matches!(
		err,
		Error::Transport(TransportError::Timeout { endpoint: Endpoint::Profile, .. })
	));
	assert!(err.is_retryable());
	assert_eq!(bridge.profile_metrics.completed(), 1);
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_error() {
	let descriptor = ProviderDescriptor::builder(ConnectionName::spotify())
		.profile_endpoint(Url::parse("https://127.0.0.1:9/v1/me").expect("URL should parse."))
		.token_endpoint(Url::parse("https://127.0.0.1:9/api/token").expect("URL should parse."))
		.request_timeout(StdDuration::from_secs(2))
		.build()
		.expect("Provider descriptor should build successfully.");
	let bridge = build_reqwest_test_bridge(descriptor, CLIENT_ID, CLIENT_SECRET);
	let err = bridge
		.fetch_profile(&TokenSecret::new("access-offline"))
		.await
		.expect_err("Connection failures should fail the profile fetch.");

	assert!(matches!(err, Error::Transport(_)));
	assert!(StdError::source(&err).is_some(), "Transport errors should keep their cause.");
	assert_eq!(bridge.profile_metrics.failures(), 1);
}

#[tokio::test]
async fn redirects_are_not_followed() {
	let server = MockServer::start_async().await;
	let bridge = build_reqwest_test_bridge(
		build_descriptor(&server, StdDuration::from_secs(10)),
		CLIENT_ID,
		CLIENT_SECRET,
	);
	let target = https_url(&server, "/v1/moved");
	let redirect = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me");
			then.status(302).header("location", target.as_str());
		})
		.await;
	let moved = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/moved");
			then.status(200).body(r#"{"id":"moved"}"#);
		})
		.await;
	let err = bridge
		.fetch_profile(&TokenSecret::new("access-redirect"))
		.await
		.expect_err("A redirect should surface as a non-200 status.");

	redirect.assert_calls_async(1).await;
	moved.assert_calls_async(0).await;

	assert!(matches!(err, Error::UpstreamStatus { endpoint: Endpoint::Profile, status: 302, .. }));
}
