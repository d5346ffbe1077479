//! Spotify identity bridge: normalize `/v1/me` profiles into identity records and renew
//! refresh-token backed access tokens as namespaced claims on an authentication context.

#![deny(clippy::all, missing_docs)]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod identity;
pub mod oauth;
pub mod obs;
pub mod provider;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::ClientCredentials,
		flows::IdentityBridge,
		http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
		provider::ProviderDescriptor,
	};

	/// Bridge type alias used by reqwest-backed integration tests.
	pub type ReqwestTestBridge = IdentityBridge<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs an [`IdentityBridge`] backed by the insecure reqwest transport used across
	/// integration tests.
	pub fn build_reqwest_test_bridge(
		descriptor: ProviderDescriptor,
		client_id: &str,
		client_secret: &str,
	) -> ReqwestTestBridge {
		IdentityBridge::with_http_client(
			descriptor,
			ClientCredentials::new(client_id, client_secret),
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	#[cfg(any(test, feature = "reqwest"))]
	pub use std::pin::Pin;

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value as JsonValue;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
