//! Refresh token exchange and claim publication.
//!
//! [`IdentityBridge::renew_access_token`] locates the user's identity for the descriptor's
//! connection, performs a `grant_type=refresh_token` call authenticated with the bridge's
//! client credentials, and writes the new access token into the context's ID token claims
//! under `<namespace><connection>/access_token`. A user without a linked identity is
//! returned untouched. Every transport, status, and decoding failure reaches the caller.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ConfigError,
	flows::IdentityBridge,
	http::ProviderHttpClient,
	identity::{AuthContext, Identity, UserRecord},
	oauth::{self, Endpoint, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Token endpoint payload for a refresh exchange.
#[derive(Clone, Debug, Deserialize)]
struct TokenGrant {
	access_token: TokenSecret,
	#[serde(default)]
	token_type: Option<String>,
	#[serde(default)]
	scope: Option<String>,
	#[serde(default)]
	expires_in: Option<u64>,
	#[serde(default)]
	refresh_token: Option<TokenSecret>,
}

/// Access token obtained from a refresh exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshedToken {
	/// Fresh access token.
	pub access_token: TokenSecret,
	/// Token type reported by the provider (usually `Bearer`).
	pub token_type: Option<String>,
	/// Space-delimited scopes granted to the token.
	pub scope: Option<String>,
	/// Moment the response was received.
	pub issued_at: OffsetDateTime,
	/// Expiry derived from `expires_in`, when the provider reported one.
	pub expires_at: Option<OffsetDateTime>,
	/// Replacement refresh token, when the provider rotated it.
	pub rotated_refresh_token: Option<TokenSecret>,
}
impl RefreshedToken {
	fn from_grant(grant: TokenGrant, issued_at: OffsetDateTime) -> Self {
		let expires_at = grant
			.expires_in
			.and_then(|secs| i64::try_from(secs).ok())
			.and_then(|secs| issued_at.checked_add(Duration::seconds(secs)));

		Self {
			access_token: grant.access_token,
			token_type: grant.token_type,
			scope: grant.scope,
			issued_at,
			expires_at,
			rotated_refresh_token: grant.refresh_token,
		}
	}
}

impl<C, M> IdentityBridge<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Renews the access token of the user's linked identity and publishes it as a claim.
	///
	/// Returns `user` unchanged and `context` with one claim added. When the user has no
	/// identity for the descriptor's connection, both are returned as received.
	pub async fn renew_access_token(
		&self,
		user: UserRecord,
		mut context: AuthContext,
	) -> Result<(UserRecord, AuthContext)> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "renew_access_token");

		self.refresh_metrics.record(KIND, FlowOutcome::Attempt);

		let connection = &self.descriptor.connection;
		let Some(identity) = user.identity(connection) else {
			span.in_scope(|| obs::identity_not_linked(connection));
			self.refresh_metrics.record(KIND, FlowOutcome::Skipped);

			return Ok((user, context));
		};
		let result = span.instrument(self.request_refresh(identity)).await;

		match result {
			Ok(token) => {
				let claim = self.claim_namespace.access_token_claim(connection);

				span.in_scope(|| obs::claim_attached(connection, &identity.user_id, &claim));
				context.set_claim(claim, token.access_token.into_inner());
				self.refresh_metrics.record(KIND, FlowOutcome::Success);

				Ok((user, context))
			},
			Err(err) => {
				span.in_scope(|| obs::flow_failed(KIND, &err));
				self.refresh_metrics.record(KIND, FlowOutcome::Failure);

				Err(err)
			},
		}
	}

	/// Exchanges the identity's refresh token for a new access token.
	///
	/// The identity must belong to the descriptor's connection; another provider's refresh
	/// token is rejected before any request is sent.
	pub async fn exchange_refresh_token(&self, identity: &Identity) -> Result<RefreshedToken> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "exchange_refresh_token");

		self.refresh_metrics.record(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.request_refresh(identity)).await;

		match &result {
			Ok(_) => self.refresh_metrics.record(KIND, FlowOutcome::Success),
			Err(err) => {
				span.in_scope(|| obs::flow_failed(KIND, err));
				self.refresh_metrics.record(KIND, FlowOutcome::Failure);
			},
		}

		result
	}

	async fn request_refresh(&self, identity: &Identity) -> Result<RefreshedToken> {
		if identity.connection != self.descriptor.connection {
			return Err(ConfigError::ConnectionMismatch {
				expected: self.descriptor.connection.to_string(),
				found: identity.connection.to_string(),
			}
			.into());
		}

		let refresh_token = identity
			.refresh_token
			.as_ref()
			.filter(|secret| !secret.is_empty())
			.ok_or_else(|| ConfigError::MissingRefreshToken {
				connection: identity.connection.to_string(),
			})?;
		let request = oauth::refresh_request(&self.descriptor, &self.credentials, refresh_token)?;
		let response = self.send(Endpoint::Token, request).await?;
		let issued_at = OffsetDateTime::now_utc();
		let grant: TokenGrant = oauth::decode_response(Endpoint::Token, &response)?;

		Ok(RefreshedToken::from_grant(grant, issued_at))
	}
}
