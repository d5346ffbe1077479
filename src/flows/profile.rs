//! Current-user profile fetch and normalization.
//!
//! [`IdentityBridge::fetch_profile`] sends one bearer-authenticated `GET` to the
//! descriptor's profile endpoint, bounded by the descriptor timeout, and maps the
//! payload into a [`NormalizedProfile`]. Transport failures, non-200 statuses, and
//! undecodable bodies all surface as errors; nothing is retried.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	flows::IdentityBridge,
	http::ProviderHttpClient,
	identity::{NormalizedProfile, RawProfile},
	oauth::{self, Endpoint, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C, M> IdentityBridge<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the profile owned by `access_token` and normalizes it.
	pub async fn fetch_profile(&self, access_token: &TokenSecret) -> Result<NormalizedProfile> {
		const KIND: FlowKind = FlowKind::Profile;

		let span = FlowSpan::new(KIND, "fetch_profile");

		self.profile_metrics.record(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = oauth::profile_request(&self.descriptor, access_token)?;
				let response = self.send(Endpoint::Profile, request).await?;
				let raw: RawProfile = oauth::decode_response(Endpoint::Profile, &response)?;

				Ok(NormalizedProfile::from(raw))
			})
			.await;

		match &result {
			Ok(_) => self.profile_metrics.record(KIND, FlowOutcome::Success),
			Err(err) => {
				span.in_scope(|| obs::flow_failed(KIND, err));
				self.profile_metrics.record(KIND, FlowOutcome::Failure);
			},
		}

		result
	}
}
