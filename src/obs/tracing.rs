// self
use crate::{
	_prelude::*,
	auth::ConnectionName,
	obs::FlowKind,
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by bridge flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("spotify_identity.flow", flow = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Runs `f` with the span entered so synchronous events carry its fields.
	pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Notes that a user has no identity for the connection, so the refresh was skipped.
pub fn identity_not_linked(connection: &ConnectionName) {
	#[cfg(feature = "tracing")]
	tracing::debug!(connection = %connection, "No linked identity; leaving context untouched.");

	#[cfg(not(feature = "tracing"))]
	let _ = connection;
}

/// Notes that a fresh access token was published as a claim.
pub fn claim_attached(connection: &ConnectionName, identity_user_id: &str, claim: &str) {
	#[cfg(feature = "tracing")]
	tracing::info!(
		connection = %connection,
		identity_user_id,
		claim,
		"Attached refreshed access token claim."
	);

	#[cfg(not(feature = "tracing"))]
	let _ = (connection, identity_user_id, claim);
}

/// Notes a failed flow; the error itself is still returned to the caller.
pub fn flow_failed(kind: FlowKind, err: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(flow = kind.as_str(), status = err.status(), error = %err, "Flow failed.");

	#[cfg(not(feature = "tracing"))]
	let _ = (kind, err);
}
