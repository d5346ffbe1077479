// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::obs::{FlowKind, FlowOutcome};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"spotify_identity_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Thread-safe per-flow counters kept on every bridge, independent of the `metrics` feature.
#[derive(Debug, Default)]
pub struct FlowMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
	skipped: AtomicU64,
}
impl FlowMetrics {
	/// Returns the total number of attempts.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of calls that completed after contacting the provider.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of failed calls.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Returns the number of calls that completed without contacting the provider.
	pub fn skipped(&self) -> u64 {
		self.skipped.load(Ordering::Relaxed)
	}

	/// Returns the number of calls that reached a terminal outcome.
	pub fn completed(&self) -> u64 {
		self.successes() + self.failures() + self.skipped()
	}

	pub(crate) fn record(&self, kind: FlowKind, outcome: FlowOutcome) {
		let counter = match outcome {
			FlowOutcome::Attempt => &self.attempts,
			FlowOutcome::Success => &self.success,
			FlowOutcome::Failure => &self.failure,
			FlowOutcome::Skipped => &self.skipped,
		};

		counter.fetch_add(1, Ordering::Relaxed);
		record_flow_outcome(kind, outcome);
	}
}
