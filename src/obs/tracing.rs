// self
use crate::{_prelude::*, http::Verb, obs::RequestOutcome};

/// A span wrapping every attempt of one API call.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the verb and path.
	pub fn new(verb: Verb, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("discourse_client.request", verb = verb.as_str(), path);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (verb, path);

			Self {}
		}
	}

	/// Enters the span for the duration of the call.
	pub fn entered(self) -> RequestSpanGuard {
		#[cfg(feature = "tracing")]
		{
			RequestSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			RequestSpanGuard {}
		}
	}
}

/// RAII guard returned by [`RequestSpan::entered`].
pub struct RequestSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for RequestSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RequestSpanGuard(..)")
	}
}

pub(super) fn trace_attempt(verb: Verb, path: &str, attempt: u32) {
	#[cfg(feature = "tracing")]
	tracing::debug!(verb = verb.as_str(), path, attempt, "Sending request.");
	#[cfg(not(feature = "tracing"))]
	let _ = (verb, path, attempt);
}

pub(super) fn trace_response(verb: Verb, path: &str, attempt: u32, status: u16) {
	#[cfg(feature = "tracing")]
	tracing::debug!(verb = verb.as_str(), path, attempt, status, "Received response.");
	#[cfg(not(feature = "tracing"))]
	let _ = (verb, path, attempt, status);
}

pub(super) fn trace_rate_limited(verb: Verb, path: &str, attempt: u32, delay: Option<Duration>) {
	#[cfg(feature = "tracing")]
	{
		match delay {
			Some(delay) => tracing::warn!(
				verb = verb.as_str(),
				path,
				attempt,
				delay_ms = delay.as_millis() as u64,
				"Rate limited; retrying after delay."
			),
			None => tracing::warn!(
				verb = verb.as_str(),
				path,
				attempt,
				"Rate limited on the final attempt."
			),
		}
	}
	#[cfg(not(feature = "tracing"))]
	let _ = (verb, path, attempt, delay);
}

pub(super) fn trace_finished(verb: Verb, path: &str, outcome: RequestOutcome) {
	#[cfg(feature = "tracing")]
	tracing::debug!(verb = verb.as_str(), path, outcome = outcome.as_str(), "Request finished.");
	#[cfg(not(feature = "tracing"))]
	let _ = (verb, path, outcome);
}
