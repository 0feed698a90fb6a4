//! Observability hooks for the request engine.
//!
//! The engine never reaches for a global logger. It reports [`RequestEvent`]s to the
//! [`RequestObserver`] it was built with; [`TracingObserver`] is the default.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `discourse_client.request` with the `verb` and `path`
//!   fields, plus debug/warn events for attempts, responses, and rate limiting.
//! - Enable `metrics` to increment the `discourse_client_request_total` counter once per
//!   finished call, labeled by `verb` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, http::ApiRequest};

/// Final outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Decoded body (or empty success) returned to the caller.
	Success,
	/// 4xx other than 429.
	ClientError,
	/// 5xx or other non-ok status.
	ServerError,
	/// Every attempt was rate limited.
	RateLimited,
	/// Unexpected redirect, content type, body, or embedded `errors`.
	ProtocolError,
	/// Network failure.
	TransportError,
	/// Local configuration or request construction failure.
	ConfigError,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Success => "success",
			RequestOutcome::ClientError => "client_error",
			RequestOutcome::ServerError => "server_error",
			RequestOutcome::RateLimited => "rate_limited",
			RequestOutcome::ProtocolError => "protocol_error",
			RequestOutcome::TransportError => "transport_error",
			RequestOutcome::ConfigError => "config_error",
		}
	}

	/// Maps a call result onto its outcome label.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => RequestOutcome::Success,
			Err(Error::Client { .. }) => RequestOutcome::ClientError,
			Err(Error::Server { .. }) => RequestOutcome::ServerError,
			Err(Error::RateLimited { .. }) => RequestOutcome::RateLimited,
			Err(Error::Protocol(_) | Error::Sso(_)) => RequestOutcome::ProtocolError,
			Err(Error::Transport(_)) => RequestOutcome::TransportError,
			Err(Error::Config(_)) => RequestOutcome::ConfigError,
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Events reported by the engine while executing one call.
#[derive(Clone, Copy, Debug)]
pub enum RequestEvent<'a> {
	/// An HTTP attempt is about to be sent (1-based).
	Attempt {
		/// Request being executed.
		request: &'a ApiRequest,
		/// Attempt number.
		attempt: u32,
	},
	/// An HTTP status was received.
	Response {
		/// Request being executed.
		request: &'a ApiRequest,
		/// Attempt number.
		attempt: u32,
		/// HTTP status code.
		status: u16,
	},
	/// The attempt was rate limited.
	RateLimited {
		/// Request being executed.
		request: &'a ApiRequest,
		/// Attempt number.
		attempt: u32,
		/// Sleep before the next attempt; `None` when no attempt follows.
		delay: Option<Duration>,
	},
	/// The call finished.
	Finished {
		/// Request being executed.
		request: &'a ApiRequest,
		/// Final outcome.
		outcome: RequestOutcome,
	},
}
impl RequestEvent<'_> {
	/// Request the event belongs to.
	pub fn request(&self) -> &ApiRequest {
		match self {
			RequestEvent::Attempt { request, .. }
			| RequestEvent::Response { request, .. }
			| RequestEvent::RateLimited { request, .. }
			| RequestEvent::Finished { request, .. } => request,
		}
	}
}

/// Sink for [`RequestEvent`]s, injected into the client at construction.
pub trait RequestObserver
where
	Self: Send + Sync,
{
	/// Receives one event. Implementations must not block for long; the engine is synchronous.
	fn observe(&self, event: &RequestEvent<'_>);
}

/// Default observer: `tracing` events and `metrics` counters, both feature gated.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;
impl RequestObserver for TracingObserver {
	fn observe(&self, event: &RequestEvent<'_>) {
		match *event {
			RequestEvent::Attempt { request, attempt } =>
				trace_attempt(request.verb, &request.path, attempt),
			RequestEvent::Response { request, attempt, status } =>
				trace_response(request.verb, &request.path, attempt, status),
			RequestEvent::RateLimited { request, attempt, delay } =>
				trace_rate_limited(request.verb, &request.path, attempt, delay),
			RequestEvent::Finished { request, outcome } => {
				trace_finished(request.verb, &request.path, outcome);
				record_request_outcome(request.verb, outcome);
			},
		}
	}
}

/// Observer that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;
impl RequestObserver for NoopObserver {
	fn observe(&self, _: &RequestEvent<'_>) {}
}
