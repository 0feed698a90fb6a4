//! The request engine: one logical API call in, decoded JSON or a typed error out.
//!
//! Every call is sent with the identity's auth headers, classified with [`classify`], and
//! retried only when the server answers HTTP 429. Between rate-limited attempts the calling
//! thread sleeps for the server's `extras.wait_seconds` plus the policy's backoff; the final
//! attempt never sleeps. Everything else fails on first occurrence.

mod classify;
mod retry;

pub use classify::*;
pub use retry::*;

// std
use std::thread;
// self
use crate::{
	_prelude::*,
	auth::ClientIdentity,
	http::{ApiRequest, ReqwestHttpClient},
	obs::{RequestEvent, RequestObserver, RequestOutcome, RequestSpan},
};

/// Executes [`ApiRequest`]s for one identity.
#[derive(Clone)]
pub struct RequestEngine {
	identity: ClientIdentity,
	http: ReqwestHttpClient,
	retry: RetryPolicy,
	observer: Arc<dyn RequestObserver>,
}
impl RequestEngine {
	/// Assembles an engine from its collaborators.
	pub fn new(
		identity: ClientIdentity,
		http: ReqwestHttpClient,
		retry: RetryPolicy,
		observer: Arc<dyn RequestObserver>,
	) -> Self {
		Self { identity, http, retry, observer }
	}

	/// Identity the engine authenticates as.
	pub fn identity(&self) -> &ClientIdentity {
		&self.identity
	}

	/// Retry policy applied to rate-limited calls.
	pub fn retry_policy(&self) -> RetryPolicy {
		self.retry
	}

	/// Executes one call, retrying on HTTP 429 up to [`MAX_ATTEMPTS`] attempts.
	///
	/// Returns the decoded JSON body, or `None` when a successful response carried an empty
	/// non-JSON body.
	pub fn execute(&self, request: &ApiRequest) -> Result<Option<JsonValue>> {
		let _span = RequestSpan::new(request.verb, &request.path).entered();
		let result = self.run(request);

		self.observer
			.observe(&RequestEvent::Finished { request, outcome: RequestOutcome::of(&result) });

		result
	}

	fn run(&self, request: &ApiRequest) -> Result<Option<JsonValue>> {
		let mut last_wait = Duration::ZERO;

		for attempt in 1..=MAX_ATTEMPTS {
			self.observer.observe(&RequestEvent::Attempt { request, attempt });

			let response = self.http.send(&self.identity, request)?;

			self.observer.observe(&RequestEvent::Response {
				request,
				attempt,
				status: response.status,
			});

			match classify(&response) {
				ResponseOutcome::RateLimited { wait_hint } => {
					let delay = self.retry.next_delay(attempt, wait_hint);

					last_wait = wait_hint.unwrap_or(self.retry.fallback_wait);

					self.observer.observe(&RequestEvent::RateLimited { request, attempt, delay });

					if let Some(delay) = delay {
						thread::sleep(delay);
					}
				},
				outcome => return outcome.into_result(),
			}
		}

		Err(Error::RateLimited { attempts: MAX_ATTEMPTS, last_wait })
	}
}
impl Debug for RequestEngine {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestEngine")
			.field("identity", &self.identity)
			.field("retry", &self.retry)
			.finish()
	}
}
