// self
use crate::{http::Verb, obs::RequestOutcome};

/// Records a finished call via the global metrics recorder (when enabled).
pub fn record_request_outcome(verb: Verb, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"discourse_client_request_total",
			"verb" => verb.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (verb, outcome);
	}
}
