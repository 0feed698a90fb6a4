//! Response classification: turns one [`RawResponse`] into exactly one [`ResponseOutcome`].

// self
use crate::{
	_prelude::*,
	error::ProtocolError,
	http::{JSON_CONTENT_TYPE, RawResponse},
};

/// Classified result of one HTTP attempt.
#[derive(Debug)]
pub enum ResponseOutcome {
	/// Decoded JSON body, or `None` for an empty non-JSON success body.
	Success(Option<JsonValue>),
	/// 4xx other than 429.
	ClientError {
		/// Derived message.
		message: String,
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// 5xx or any other non-ok status.
	ServerError {
		/// Derived message.
		message: String,
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// HTTP 429.
	RateLimited {
		/// `extras.wait_seconds` from the body, when present and usable.
		wait_hint: Option<Duration>,
	},
	/// Redirect, content type, decoding, or embedded `errors` failure.
	Protocol(ProtocolError),
}
impl ResponseOutcome {
	/// Converts a terminal outcome into the caller-facing result.
	///
	/// [`ResponseOutcome::RateLimited`] is not terminal; the engine retries it and only maps
	/// exhaustion into [`Error::RateLimited`].
	pub(crate) fn into_result(self) -> Result<Option<JsonValue>> {
		match self {
			ResponseOutcome::Success(value) => Ok(value),
			ResponseOutcome::ClientError { message, status, body } =>
				Err(Error::Client { message, status, body }),
			ResponseOutcome::ServerError { message, status, body } =>
				Err(Error::Server { message, status, body }),
			ResponseOutcome::RateLimited { wait_hint } => Err(Error::RateLimited {
				attempts: 1,
				last_wait: wait_hint.unwrap_or_default(),
			}),
			ResponseOutcome::Protocol(err) => Err(err.into()),
		}
	}
}

#[derive(Deserialize)]
struct RateLimitBody {
	extras: RateLimitExtras,
}
#[derive(Deserialize)]
struct RateLimitExtras {
	wait_seconds: f64,
}

/// Classifies one response.
///
/// Order matters: the non-ok branch (429, then 4xx, then everything else) runs first, then
/// the 302 check, then the content type check, then JSON decoding and the `errors` field.
pub fn classify(response: &RawResponse) -> ResponseOutcome {
	if !response.is_ok() {
		if response.status == 429 {
			return ResponseOutcome::RateLimited { wait_hint: wait_hint(&response.body) };
		}

		let message = error_message(response);
		let status = response.status;
		let body = response.text();

		return if (400..500).contains(&status) {
			ResponseOutcome::ClientError { message, status, body }
		} else {
			ResponseOutcome::ServerError { message, status, body }
		};
	}
	// Only reachable because redirects are not followed and 3xx counts as ok.
	if response.status == 302 {
		return ResponseOutcome::Protocol(ProtocolError::UnexpectedRedirect);
	}

	let actual = response.content_type.as_deref().unwrap_or_default();

	if actual != JSON_CONTENT_TYPE {
		if response.is_blank() {
			return ResponseOutcome::Success(None);
		}

		return ResponseOutcome::Protocol(ProtocolError::UnexpectedContentType {
			expected: JSON_CONTENT_TYPE,
			actual: actual.to_owned(),
		});
	}

	let decoded: JsonValue = match serde_json::from_slice(&response.body) {
		Ok(value) => value,
		Err(source) => return ResponseOutcome::Protocol(ProtocolError::Decode { source }),
	};

	if let Some(errors) = decoded.get("errors") {
		let message = decoded
			.get("message")
			.and_then(JsonValue::as_str)
			.filter(|message| !message.is_empty())
			.map(str::to_owned)
			.unwrap_or_else(|| render_errors(errors));

		return ResponseOutcome::Protocol(ProtocolError::Api { message });
	}

	ResponseOutcome::Success(Some(decoded))
}

/// Builds the message for a non-ok response.
///
/// Prefers the comma-joined `errors` array from a JSON body, then the status reason phrase,
/// then `"{status}: {body}"`.
pub fn error_message(response: &RawResponse) -> String {
	if let Some(joined) = joined_errors(&response.body) {
		return joined;
	}
	if let Some(reason) = response.reason() {
		return reason.to_owned();
	}

	format!("{}: {}", response.status, response.text())
}

fn joined_errors(body: &[u8]) -> Option<String> {
	let value: JsonValue = serde_json::from_slice(body).ok()?;
	let errors = value.get("errors")?.as_array()?;
	let parts = errors.iter().map(JsonValue::as_str).collect::<Option<Vec<_>>>()?;

	Some(parts.join(","))
}

fn render_errors(errors: &JsonValue) -> String {
	match errors {
		JsonValue::Array(items) => items
			.iter()
			.map(|item| match item {
				JsonValue::String(s) => s.clone(),
				other => other.to_string(),
			})
			.collect::<Vec<_>>()
			.join(","),
		JsonValue::String(s) => s.clone(),
		other => other.to_string(),
	}
}

fn wait_hint(body: &[u8]) -> Option<Duration> {
	let parsed: RateLimitBody = serde_json::from_slice(body).ok()?;
	let seconds = parsed.extras.wait_seconds;

	if !seconds.is_finite() {
		return None;
	}

	Duration::try_from_secs_f64(seconds.max(0.)).ok()
}
