//! Client-level error types shared by the request engine, endpoint dispatch, and SSO codec.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response did not follow the API's wire contract.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
	/// SSO payload could not be validated or built.
	#[error(transparent)]
	Sso(#[from] SsoError),

	/// The request was rejected as invalid (4xx other than 429).
	#[error("{message}")]
	Client {
		/// Server-supplied or derived message.
		message: String,
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// The server failed while processing the request (5xx or other non-ok status).
	#[error("{message}")]
	Server {
		/// Server-supplied or derived message.
		message: String,
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Every allowed attempt was answered with HTTP 429.
	#[error("Request was still rate limited after {attempts} attempts.")]
	RateLimited {
		/// Number of attempts made.
		attempts: u32,
		/// Wait hint carried by the final 429 response.
		last_wait: Duration,
	},
}
impl Error {
	/// Returns the HTTP status tied to the error, when one is known.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
			Self::RateLimited { .. } => Some(429),
			Self::Protocol(ProtocolError::UnexpectedRedirect) => Some(302),
			_ => None,
		}
	}
}

/// Configuration and request construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Host URL cannot be parsed.
	#[error("Host URL `{host}` is invalid.")]
	InvalidHost {
		/// Host string that failed to parse.
		host: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Host URL must carry an HTTP scheme.
	#[error("Host URL must use http or https: {host}.")]
	UnsupportedScheme {
		/// Host string that failed validation.
		host: String,
	},
	/// A credential was left empty.
	#[error("The {field} must not be empty.")]
	MissingCredential {
		/// Which credential failed validation.
		field: &'static str,
	},
	/// Request URL assembled from host and path cannot be parsed.
	#[error("Request URL `{url}` is invalid.")]
	InvalidRequestUrl {
		/// URL that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint path template references an argument the caller did not supply.
	#[error("Endpoint `{endpoint}` requires the `{argument}` path argument.")]
	MissingPathArgument {
		/// Endpoint name.
		endpoint: &'static str,
		/// Placeholder that was left unresolved.
		argument: String,
	},
	/// No catalogued endpoint carries the requested name.
	#[error("Unknown endpoint `{name}`.")]
	UnknownEndpoint {
		/// Requested name.
		name: String,
	},
	/// Request body could not be assembled.
	#[error("Request body could not be built.")]
	RequestBuild {
		/// Underlying body construction failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Wraps a body construction failure inside [`ConfigError`].
	pub fn request_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::RequestBuild { source: Box::new(src) }
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Discourse API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Responses that violate the API's wire contract.
#[derive(Debug, ThisError)]
pub enum ProtocolError {
	/// The server answered with HTTP 302 while redirects were disabled.
	#[error("Unexpected Redirect, invalid api key or host?")]
	UnexpectedRedirect,
	/// A successful response carried a non-empty body with the wrong content type.
	#[error("Invalid Response, expecting \"{expected}\" got \"{actual}\"")]
	UnexpectedContentType {
		/// Content type the client requires.
		expected: &'static str,
		/// Content type the server declared (empty when absent).
		actual: String,
	},
	/// The response body is not valid JSON.
	#[error("failed to decode response")]
	Decode {
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
	/// A successful response embedded an `errors` field.
	#[error("{message}")]
	Api {
		/// The body's `message`, or the joined `errors`.
		message: String,
	},
	/// The response lacks the field an endpoint extracts.
	#[error("Response is missing `{pointer}`.")]
	MissingField {
		/// JSON pointer that did not resolve.
		pointer: String,
	},
	/// The response does not match the expected typed shape.
	#[error("Response has an unexpected shape.")]
	Shape {
		/// Structured decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// SSO payload validation and signing failures.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SsoError {
	/// Payload or signature was not supplied.
	#[error("No SSO payload or signature.")]
	MissingPayload,
	/// Shared secret is empty.
	#[error("Invalid secret.")]
	InvalidSecret,
	/// Payload is empty, undecodable, or lacks a nonce.
	#[error("Invalid payload.")]
	InvalidPayload,
	/// Signature does not match the payload under the configured secret.
	#[error("Payload does not match signature.")]
	SignatureMismatch,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn sso_messages_are_verbatim() {
		assert_eq!(SsoError::MissingPayload.to_string(), "No SSO payload or signature.");
		assert_eq!(SsoError::InvalidSecret.to_string(), "Invalid secret.");
		assert_eq!(SsoError::InvalidPayload.to_string(), "Invalid payload.");
		assert_eq!(SsoError::SignatureMismatch.to_string(), "Payload does not match signature.");
	}

	#[test]
	fn status_reports_http_codes() {
		let err = Error::Server { message: "boom".into(), status: 503, body: String::new() };

		assert_eq!(err.status(), Some(503));
		assert_eq!(err.to_string(), "boom");
		assert_eq!(Error::from(ProtocolError::UnexpectedRedirect).status(), Some(302));
		assert_eq!(Error::from(SsoError::InvalidSecret).status(), None);
	}
}
