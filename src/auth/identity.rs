//! Immutable identity a client presents to the Discourse API.

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "Api-Key";
/// Header carrying the API username.
pub const API_USERNAME_HEADER: &str = "Api-Username";

/// Host, credentials, and transport timeout fixed for the lifetime of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientIdentity {
	host: String,
	api_username: String,
	api_key: Secret,
	timeout: Option<Duration>,
}
impl ClientIdentity {
	/// Validates and assembles an identity.
	///
	/// The host must include an `http` or `https` scheme; a trailing slash is dropped so
	/// server-relative paths can be appended verbatim.
	pub fn new(
		host: impl AsRef<str>,
		api_username: impl Into<String>,
		api_key: impl Into<Secret>,
	) -> Result<Self, ConfigError> {
		let host = host.as_ref().trim().trim_end_matches('/');
		let parsed = Url::parse(host)
			.map_err(|source| ConfigError::InvalidHost { host: host.to_owned(), source })?;

		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedScheme { host: host.to_owned() });
		}

		let api_username = api_username.into();
		let api_key = api_key.into();

		if api_username.trim().is_empty() {
			return Err(ConfigError::MissingCredential { field: "API username" });
		}
		if api_key.is_empty() {
			return Err(ConfigError::MissingCredential { field: "API key" });
		}

		Ok(Self { host: host.to_owned(), api_username, api_key, timeout: None })
	}

	/// Sets the per-request timeout handed to the transport.
	pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
		self.timeout = timeout;

		self
	}

	/// Base host, without a trailing slash.
	pub fn host(&self) -> &str {
		&self.host
	}

	/// API username sent with every request.
	pub fn api_username(&self) -> &str {
		&self.api_username
	}

	/// API key sent with every request.
	pub fn api_key(&self) -> &Secret {
		&self.api_key
	}

	/// Optional per-request timeout.
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout
	}

	/// Joins a server-relative path onto the host.
	pub fn url_for(&self, path: &str) -> Result<Url, ConfigError> {
		let raw = format!("{}{path}", self.host);

		Url::parse(&raw).map_err(|source| ConfigError::InvalidRequestUrl { url: raw, source })
	}
}
impl Debug for ClientIdentity {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientIdentity")
			.field("host", &self.host)
			.field("api_username", &self.api_username)
			.field("api_key", &self.api_key)
			.field("timeout", &self.timeout)
			.finish()
	}
}
