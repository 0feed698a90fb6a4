// self
use crate::{
	_prelude::*,
	auth::ClientIdentity,
	client::Client,
	engine::{RequestEngine, RetryPolicy},
	http::ReqwestHttpClient,
	obs::{RequestObserver, TracingObserver},
};

/// Builder for [`Client`] values.
pub struct ClientBuilder {
	/// Base URL of the Discourse site.
	pub host: String,
	/// Username sent in the `Api-Username` header.
	pub api_username: String,
	/// Key sent in the `Api-Key` header.
	pub api_key: String,
	/// Per-request timeout; `None` leaves reqwest's default in place.
	pub timeout: Option<Duration>,
	/// Waits applied between rate-limited attempts.
	pub retry_policy: RetryPolicy,
	/// Receives request lifecycle events.
	pub observer: Arc<dyn RequestObserver>,
	/// Preconfigured transport; built from defaults when absent.
	pub http_client: Option<ReqwestHttpClient>,
}
impl ClientBuilder {
	/// Creates a builder with default retry policy and the tracing observer.
	pub fn new(
		host: impl Into<String>,
		api_username: impl Into<String>,
		api_key: impl Into<String>,
	) -> Self {
		Self {
			host: host.into(),
			api_username: api_username.into(),
			api_key: api_key.into(),
			timeout: None,
			retry_policy: RetryPolicy::default(),
			observer: Arc::new(TracingObserver),
			http_client: None,
		}
	}

	/// Sets the per-request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Replaces the retry policy.
	pub fn retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
		self.retry_policy = retry_policy;

		self
	}

	/// Replaces the request observer.
	pub fn observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
		self.observer = observer;

		self
	}

	/// Supplies a preconfigured transport.
	pub fn http_client(mut self, http_client: ReqwestHttpClient) -> Self {
		self.http_client = Some(http_client);

		self
	}

	/// Validates the configuration and builds the client.
	pub fn build(self) -> Result<Client> {
		let identity = ClientIdentity::new(self.host, self.api_username, self.api_key)?
			.with_timeout(self.timeout);
		let http = match self.http_client {
			Some(http) => http,
			None => ReqwestHttpClient::new()?,
		};
		let engine = RequestEngine::new(identity, http, self.retry_policy, self.observer);

		Ok(Client::from_engine(engine))
	}
}
impl Debug for ClientBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientBuilder")
			.field("host", &self.host)
			.field("api_username", &self.api_username)
			.field("api_key", &"<redacted>")
			.field("timeout", &self.timeout)
			.field("retry_policy", &self.retry_policy)
			.finish()
	}
}
