//! The Discourse client facade.
//!
//! [`Client`] owns a [`RequestEngine`] and exposes three layers: [`Client::execute`] for raw
//! [`ApiRequest`]s, [`Client::call`] for catalogued [`Endpoint`]s, and a handful of
//! operations that need more than a path and parameters (see the `ops` module).

mod builder;
mod ops;

pub use builder::*;
pub use ops::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::ClientIdentity,
	endpoint::{Endpoint, catalog},
	engine::RequestEngine,
	error::{ConfigError, ProtocolError},
	http::{ApiRequest, Params},
};

/// Blocking Discourse API client. Cheap to clone; clones share nothing mutable.
#[derive(Clone, Debug)]
pub struct Client {
	engine: RequestEngine,
}
impl Client {
	/// Starts building a client for `host` authenticated as `api_username`.
	pub fn builder(
		host: impl Into<String>,
		api_username: impl Into<String>,
		api_key: impl Into<String>,
	) -> ClientBuilder {
		ClientBuilder::new(host, api_username, api_key)
	}

	/// Wraps an engine assembled elsewhere.
	pub fn from_engine(engine: RequestEngine) -> Self {
		Self { engine }
	}

	/// Identity the client authenticates as.
	pub fn identity(&self) -> &ClientIdentity {
		self.engine.identity()
	}

	/// Underlying request engine.
	pub fn engine(&self) -> &RequestEngine {
		&self.engine
	}

	/// Executes a raw request.
	pub fn execute(&self, request: &ApiRequest) -> Result<Option<JsonValue>> {
		self.engine.execute(request)
	}

	/// Executes a raw request and decodes the body into `T`.
	pub fn execute_as<T>(&self, request: &ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		decode_as(self.execute(request)?)
	}

	/// Dispatches a catalogued endpoint.
	pub fn call(
		&self,
		endpoint: &Endpoint,
		args: &[(&str, &str)],
		params: Params,
	) -> Result<Option<JsonValue>> {
		let request = endpoint.request(args, params)?;
		let body = self.execute(&request)?;

		Ok(endpoint.extract_from(body)?)
	}

	/// Dispatches a catalogued endpoint and decodes the body into `T`.
	pub fn call_as<T>(
		&self,
		endpoint: &Endpoint,
		args: &[(&str, &str)],
		params: Params,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		decode_as(self.call(endpoint, args, params)?)
	}

	/// Dispatches the catalogued endpoint called `name`.
	pub fn call_named(
		&self,
		name: &str,
		args: &[(&str, &str)],
		params: Params,
	) -> Result<Option<JsonValue>> {
		let endpoint = catalog::find(name)
			.ok_or_else(|| ConfigError::UnknownEndpoint { name: name.to_owned() })?;

		self.call(endpoint, args, params)
	}
}

fn decode_as<T>(body: Option<JsonValue>) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(body.unwrap_or(JsonValue::Null))
		.map_err(|source| ProtocolError::Shape { source }.into())
}
