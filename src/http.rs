//! Transport primitives for Discourse API calls.
//!
//! [`ApiRequest`] describes one logical call (verb, path, parameters, attachments, body
//! mode, overrides). [`ReqwestHttpClient`] turns it into a single HTTP exchange and hands
//! the engine a [`RawResponse`] that carries just enough to classify the outcome. Retrying
//! and classification live in [`crate::engine`]; this module never interprets status codes.

mod params;

pub use params::*;

// crates.io
use reqwest::{
	Method, StatusCode,
	blocking::{
		RequestBuilder,
		multipart::{Form, Part},
	},
	header::{ACCEPT, CONTENT_TYPE},
	redirect::Policy,
};
// self
use crate::{
	_prelude::*,
	auth::{API_KEY_HEADER, API_USERNAME_HEADER, ClientIdentity},
	error::{ConfigError, TransportError},
};

/// Content type every JSON response must declare.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

const MAX_FOLLOWED_REDIRECTS: usize = 10;

/// HTTP verbs accepted by the Discourse API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
	/// `GET`
	Get,
	/// `PUT`
	Put,
	/// `POST`
	Post,
	/// `DELETE`
	Delete,
}
impl Verb {
	/// Returns the canonical method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Verb::Get => "GET",
			Verb::Put => "PUT",
			Verb::Post => "POST",
			Verb::Delete => "DELETE",
		}
	}

	/// True for verbs whose parameters travel in the query string.
	pub const fn uses_query(self) -> bool {
		matches!(self, Verb::Get | Verb::Delete)
	}

	fn method(self) -> Method {
		match self {
			Verb::Get => Method::GET,
			Verb::Put => Method::PUT,
			Verb::Post => Method::POST,
			Verb::Delete => Method::DELETE,
		}
	}
}
impl Display for Verb {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Encoding used for `PUT`/`POST` bodies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyMode {
	#[default]
	/// `application/x-www-form-urlencoded`.
	Form,
	/// `application/json`.
	Json,
}

/// Per-call transport overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestOverrides {
	/// Follow redirects instead of reporting them as errors.
	pub follow_redirects: bool,
}
impl RequestOverrides {
	/// Overrides that opt into redirect following.
	pub const fn follow_redirects() -> Self {
		Self { follow_redirects: true }
	}
}

/// One logical API call.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// HTTP verb.
	pub verb: Verb,
	/// Server-relative path, starting with `/`.
	pub path: String,
	/// Parameters (query string for GET/DELETE, body otherwise).
	pub params: Params,
	/// Files sent as multipart parts.
	pub files: Vec<Attachment>,
	/// Body encoding for PUT/POST.
	pub body: BodyMode,
	/// Transport overrides.
	pub overrides: RequestOverrides,
}
impl ApiRequest {
	/// Creates a request with no parameters.
	pub fn new(verb: Verb, path: impl Into<String>) -> Self {
		Self {
			verb,
			path: path.into(),
			params: Params::new(),
			files: Vec::new(),
			body: BodyMode::default(),
			overrides: RequestOverrides::default(),
		}
	}

	/// `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Verb::Get, path)
	}

	/// `PUT` request.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Verb::Put, path)
	}

	/// `POST` request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Verb::Post, path)
	}

	/// `DELETE` request.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Verb::Delete, path)
	}

	/// Replaces the parameter set.
	pub fn with_params(mut self, params: Params) -> Self {
		self.params = params;

		self
	}

	/// Adds a single parameter.
	pub fn param(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
		self.params.insert(key, value);

		self
	}

	/// Attaches a file.
	pub fn attach(mut self, file: Attachment) -> Self {
		self.files.push(file);

		self
	}

	/// Selects the body encoding.
	pub fn with_body(mut self, body: BodyMode) -> Self {
		self.body = body;

		self
	}

	/// Sends the parameters as a JSON body.
	pub fn json(self) -> Self {
		self.with_body(BodyMode::Json)
	}

	/// Replaces the transport overrides.
	pub fn with_overrides(mut self, overrides: RequestOverrides) -> Self {
		self.overrides = overrides;

		self
	}
}

/// Minimal view of an HTTP response used for classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Declared `content-type`, if any.
	pub content_type: Option<String>,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Creates a response view.
	pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
		Self { status, content_type: content_type.map(str::to_owned), body: body.into() }
	}

	/// Canonical reason phrase for the status, if the status is registered.
	pub fn reason(&self) -> Option<&'static str> {
		StatusCode::from_u16(self.status).ok().and_then(|status| status.canonical_reason())
	}

	/// Body decoded as UTF-8, lossily.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// True when the status is below 400, the usual HTTP client success predicate.
	pub fn is_ok(&self) -> bool {
		self.status < 400
	}

	/// True when the body is empty or whitespace only.
	pub fn is_blank(&self) -> bool {
		self.body.iter().all(u8::is_ascii_whitespace)
	}
}

/// Thin wrapper around two reqwest blocking clients so shared HTTP behavior lives in one
/// place.
///
/// The strict client never follows redirects: a redirect usually means the API key or
/// host is wrong, and the engine reports it. The following client is used only when a
/// request opts in through [`RequestOverrides::follow_redirects`].
#[derive(Clone)]
pub struct ReqwestHttpClient {
	strict: ReqwestClient,
	following: ReqwestClient,
}
impl ReqwestHttpClient {
	/// Builds both clients with the crate's redirect policies.
	pub fn new() -> Result<Self, ConfigError> {
		let strict = ReqwestClient::builder()
			.redirect(Policy::none())
			.build()
			.map_err(ConfigError::http_client_build)?;
		let following = ReqwestClient::builder()
			.redirect(Policy::limited(MAX_FOLLOWED_REDIRECTS))
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self { strict, following })
	}

	/// Wraps existing clients. `strict` must be configured not to follow redirects.
	pub fn with_clients(strict: ReqwestClient, following: ReqwestClient) -> Self {
		Self { strict, following }
	}

	/// Performs one HTTP exchange for `request` on behalf of `identity`.
	pub fn send(&self, identity: &ClientIdentity, request: &ApiRequest) -> Result<RawResponse> {
		let url = identity.url_for(&request.path)?;
		let client =
			if request.overrides.follow_redirects { &self.following } else { &self.strict };
		let mut builder = client
			.request(request.verb.method(), url)
			.header(ACCEPT, JSON_CONTENT_TYPE)
			.header(API_KEY_HEADER, identity.api_key().expose())
			.header(API_USERNAME_HEADER, identity.api_username());

		if let Some(timeout) = identity.timeout() {
			builder = builder.timeout(timeout);
		}

		let response = attach_params(builder, request)?.send().map_err(TransportError::from)?;
		let status = response.status().as_u16();
		let content_type = response
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.map(str::to_owned);
		let body = response.bytes().map_err(TransportError::from)?.to_vec();

		Ok(RawResponse { status, content_type, body })
	}
}
impl Debug for ReqwestHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReqwestHttpClient(..)")
	}
}

fn attach_params(builder: RequestBuilder, request: &ApiRequest) -> Result<RequestBuilder> {
	if request.verb.uses_query() {
		return Ok(builder.query(&request.params.to_pairs()));
	}
	if !request.files.is_empty() {
		return Ok(builder.multipart(multipart_form(request)?));
	}

	match request.body {
		BodyMode::Form => Ok(builder.form(&request.params.to_pairs())),
		BodyMode::Json => {
			let body = serde_json::to_vec(&request.params.to_json_object())
				.map_err(ConfigError::request_build)?;

			Ok(builder.header(CONTENT_TYPE, "application/json").body(body))
		},
	}
}

fn multipart_form(request: &ApiRequest) -> Result<Form> {
	let mut form = Form::new();

	for (key, value) in request.params.to_pairs() {
		form = form.text(key, value);
	}
	for file in &request.files {
		let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());

		if let Some(mime) = file.mime.as_deref() {
			part = part.mime_str(mime).map_err(ConfigError::request_build)?;
		}

		form = form.part(file.field.clone(), part);
	}

	Ok(form)
}
