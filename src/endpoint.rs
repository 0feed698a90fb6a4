//! Declarative endpoint descriptors.
//!
//! Most of the Discourse API is a plain mapping from a path template and a parameter set to
//! one request. Instead of a hand-written method per endpoint, each one is an [`Endpoint`]
//! value in [`catalog`], dispatched by [`Client::call`](crate::client::Client::call).

pub mod catalog;

// self
use crate::{
	_prelude::*,
	error::{ConfigError, ProtocolError},
	http::{ApiRequest, BodyMode, Params, RequestOverrides, Verb},
};

/// Path template, verb, and response handling for one API endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
	/// Stable name, used for lookups by name.
	pub name: &'static str,
	/// HTTP verb.
	pub verb: Verb,
	/// Server-relative path with `{placeholder}` segments.
	pub path: &'static str,
	/// Body encoding for PUT/POST.
	pub body: BodyMode,
	/// Whether redirects are followed for this endpoint.
	pub follow_redirects: bool,
	/// JSON pointer extracted from a successful body.
	pub extract: Option<&'static str>,
}
impl Endpoint {
	/// Declares an endpoint with form bodies, no redirects, and no extraction.
	pub const fn new(name: &'static str, verb: Verb, path: &'static str) -> Self {
		Self { name, verb, path, body: BodyMode::Form, follow_redirects: false, extract: None }
	}

	/// Sends parameters as a JSON body.
	pub const fn json(mut self) -> Self {
		self.body = BodyMode::Json;

		self
	}

	/// Follows redirects.
	pub const fn following(mut self) -> Self {
		self.follow_redirects = true;

		self
	}

	/// Returns only the value at `pointer` from the decoded body.
	pub const fn extracting(mut self, pointer: &'static str) -> Self {
		self.extract = Some(pointer);

		self
	}

	/// Placeholder names in the path template, in order.
	pub fn placeholders(&self) -> Vec<&'static str> {
		let mut names = Vec::new();
		let mut rest = self.path;

		while let Some(start) = rest.find('{') {
			let after = &rest[start + 1..];
			let Some(end) = after.find('}') else { break };

			names.push(&after[..end]);
			rest = &after[end + 1..];
		}

		names
	}

	/// Substitutes `args` into the path template.
	pub fn render_path(&self, args: &[(&str, &str)]) -> Result<String, ConfigError> {
		let mut rendered = String::with_capacity(self.path.len());
		let mut rest = self.path;

		while let Some(start) = rest.find('{') {
			let after = &rest[start + 1..];
			let Some(end) = after.find('}') else { break };
			let name = &after[..end];
			let value = args
				.iter()
				.find(|(key, _)| *key == name)
				.map(|(_, value)| *value)
				.ok_or_else(|| ConfigError::MissingPathArgument {
					endpoint: self.name,
					argument: name.to_owned(),
				})?;

			rendered.push_str(&rest[..start]);
			rendered.push_str(value);
			rest = &after[end + 1..];
		}

		rendered.push_str(rest);

		Ok(rendered)
	}

	/// Builds the request for this endpoint.
	pub fn request(
		&self,
		args: &[(&str, &str)],
		params: Params,
	) -> Result<ApiRequest, ConfigError> {
		let overrides = RequestOverrides { follow_redirects: self.follow_redirects };

		Ok(ApiRequest::new(self.verb, self.render_path(args)?)
			.with_params(params)
			.with_body(self.body)
			.with_overrides(overrides))
	}

	/// Applies [`extract`](Self::extract) to a successful body.
	pub fn extract_from(
		&self,
		body: Option<JsonValue>,
	) -> Result<Option<JsonValue>, ProtocolError> {
		let Some(pointer) = self.extract else {
			return Ok(body);
		};
		let missing = || ProtocolError::MissingField { pointer: pointer.to_owned() };
		let mut body = body.ok_or_else(missing)?;

		body.pointer_mut(pointer).map(JsonValue::take).map(Some).ok_or_else(missing)
	}
}
