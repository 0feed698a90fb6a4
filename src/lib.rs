//! Blocking Discourse API client: one request engine with rate-limit-aware retries and a
//! typed error taxonomy, declarative endpoint descriptors, and signed SSO payload helpers.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod endpoint;
pub mod engine;
pub mod error;
pub mod http;
pub mod obs;
pub mod sso;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::{Client, ClientBuilder},
		engine::RetryPolicy,
	};

	/// API username used by every test client.
	pub const TEST_API_USERNAME: &str = "testuser";
	/// API key used by every test client.
	pub const TEST_API_KEY: &str = "testkey";

	/// Returns a builder pointed at `host` with zero backoff so rate-limit tests never sleep.
	pub fn test_client_builder(host: &str) -> ClientBuilder {
		Client::builder(host, TEST_API_USERNAME, TEST_API_KEY)
			.retry_policy(RetryPolicy::immediate())
	}

	/// Builds a client pointed at `host` using [`test_client_builder`].
	pub fn build_test_client(host: &str) -> Client {
		test_client_builder(host).build().expect("Failed to build Discourse client for tests.")
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
		time::Duration,
	};

	pub use reqwest::{Error as ReqwestError, blocking::Client as ReqwestClient};
	pub use serde::Deserialize;
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
