//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// self
use discourse_client::{
	client::{Client, ClientBuilder},
	engine::RetryPolicy,
};

/// API username used by every test client.
pub const TEST_API_USERNAME: &str = "testuser";
/// API key used by every test client.
pub const TEST_API_KEY: &str = "testkey";

/// Returns a builder pointed at `host` with zero backoff so rate-limit tests never sleep.
pub fn test_client_builder(host: &str) -> ClientBuilder {
	Client::builder(host, TEST_API_USERNAME, TEST_API_KEY).retry_policy(RetryPolicy::immediate())
}

/// Builds a client pointed at `host` using [`test_client_builder`].
pub fn build_test_client(host: &str) -> Client {
	test_client_builder(host).build().expect("Test client should build.")
}
