mod common;

// std
use std::{
	io::{Read, Write},
	net::TcpListener,
	sync::{Arc, Mutex},
	thread::{self, JoinHandle},
	time::Duration,
};
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use discourse_client::{
	engine::{MAX_ATTEMPTS, RetryPolicy},
	error::{ConfigError, Error, ProtocolError},
	http::{ApiRequest, Attachment, JSON_CONTENT_TYPE},
	obs::{RequestEvent, RequestObserver},
};
use common::*;

#[derive(Default)]
struct RecordingObserver {
	events: Mutex<Vec<String>>,
	delays: Mutex<Vec<Option<Duration>>>,
}
impl RecordingObserver {
	fn recorded(&self) -> Vec<String> {
		self.events.lock().expect("Observer lock should not be poisoned.").clone()
	}

	fn delays(&self) -> Vec<Option<Duration>> {
		self.delays.lock().expect("Observer lock should not be poisoned.").clone()
	}
}
impl RequestObserver for RecordingObserver {
	fn observe(&self, event: &RequestEvent<'_>) {
		let label = match event {
			RequestEvent::Attempt { attempt, .. } => format!("attempt:{attempt}"),
			RequestEvent::Response { status, .. } => format!("response:{status}"),
			RequestEvent::RateLimited { delay, .. } => {
				self.delays.lock().expect("Observer lock should not be poisoned.").push(*delay);

				format!("rate_limited:{}", delay.is_some())
			},
			RequestEvent::Finished { outcome, .. } => format!("finished:{outcome}"),
		};

		self.events.lock().expect("Observer lock should not be poisoned.").push(label);
	}
}

// Serves `responses` in order, one connection each, and reports how many were served.
fn scripted_server(responses: Vec<String>) -> (String, JoinHandle<usize>) {
	let listener = TcpListener::bind("127.0.0.1:0").expect("Scripted server should bind.");
	let address = listener.local_addr().expect("Scripted server should expose its address.");
	let handle = thread::spawn(move || {
		let mut served = 0;

		for response in responses {
			let (mut stream, _) = listener.accept().expect("Scripted server should accept.");
			let mut request = Vec::new();
			let mut chunk = [0_u8; 1024];

			while !request.windows(4).any(|window| window == b"\r\n\r\n") {
				let read = stream.read(&mut chunk).expect("Scripted server should read.");

				if read == 0 {
					break;
				}

				request.extend_from_slice(&chunk[..read]);
			}

			stream.write_all(response.as_bytes()).expect("Scripted server should write.");

			served += 1;
		}

		served
	});

	(format!("http://{address}"), handle)
}

fn raw_response(status_line: &str, content_type: &str, body: &str) -> String {
	let length = body.len();

	format!(
		"HTTP/1.1 {status_line}\r\ncontent-type: {content_type}\r\n\
		 content-length: {length}\r\nconnection: close\r\n\r\n{body}"
	)
}

#[test]
fn success_body_is_returned_with_auth_headers() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET)
			.path("/about.json")
			.header("api-key", TEST_API_KEY)
			.header("api-username", TEST_API_USERNAME)
			.header("accept", JSON_CONTENT_TYPE);
		then.status(200)
			.header("content-type", JSON_CONTENT_TYPE)
			.body("{\"about\":{\"title\":\"Forum\",\"stats\":{\"topic_count\":3}}}");
	});
	let body = build_test_client(&server.base_url())
		.execute(&ApiRequest::get("/about.json"))
		.expect("Successful call should return the body.");

	mock.assert();
	assert_eq!(body, Some(json!({"about": {"title": "Forum", "stats": {"topic_count": 3}}})));
}

#[test]
fn empty_non_json_success_is_none() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(PUT).path("/admin/users/3/unsuspend");
		then.status(200).header("content-type", "text/plain; charset=utf-8").body("");
	});
	let body = build_test_client(&server.base_url())
		.execute(&ApiRequest::put("/admin/users/3/unsuspend"))
		.expect("Empty success body should not fail.");

	mock.assert();
	assert_eq!(body, None);
}

#[test]
fn non_json_success_with_a_body_is_rejected() {
	let server = MockServer::start();

	server.mock(|when, then| {
		when.method(GET).path("/latest.json");
		then.status(200).header("content-type", "text/html; charset=utf-8").body("<html/>");
	});

	let err = build_test_client(&server.base_url())
		.execute(&ApiRequest::get("/latest.json"))
		.expect_err("HTML responses must be rejected.");

	assert!(matches!(
		err,
		Error::Protocol(ProtocolError::UnexpectedContentType { ref actual, .. })
			if actual == "text/html; charset=utf-8"
	));
	assert_eq!(
		err.to_string(),
		"Invalid Response, expecting \"application/json; charset=utf-8\" \
		 got \"text/html; charset=utf-8\""
	);
}

#[test]
fn server_error_message_comes_from_errors_array() {
	let server = MockServer::start();

	server.mock(|when, then| {
		when.method(GET).path("/latest.json");
		then.status(500).header("content-type", JSON_CONTENT_TYPE).body("{\"errors\":[\"boom\"]}");
	});

	let err = build_test_client(&server.base_url())
		.execute(&ApiRequest::get("/latest.json"))
		.expect_err("500 responses must fail.");

	assert!(matches!(err, Error::Server { status: 500, .. }));
	assert_eq!(err.to_string(), "boom");
}

#[test]
fn client_error_falls_back_to_reason_phrase() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/users/ghost.json");
		then.status(404).header("content-type", "text/html").body("<html>missing</html>");
	});
	let err = build_test_client(&server.base_url())
		.execute(&ApiRequest::get("/users/ghost.json"))
		.expect_err("404 responses must fail.");

	mock.assert_calls(1);
	assert!(matches!(
		err,
		Error::Client { status: 404, ref body, .. } if body == "<html>missing</html>"
	));
	assert_eq!(err.to_string(), "Not Found");
	assert_eq!(err.status(), Some(404));
}

#[test]
fn errors_field_in_a_success_body_is_an_api_error() {
	let server = MockServer::start();

	server.mock(|when, then| {
		when.method(POST).path("/posts");
		then.status(200)
			.header("content-type", JSON_CONTENT_TYPE)
			.body("{\"errors\":[\"Title is too short\",\"Body is too short\"]}");
	});

	let err = build_test_client(&server.base_url())
		.execute(&ApiRequest::post("/posts").param("raw", "hi"))
		.expect_err("Embedded errors must fail the call.");

	assert!(matches!(err, Error::Protocol(ProtocolError::Api { .. })));
	assert_eq!(err.to_string(), "Title is too short,Body is too short");
}

#[test]
fn undecodable_json_is_a_decode_error() {
	let server = MockServer::start();

	server.mock(|when, then| {
		when.method(GET).path("/latest.json");
		then.status(200).header("content-type", JSON_CONTENT_TYPE).body("{\"topic_list\":");
	});

	let err = build_test_client(&server.base_url())
		.execute(&ApiRequest::get("/latest.json"))
		.expect_err("Truncated JSON must fail.");

	assert!(matches!(err, Error::Protocol(ProtocolError::Decode { .. })));
}

#[test]
fn redirect_is_reported_not_followed() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/latest.json");
		then.status(302).header("location", "/login");
	});
	let err = build_test_client(&server.base_url())
		.execute(&ApiRequest::get("/latest.json"))
		.expect_err("Redirects must fail.");

	mock.assert_calls(1);
	assert!(matches!(err, Error::Protocol(ProtocolError::UnexpectedRedirect)));
	assert_eq!(err.to_string(), "Unexpected Redirect, invalid api key or host?");
}

#[test]
fn rate_limit_is_retried_until_attempts_run_out() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/latest.json");
		then.status(429)
			.header("content-type", JSON_CONTENT_TYPE)
			.body("{\"errors\":[\"slow down\"],\"extras\":{\"wait_seconds\":0}}");
	});
	let observer = Arc::new(RecordingObserver::default());
	let client = test_client_builder(&server.base_url())
		.observer(observer.clone())
		.build()
		.expect("Test client should build.");
	let err = client
		.execute(&ApiRequest::get("/latest.json"))
		.expect_err("Exhausted retries must fail.");

	mock.assert_calls(MAX_ATTEMPTS as usize);
	assert!(matches!(err, Error::RateLimited { attempts: MAX_ATTEMPTS, .. }));

	let events = observer.recorded();

	assert_eq!(events.iter().filter(|event| event.starts_with("attempt:")).count(), 4);
	assert_eq!(
		events.iter().filter(|event| *event == "rate_limited:true").count(),
		3,
		"Only attempts followed by another attempt should sleep."
	);
	assert_eq!(events[events.len() - 2], "rate_limited:false");
	assert_eq!(events.last().map(String::as_str), Some("finished:rate_limited"));
}

#[test]
fn rate_limit_delay_adds_backoff_to_the_wait_hint() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/latest.json");
		then.status(429)
			.header("content-type", JSON_CONTENT_TYPE)
			.body("{\"extras\":{\"wait_seconds\":0.05}}");
	});
	let observer = Arc::new(RecordingObserver::default());
	let client = test_client_builder(&server.base_url())
		.retry_policy(RetryPolicy::immediate().with_backoff(Duration::from_millis(10)))
		.observer(observer.clone())
		.build()
		.expect("Test client should build.");
	let err = client
		.execute(&ApiRequest::get("/latest.json"))
		.expect_err("Exhausted retries must fail.");
	let delay = Some(Duration::from_millis(60));

	mock.assert_calls(MAX_ATTEMPTS as usize);
	assert_eq!(observer.delays(), vec![delay, delay, delay, None]);
	assert!(matches!(
		err,
		Error::RateLimited { attempts: MAX_ATTEMPTS, last_wait }
			if last_wait == Duration::from_millis(50)
	));
}

#[test]
fn rate_limit_without_a_hint_waits_the_fallback() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/latest.json");
		then.status(429)
			.header("content-type", JSON_CONTENT_TYPE)
			.body("{\"errors\":[\"slow down\"]}");
	});
	let observer = Arc::new(RecordingObserver::default());
	let policy = RetryPolicy::immediate()
		.with_backoff(Duration::from_millis(5))
		.with_fallback_wait(Duration::from_millis(20));
	let client = test_client_builder(&server.base_url())
		.retry_policy(policy)
		.observer(observer.clone())
		.build()
		.expect("Test client should build.");
	let err = client
		.execute(&ApiRequest::get("/latest.json"))
		.expect_err("Exhausted retries must fail.");
	let delay = Some(Duration::from_millis(25));

	mock.assert_calls(MAX_ATTEMPTS as usize);
	assert_eq!(observer.delays(), vec![delay, delay, delay, None]);
	assert!(matches!(
		err,
		Error::RateLimited { attempts: MAX_ATTEMPTS, last_wait }
			if last_wait == Duration::from_millis(20)
	));
}

#[test]
fn rate_limit_then_success_returns_the_body() {
	let (host, server) = scripted_server(vec![
		raw_response(
			"429 Too Many Requests",
			JSON_CONTENT_TYPE,
			"{\"extras\":{\"wait_seconds\":0}}",
		),
		raw_response("200 OK", JSON_CONTENT_TYPE, "{\"ok\":true}"),
	]);
	let body = build_test_client(&host)
		.execute(&ApiRequest::get("/latest.json"))
		.expect("Second attempt should succeed.");

	assert_eq!(body, Some(json!({"ok": true})));
	assert_eq!(server.join().expect("Scripted server should finish."), 2);
}

#[test]
fn observer_sees_a_single_successful_attempt() {
	let server = MockServer::start();

	server.mock(|when, then| {
		when.method(GET).path("/about.json");
		then.status(200).header("content-type", JSON_CONTENT_TYPE).body("{}");
	});

	let observer = Arc::new(RecordingObserver::default());
	let client = test_client_builder(&server.base_url())
		.observer(observer.clone())
		.build()
		.expect("Test client should build.");

	client.execute(&ApiRequest::get("/about.json")).expect("Call should succeed.");

	assert_eq!(observer.recorded(), vec!["attempt:1", "response:200", "finished:success"]);
}

#[test]
fn network_failures_are_transport_errors() {
	let err = build_test_client("http://127.0.0.1:1")
		.execute(&ApiRequest::get("/about.json"))
		.expect_err("Nothing listens on port 1.");

	assert!(matches!(err, Error::Transport(_)));
}

#[test]
fn attachments_are_sent_as_multipart_parts() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(POST)
			.path("/uploads.json")
			.header_includes("content-type", "multipart/form-data")
			.body_includes("name=\"type\"")
			.body_includes("avatar")
			.body_includes("name=\"file\"; filename=\"a.png\"")
			.body_includes("image/png");
		then.status(200).header("content-type", JSON_CONTENT_TYPE).body("{\"id\":1}");
	});
	let request = ApiRequest::post("/uploads.json")
		.param("type", "avatar")
		.attach(Attachment::new("file", "a.png", b"png-bytes".to_vec()).with_mime("image/png"));
	let body = build_test_client(&server.base_url())
		.execute(&request)
		.expect("Upload should succeed.");

	mock.assert();
	assert_eq!(body, Some(json!({"id": 1})));
}

#[test]
fn invalid_attachment_mime_fails_before_sending() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(POST).path("/uploads.json");
		then.status(200).header("content-type", JSON_CONTENT_TYPE).body("{}");
	});
	let request = ApiRequest::post("/uploads.json")
		.attach(Attachment::new("file", "a.png", b"png-bytes".to_vec()).with_mime("not a mime"));
	let err = build_test_client(&server.base_url())
		.execute(&request)
		.expect_err("Malformed MIME types must be rejected.");

	mock.assert_calls(0);
	assert!(matches!(err, Error::Config(ConfigError::RequestBuild { .. })));
}
