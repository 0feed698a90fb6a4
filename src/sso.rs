//! Discourse SSO payload signing and validation.
//!
//! Discourse sends the identity provider a `sso` payload (base64 of a query string holding a
//! `nonce`) and a `sig` (lowercase hex HMAC-SHA256 of the payload under the shared secret).
//! The provider validates both with [`validate`], authenticates the user, and redirects back
//! to [`redirect_url`], which signs the user's attributes together with the same nonce.
//!
//! ```
//! use discourse_client::sso;
//!
//! let url = sso::redirect_url(
//! 	"nonce-from-discourse",
//! 	"shared-secret",
//! 	"sam@example.com",
//! 	"42",
//! 	"sam",
//! 	[("name", "Sam")],
//! )?;
//!
//! assert!(url.starts_with("/session/sso_login?sso="));
//! # Ok::<(), discourse_client::error::SsoError>(())
//! ```

// std
use std::borrow::Borrow;
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;
// self
use crate::error::SsoError;

type HmacSha256 = Hmac<Sha256>;

/// Path Discourse exposes for completing an SSO login.
pub const SSO_LOGIN_PATH: &str = "/session/sso_login";

/// Validates an inbound payload and returns its nonce.
///
/// Checks run in a fixed order: presence of payload and signature, a non-empty secret, the
/// payload's shape (non-empty, base64, mentions `nonce`), and only then the signature.
pub fn validate(
	payload: Option<&str>,
	signature: Option<&str>,
	secret: &str,
) -> Result<String, SsoError> {
	decode(payload, signature, secret)?
		.into_iter()
		.find(|(key, value)| key == "nonce" && !value.is_empty())
		.map(|(_, value)| value)
		.ok_or(SsoError::InvalidPayload)
}

/// Validates an inbound payload and returns every attribute it carries, in order.
///
/// Applies the same checks as [`validate`]; use it when fields such as `return_sso_url` are
/// needed alongside the nonce.
pub fn decode(
	payload: Option<&str>,
	signature: Option<&str>,
	secret: &str,
) -> Result<Vec<(String, String)>, SsoError> {
	let (Some(payload), Some(signature)) = (payload, signature) else {
		return Err(SsoError::MissingPayload);
	};

	if secret.is_empty() {
		return Err(SsoError::InvalidSecret);
	}

	let payload = urlencoding::decode(payload).map_err(|_| SsoError::InvalidPayload)?;

	if payload.is_empty() {
		return Err(SsoError::InvalidPayload);
	}

	let decoded = decode_base64(&payload)?;

	if !decoded.contains("nonce") {
		return Err(SsoError::InvalidPayload);
	}

	verify(secret, payload.as_bytes(), signature)?;

	Ok(form_urlencoded::parse(decoded.as_bytes())
		.map(|(key, value)| (key.into_owned(), value.into_owned()))
		.collect())
}

/// Signs `attributes` and returns the `sso=..&sig=..` query string.
pub fn signed_payload<I, K, V>(secret: &str, attributes: I) -> Result<String, SsoError>
where
	I: IntoIterator,
	I::Item: Borrow<(K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	if secret.is_empty() {
		return Err(SsoError::InvalidSecret);
	}

	let query = form_urlencoded::Serializer::new(String::new()).extend_pairs(attributes).finish();
	let payload = STANDARD.encode(query);
	let signature = sign(secret, payload.as_bytes())?;

	Ok(form_urlencoded::Serializer::new(String::new())
		.append_pair("sso", &payload)
		.append_pair("sig", &signature)
		.finish())
}

/// Builds the path that logs the user into Discourse.
///
/// `nonce` must be the value returned by [`validate`] for the inbound request. The named
/// fields take precedence over same-named entries in `extra`.
pub fn redirect_url<I, K, V>(
	nonce: &str,
	secret: &str,
	email: &str,
	external_id: &str,
	username: &str,
	extra: I,
) -> Result<String, SsoError>
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	const NAMED: [&str; 4] = ["nonce", "email", "external_id", "username"];

	let mut attributes = vec![
		("nonce".to_owned(), nonce.to_owned()),
		("email".to_owned(), email.to_owned()),
		("external_id".to_owned(), external_id.to_owned()),
		("username".to_owned(), username.to_owned()),
	];

	for (key, value) in extra {
		let key = key.as_ref();

		if !NAMED.contains(&key) {
			attributes.push((key.to_owned(), value.as_ref().to_owned()));
		}
	}

	Ok(format!("{SSO_LOGIN_PATH}?{}", signed_payload(secret, &attributes)?))
}

/// Lowercase hex HMAC-SHA256 of `message` under `secret`.
pub fn sign(secret: &str, message: &[u8]) -> Result<String, SsoError> {
	let mut mac =
		HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SsoError::InvalidSecret)?;

	mac.update(message);

	Ok(hex::encode(mac.finalize().into_bytes()))
}

// Signatures are lowercase hex on the wire; other casings never match.
fn verify(secret: &str, message: &[u8], signature: &str) -> Result<(), SsoError> {
	if signature.bytes().any(|b| b.is_ascii_uppercase()) {
		return Err(SsoError::SignatureMismatch);
	}

	let expected = hex::decode(signature).map_err(|_| SsoError::SignatureMismatch)?;
	let mut mac =
		HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SsoError::InvalidSecret)?;

	mac.update(message);
	mac.verify_slice(&expected).map_err(|_| SsoError::SignatureMismatch)
}

// Discourse wraps base64 at 60 columns, so line breaks are dropped before decoding.
fn decode_base64(payload: &str) -> Result<String, SsoError> {
	let compact = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect::<String>();
	let bytes = STANDARD.decode(compact).map_err(|_| SsoError::InvalidPayload)?;

	String::from_utf8(bytes).map_err(|_| SsoError::InvalidPayload)
}
