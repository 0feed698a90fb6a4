//! Request parameter set and file attachments.

// self
use crate::_prelude::*;

/// Ordered parameter set sent with a request.
///
/// Keys are unique; inserting an existing key replaces its value in place so the original
/// ordering survives. Array values are sent as one pair per element under the same key,
/// which is how endpoints that expect `key[]` receive their lists. `null` values are
/// skipped on the query/form path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params(Vec<(String, JsonValue)>);
impl Params {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
		self.insert(key, value);

		self
	}

	/// Inserts or replaces a parameter.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
		let key = key.into();
		let value = value.into();

		match self.0.iter_mut().find(|(existing, _)| *existing == key) {
			Some((_, slot)) => *slot = value,
			None => self.0.push((key, value)),
		}

		self
	}

	/// Inserts a parameter only when the key is not present yet.
	pub fn insert_default(
		&mut self,
		key: impl Into<String>,
		value: impl Into<JsonValue>,
	) -> &mut Self {
		let key = key.into();

		if !self.contains_key(&key) {
			self.0.push((key, value.into()));
		}

		self
	}

	/// Merges `other` into `self`; values from `other` win.
	pub fn merge(&mut self, other: Params) -> &mut Self {
		for (key, value) in other.0 {
			self.insert(key, value);
		}

		self
	}

	/// Removes a parameter, returning its value.
	pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
		let idx = self.0.iter().position(|(existing, _)| existing == key)?;

		Some(self.0.remove(idx).1)
	}

	/// Looks up a parameter.
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
	}

	/// Returns true if the key is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no parameters are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterator over the parameters in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Flattens the set into string pairs for query strings and form bodies.
	pub fn to_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = Vec::with_capacity(self.0.len());

		for (key, value) in &self.0 {
			match value {
				JsonValue::Null => {},
				JsonValue::Array(items) =>
					for item in items.iter().filter(|item| !item.is_null()) {
						pairs.push((key.clone(), render_scalar(item)));
					},
				other => pairs.push((key.clone(), render_scalar(other))),
			}
		}

		pairs
	}

	/// Converts the set into a JSON object for JSON bodies.
	pub fn to_json_object(&self) -> JsonMap<String, JsonValue> {
		self.0.iter().cloned().collect()
	}
}
impl<K, V> FromIterator<(K, V)> for Params
where
	K: Into<String>,
	V: Into<JsonValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Self::new();

		for (key, value) in iter {
			params.insert(key, value);
		}

		params
	}
}

fn render_scalar(value: &JsonValue) -> String {
	match value {
		JsonValue::String(s) => s.clone(),
		JsonValue::Bool(b) => b.to_string(),
		JsonValue::Number(n) => n.to_string(),
		JsonValue::Null => String::new(),
		other => other.to_string(),
	}
}

/// File uploaded as a `multipart/form-data` part.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
	/// Form field name.
	pub field: String,
	/// File name reported to the server.
	pub file_name: String,
	/// Raw file contents.
	pub bytes: Vec<u8>,
	/// Optional MIME type (e.g. `image/png`).
	pub mime: Option<String>,
}
impl Attachment {
	/// Creates an attachment without an explicit MIME type.
	pub fn new(
		field: impl Into<String>,
		file_name: impl Into<String>,
		bytes: impl Into<Vec<u8>>,
	) -> Self {
		Self { field: field.into(), file_name: file_name.into(), bytes: bytes.into(), mime: None }
	}

	/// Sets the MIME type.
	pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
		self.mime = Some(mime.into());

		self
	}
}
impl Debug for Attachment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Attachment")
			.field("field", &self.field)
			.field("file_name", &self.file_name)
			.field("len", &self.bytes.len())
			.field("mime", &self.mime)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn insert_replaces_in_place() {
		let mut params = Params::new().with("a", 1).with("b", "two");

		params.insert("a", true);

		assert_eq!(
			params.to_pairs(),
			vec![("a".into(), "true".into()), ("b".into(), "two".into())]
		);

		params.insert_default("b", "ignored").insert_default("c", 3.5);

		assert_eq!(params.get("b"), Some(&json!("two")));
		assert_eq!(params.get("c"), Some(&json!(3.5)));
		assert_eq!(params.remove("a"), Some(json!(true)));
		assert_eq!(params.len(), 2);
	}

	#[test]
	fn arrays_repeat_the_key_and_nulls_are_skipped() {
		let params = Params::new()
			.with("post_ids[]", json!([10, 11, null]))
			.with("skip", JsonValue::Null)
			.with("nested", json!({"k": "v"}));

		assert_eq!(
			params.to_pairs(),
			vec![
				("post_ids[]".into(), "10".into()),
				("post_ids[]".into(), "11".into()),
				("nested".into(), "{\"k\":\"v\"}".into()),
			]
		);
	}

	#[test]
	fn json_object_keeps_native_types() {
		let params: Params = [("a", json!("a")), ("n", json!(7))].into_iter().collect();
		let object = params.to_json_object();

		assert_eq!(JsonValue::Object(object), json!({"a": "a", "n": 7}));
	}

	#[test]
	fn merge_prefers_incoming_values() {
		let mut base = Params::new().with("name", "old").with("keep", 1);

		base.merge(Params::new().with("name", "new").with("extra", false));

		assert_eq!(base.get("name"), Some(&json!("new")));
		assert_eq!(base.get("keep"), Some(&json!(1)));
		assert_eq!(base.get("extra"), Some(&json!(false)));
	}
}
