//! Operations that take more than one request or shape their parameters before sending.

// crates.io
use time::{UtcOffset, format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::{
	_prelude::*,
	client::Client,
	endpoint::catalog,
	error::ConfigError,
	http::{ApiRequest, Params},
	sso,
};

/// Text colour used when a new category does not set one.
pub const DEFAULT_TEXT_COLOR: &str = "FFFFFF";

const SUSPEND_UNTIL_FORMAT: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]+00:00");

/// Category to create with [`Client::create_category`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCategory {
	/// Display name.
	pub name: String,
	/// Background colour as hex without `#`.
	pub color: String,
	/// Text colour as hex without `#`.
	pub text_color: String,
	/// Group name to permission level; sent as `permissions[group]`.
	pub permissions: Vec<(String, u8)>,
	/// Name of the parent category, resolved through the categories listing.
	pub parent: Option<String>,
}
impl NewCategory {
	/// Category visible to everyone with white text.
	pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			color: color.into(),
			text_color: DEFAULT_TEXT_COLOR.to_owned(),
			permissions: vec![("everyone".to_owned(), 1)],
			parent: None,
		}
	}

	/// Overrides the text colour.
	pub fn text_color(mut self, text_color: impl Into<String>) -> Self {
		self.text_color = text_color.into();

		self
	}

	/// Replaces the permission table.
	pub fn permissions<I, K>(mut self, permissions: I) -> Self
	where
		I: IntoIterator<Item = (K, u8)>,
		K: Into<String>,
	{
		self.permissions =
			permissions.into_iter().map(|(group, level)| (group.into(), level)).collect();

		self
	}

	/// Nests the category under the category called `parent`.
	pub fn parent(mut self, parent: impl Into<String>) -> Self {
		self.parent = Some(parent.into());

		self
	}
}

#[derive(Debug, Deserialize)]
struct HoneypotChallenge {
	challenge: String,
	value: String,
}

#[derive(Debug, Deserialize)]
struct CategorySummary {
	id: u64,
	name: String,
}

impl Client {
	/// Creates a user after answering the honeypot challenge.
	///
	/// Pass `active = true` in `extra` to skip the activation email.
	pub fn create_user(
		&self,
		name: &str,
		username: &str,
		email: &str,
		password: &str,
		extra: Params,
	) -> Result<Option<JsonValue>> {
		let honeypot =
			self.call_as::<HoneypotChallenge>(&catalog::HONEYPOT, &[], Params::new())?;
		let params = Params::new()
			.with("name", name)
			.with("username", username)
			.with("email", email)
			.with("password", password)
			.with("password_confirmation", honeypot.value)
			.with("challenge", honeypot.challenge.chars().rev().collect::<String>());

		self.call(&catalog::CREATE_USER, &[], with_extra(params, extra))
	}

	/// Suspends a user for `days` days starting now.
	pub fn suspend(
		&self,
		user_id: u64,
		days: u32,
		reason: &str,
		extra: Params,
	) -> Result<Option<JsonValue>> {
		self.suspend_at(OffsetDateTime::now_utc(), user_id, days, reason, extra)
	}

	/// Suspends a user for `days` days starting at `now`.
	pub fn suspend_at(
		&self,
		now: OffsetDateTime,
		user_id: u64,
		days: u32,
		reason: &str,
		extra: Params,
	) -> Result<Option<JsonValue>> {
		let params = Params::new()
			.with("suspend_until", suspend_until(now, days)?)
			.with("reason", reason);
		let user_id = user_id.to_string();

		self.call(&catalog::SUSPEND, &[("user_id", user_id.as_str())], with_extra(params, extra))
	}

	/// Pushes SSO attributes for a user without a browser round trip.
	///
	/// The attributes are signed into the query string and also sent as form parameters.
	pub fn sync_sso(
		&self,
		secret: &str,
		attributes: &[(&str, &str)],
	) -> Result<Option<JsonValue>> {
		let query = sso::signed_payload(secret, attributes)?;
		let params = attributes.iter().map(|(key, value)| (*key, *value)).collect::<Params>();
		let path = format!("{}?{query}", catalog::SYNC_SSO.path);

		self.execute(&ApiRequest::post(path).with_params(params))
	}

	/// Updates site settings, one request per setting.
	///
	/// Spaces in setting names become underscores. Stops at the first failure.
	pub fn site_settings(&self, settings: Params) -> Result<()> {
		for (name, value) in settings.iter() {
			let setting = name.replace(' ', "_");
			let params = Params::new().with(setting.as_str(), value.clone());

			self.call(&catalog::SITE_SETTING, &[("setting", setting.as_str())], params)?;
		}

		Ok(())
	}

	/// Creates a category, resolving its parent by name when one is set.
	pub fn create_category(
		&self,
		category: NewCategory,
		extra: Params,
	) -> Result<Option<JsonValue>> {
		let mut params = Params::new()
			.with("name", category.name)
			.with("color", category.color)
			.with("text_color", category.text_color);

		for (group, level) in category.permissions {
			params.insert(format!("permissions[{group}]"), level);
		}

		if let Some(parent) = category.parent {
			let categories =
				self.call_as::<Vec<CategorySummary>>(&catalog::CATEGORIES, &[], Params::new())?;
			// The last category carrying the name wins.
			let Some(found) = categories.into_iter().rev().find(|c| c.name == parent) else {
				return Err(Error::Client {
					message: format!("{parent} not found"),
					status: 404,
					body: String::new(),
				});
			};

			params.insert("parent_category_id", found.id);
		}

		self.call(&catalog::CREATE_CATEGORY, &[], with_extra(params, extra))
	}

	/// Records reading time for a topic; `timings` maps post numbers to milliseconds.
	pub fn topic_timings(
		&self,
		topic_id: u64,
		time: u64,
		timings: &[(u64, u64)],
		extra: Params,
	) -> Result<Option<JsonValue>> {
		let mut params = Params::new().with("topic_id", topic_id).with("topic_time", time);

		for (post_number, ms) in timings {
			params.insert(format!("timings[{post_number}]"), *ms);
		}

		self.call(&catalog::TOPIC_TIMINGS, &[], with_extra(params, extra))
	}

	/// Fetches posts of a topic; an empty `post_ids` returns the first page of the stream.
	pub fn posts(
		&self,
		topic_id: u64,
		post_ids: &[u64],
		extra: Params,
	) -> Result<Option<JsonValue>> {
		let mut params = Params::new();

		if !post_ids.is_empty() {
			params.insert("post_ids[]", post_ids.to_vec());
		}

		let topic_id = topic_id.to_string();
		let args = [("topic_id", topic_id.as_str())];

		self.call(&catalog::TOPIC_POSTS, &args, with_extra(params, extra))
	}
}

/// Formats the `suspend_until` timestamp `days` days after `now`, in UTC.
pub fn suspend_until(now: OffsetDateTime, days: u32) -> Result<String, ConfigError> {
	now.to_offset(UtcOffset::UTC)
		.saturating_add(time::Duration::days(days.into()))
		.format(SUSPEND_UNTIL_FORMAT)
		.map_err(ConfigError::request_build)
}

// Named parameters win over same-named extras.
fn with_extra(mut params: Params, extra: Params) -> Params {
	for (key, value) in extra.iter() {
		params.insert_default(key, value.clone());
	}

	params
}
