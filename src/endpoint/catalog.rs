//! Descriptors for the Discourse endpoints this client knows about.

// self
use crate::{endpoint::Endpoint, http::Verb};

/// `GET /users/{username}.json`, returning the `user` object.
pub const USER: Endpoint =
	Endpoint::new("user", Verb::Get, "/users/{username}.json").extracting("/user");
/// `GET /users/by-external/{external_id}`, returning the `user` object.
pub const USER_BY_EXTERNAL_ID: Endpoint =
	Endpoint::new("user_by_external_id", Verb::Get, "/users/by-external/{external_id}")
		.extracting("/user");
/// Honeypot challenge required before creating a user.
pub const HONEYPOT: Endpoint = Endpoint::new("honeypot", Verb::Get, "/session/hp.json");
/// Creates a user.
pub const CREATE_USER: Endpoint = Endpoint::new("create_user", Verb::Post, "/users");
/// Logs a user out everywhere.
pub const LOG_OUT: Endpoint =
	Endpoint::new("log_out", Verb::Post, "/admin/users/{user_id}/log_out");
/// Sets a user's trust level (`level`).
pub const TRUST_LEVEL: Endpoint =
	Endpoint::new("trust_level", Verb::Put, "/admin/users/{user_id}/trust_level");
/// Suspends a user (`suspend_until`, `reason`).
pub const SUSPEND: Endpoint = Endpoint::new("suspend", Verb::Put, "/admin/users/{user_id}/suspend");
/// Lifts a suspension.
pub const UNSUSPEND: Endpoint =
	Endpoint::new("unsuspend", Verb::Put, "/admin/users/{user_id}/unsuspend");
/// Lists users by filter (`active`, `new`, `staff`, ...).
pub const LIST_USERS: Endpoint =
	Endpoint::new("list_users", Verb::Get, "/admin/users/list/{filter}.json");
/// Uploads an avatar (`file` attachment or URL).
pub const UPDATE_AVATAR: Endpoint =
	Endpoint::new("update_avatar", Verb::Post, "/users/{username}/preferences/avatar");
/// Toggles between uploaded avatar and gravatar (`use_uploaded_avatar`).
pub const TOGGLE_GRAVATAR: Endpoint =
	Endpoint::new("toggle_gravatar", Verb::Put, "/users/{username}/preferences/avatar/toggle");
/// Picks an avatar.
pub const PICK_AVATAR: Endpoint =
	Endpoint::new("pick_avatar", Verb::Put, "/users/{username}/preferences/avatar/pick");
/// Changes a user's email (`email`).
pub const UPDATE_EMAIL: Endpoint =
	Endpoint::new("update_email", Verb::Put, "/users/{username}/preferences/email");
/// Updates user fields.
pub const UPDATE_USER: Endpoint = Endpoint::new("update_user", Verb::Put, "/users/{username}");
/// Renames a user (`username`).
pub const UPDATE_USERNAME: Endpoint =
	Endpoint::new("update_username", Verb::Put, "/users/{username}/preferences/username");
/// Generates a user API key.
pub const GENERATE_API_KEY: Endpoint =
	Endpoint::new("generate_api_key", Verb::Post, "/admin/users/{user_id}/generate_api_key");
/// Deletes a user (`block_email`, `block_ip`, `block_urls`).
pub const DELETE_USER: Endpoint =
	Endpoint::new("delete_user", Verb::Delete, "/admin/users/{user_id}.json");
/// Pushes SSO attributes for a user; the signed payload travels in the query string.
pub const SYNC_SSO: Endpoint = Endpoint::new("sync_sso", Verb::Post, "/admin/users/sync_sso");
/// Badges granted to a user.
pub const USER_BADGES: Endpoint =
	Endpoint::new("user_badges", Verb::Get, "/user-badges/{username}.json");
/// Private messages for a user.
pub const PRIVATE_MESSAGES: Endpoint =
	Endpoint::new("private_messages", Verb::Get, "/topics/private-messages/{username}.json");
/// Unread private messages for a user.
pub const PRIVATE_MESSAGES_UNREAD: Endpoint = Endpoint::new(
	"private_messages_unread",
	Verb::Get,
	"/topics/private-messages-unread/{username}.json",
);
/// Hot topics.
pub const HOT_TOPICS: Endpoint = Endpoint::new("hot_topics", Verb::Get, "/hot.json");
/// Latest topics.
pub const LATEST_TOPICS: Endpoint = Endpoint::new("latest_topics", Verb::Get, "/latest.json");
/// New topics.
pub const NEW_TOPICS: Endpoint = Endpoint::new("new_topics", Verb::Get, "/new.json");
/// A topic by slug and id.
pub const TOPIC: Endpoint = Endpoint::new("topic", Verb::Get, "/t/{slug}/{topic_id}.json");
/// Posts in a topic (`post_ids[]`).
pub const TOPIC_POSTS: Endpoint =
	Endpoint::new("topic_posts", Verb::Get, "/t/{topic_id}/posts.json");
/// Topics created by a user, returning the topic array.
pub const TOPICS_BY: Endpoint =
	Endpoint::new("topics_by", Verb::Get, "/topics/created-by/{username}.json")
		.extracting("/topic_list/topics");
/// Invites a user to a topic (`email`, `topic_id`).
pub const INVITE_USER_TO_TOPIC: Endpoint =
	Endpoint::new("invite_user_to_topic", Verb::Post, "/t/{topic_id}/invite.json");
/// Records reading time (`topic_id`, `topic_time`, `timings[n]`).
pub const TOPIC_TIMINGS: Endpoint = Endpoint::new("topic_timings", Verb::Post, "/topics/timings");
/// Latest posts across the site (`before`).
pub const LATEST_POSTS: Endpoint = Endpoint::new("latest_posts", Verb::Get, "/posts.json");
/// A post by topic and post number.
pub const POST_BY_NUMBER: Endpoint =
	Endpoint::new("post_by_number", Verb::Get, "/posts/by_number/{topic_id}/{post_number}");
/// Creates a post or topic (`raw`, `title`, `topic_id`, ...).
pub const CREATE_POST: Endpoint = Endpoint::new("create_post", Verb::Post, "/posts");
/// Edits a post (`post[raw]`, `post[edit_reason]`).
pub const UPDATE_POST: Endpoint = Endpoint::new("update_post", Verb::Put, "/posts/{post_id}");
/// Full-text search (`term`).
pub const SEARCH: Endpoint = Endpoint::new("search", Verb::Get, "/search.json");
/// All categories, returning the category array.
pub const CATEGORIES: Endpoint =
	Endpoint::new("categories", Verb::Get, "/categories.json")
		.extracting("/category_list/categories");
/// A category by slug path (`parent/child` for subcategories).
pub const CATEGORY: Endpoint = Endpoint::new("category", Verb::Get, "/c/{category}/show.json");
/// Latest topics of a category; Discourse redirects slug paths to their canonical form.
pub const CATEGORY_LATEST_TOPICS: Endpoint =
	Endpoint::new("category_latest_topics", Verb::Get, "/c/{category}/l/latest.json").following();
/// Creates a category.
pub const CREATE_CATEGORY: Endpoint = Endpoint::new("create_category", Verb::Post, "/categories");
/// Updates a category.
pub const UPDATE_CATEGORY: Endpoint =
	Endpoint::new("update_category", Verb::Put, "/categories/{category_id}").json();
/// Deletes a category.
pub const DELETE_CATEGORY: Endpoint =
	Endpoint::new("delete_category", Verb::Delete, "/categories/{category_id}");
/// Updates one site setting; the setting name is also the parameter key.
pub const SITE_SETTING: Endpoint =
	Endpoint::new("site_setting", Verb::Put, "/admin/site_settings/{setting}");
/// All groups.
pub const GROUPS: Endpoint =
	Endpoint::new("groups", Verb::Get, "/groups.json").extracting("/groups");
/// Adds group owners (`usernames`).
pub const ADD_GROUP_OWNER: Endpoint =
	Endpoint::new("add_group_owner", Verb::Put, "/admin/groups/{group_id}/owners.json");
/// Removes a group owner (`user_id`).
pub const DELETE_GROUP_OWNER: Endpoint =
	Endpoint::new("delete_group_owner", Verb::Delete, "/admin/groups/{group_id}/owners.json");
/// Adds group members (`usernames`).
pub const ADD_GROUP_MEMBER: Endpoint =
	Endpoint::new("add_group_member", Verb::Put, "/groups/{group_id}/members.json");
/// Removes a group member (`user_id`).
pub const DELETE_GROUP_MEMBER: Endpoint =
	Endpoint::new("delete_group_member", Verb::Delete, "/groups/{group_id}/members.json");
/// All badges.
pub const BADGES: Endpoint = Endpoint::new("badges", Verb::Get, "/admin/badges.json");
/// Grants a badge (`username`, `badge_id`).
pub const GRANT_BADGE: Endpoint = Endpoint::new("grant_badge", Verb::Post, "/user_badges");
/// Admin color schemes.
pub const COLOR_SCHEMES: Endpoint =
	Endpoint::new("color_schemes", Verb::Get, "/admin/color_schemes.json");
/// Creates a color scheme.
pub const CREATE_COLOR_SCHEME: Endpoint =
	Endpoint::new("create_color_scheme", Verb::Post, "/admin/color_schemes.json").json();
/// All tag groups.
pub const TAG_GROUPS: Endpoint =
	Endpoint::new("tag_groups", Verb::Get, "/tag_groups.json").extracting("/tag_groups");
/// One tag group.
pub const TAG_GROUP: Endpoint =
	Endpoint::new("tag_group", Verb::Get, "/tag_groups/{tag_group_id}.json")
		.extracting("/tag_group");
/// Creates a tag group.
pub const CREATE_TAG_GROUP: Endpoint =
	Endpoint::new("create_tag_group", Verb::Post, "/tag_groups").json();
/// Site about page.
pub const ABOUT: Endpoint = Endpoint::new("about", Verb::Get, "/about.json");

/// Every descriptor above, for lookups by name.
pub const ALL: &[Endpoint] = &[
	USER,
	USER_BY_EXTERNAL_ID,
	HONEYPOT,
	CREATE_USER,
	LOG_OUT,
	TRUST_LEVEL,
	SUSPEND,
	UNSUSPEND,
	LIST_USERS,
	UPDATE_AVATAR,
	TOGGLE_GRAVATAR,
	PICK_AVATAR,
	UPDATE_EMAIL,
	UPDATE_USER,
	UPDATE_USERNAME,
	GENERATE_API_KEY,
	DELETE_USER,
	SYNC_SSO,
	USER_BADGES,
	PRIVATE_MESSAGES,
	PRIVATE_MESSAGES_UNREAD,
	HOT_TOPICS,
	LATEST_TOPICS,
	NEW_TOPICS,
	TOPIC,
	TOPIC_POSTS,
	TOPICS_BY,
	INVITE_USER_TO_TOPIC,
	TOPIC_TIMINGS,
	LATEST_POSTS,
	POST_BY_NUMBER,
	CREATE_POST,
	UPDATE_POST,
	SEARCH,
	CATEGORIES,
	CATEGORY,
	CATEGORY_LATEST_TOPICS,
	CREATE_CATEGORY,
	UPDATE_CATEGORY,
	DELETE_CATEGORY,
	SITE_SETTING,
	GROUPS,
	ADD_GROUP_OWNER,
	DELETE_GROUP_OWNER,
	ADD_GROUP_MEMBER,
	DELETE_GROUP_MEMBER,
	BADGES,
	GRANT_BADGE,
	COLOR_SCHEMES,
	CREATE_COLOR_SCHEME,
	TAG_GROUPS,
	TAG_GROUP,
	CREATE_TAG_GROUP,
	ABOUT,
];

/// Looks a descriptor up by its name.
pub fn find(name: &str) -> Option<&'static Endpoint> {
	ALL.iter().find(|endpoint| endpoint.name == name)
}
