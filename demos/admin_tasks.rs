//! Runs a few admin calls against a mock Discourse site: creating a subcategory, updating a
//! site setting, and listing categories.

// std
use std::time::Duration;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use discourse_client::{
	client::{Client, NewCategory},
	endpoint::catalog,
	engine::RetryPolicy,
	http::{JSON_CONTENT_TYPE, Params},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start();
	let categories = server.mock(|when, then| {
		when.method(GET).path("/categories.json");
		then.status(200)
			.header("content-type", JSON_CONTENT_TYPE)
			.body("{\"category_list\":{\"categories\":[{\"id\":4,\"name\":\"Meta\"}]}}");
	});
	let create = server.mock(|when, then| {
		when.method(POST).path("/categories");
		then.status(200)
			.header("content-type", JSON_CONTENT_TYPE)
			.body("{\"category\":{\"id\":9,\"name\":\"Feedback\"}}");
	});
	let settings = server.mock(|when, then| {
		when.method(PUT).path("/admin/site_settings/title");
		then.status(200).header("content-type", "text/plain; charset=utf-8").body("");
	});
	let client = Client::builder(server.base_url(), "system", "demo-key")
		.timeout(Duration::from_secs(5))
		.retry_policy(RetryPolicy::default().with_backoff(Duration::from_millis(100)))
		.build()?;
	let category = client.create_category(
		NewCategory::new("Feedback", "F7941D").parent("Meta"),
		Params::new().with("position", 2),
	)?;

	client.site_settings(Params::new().with("title", "Demo Forum"))?;

	let categories_listing = client.call(&catalog::CATEGORIES, &[], Params::new())?;

	println!("Created: {category:?}.");
	println!("Categories: {categories_listing:?}.");

	categories.assert_calls(2);
	create.assert();
	settings.assert();

	Ok(())
}
