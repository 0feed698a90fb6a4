//! Plays the identity provider side of Discourse SSO: validates the inbound payload, then
//! builds the signed redirect that logs the user in.

// crates.io
use color_eyre::Result;
// self
use discourse_client::sso;

const SECRET: &str = "d836444a9e4084d5b224a60c208dce14";

fn main() -> Result<()> {
	color_eyre::install()?;

	let payload = "bm9uY2U9Y2I2ODI1MWVlZmI1MjExZTU4YzAwZmYxMzk1ZjBjMGI%3D%0A";
	let signature = "2828aa29899722b35a2f191d34ef9b3ce695e0e6eeec47deb46d588d70c7cb56";
	let nonce = sso::validate(Some(payload), Some(signature), SECRET)?;
	let redirect = sso::redirect_url(
		&nonce,
		SECRET,
		"sam@example.com",
		"42",
		"sam",
		[("name", "Sam"), ("admin", "false")],
	)?;

	println!("Nonce: {nonce}.");
	println!("Redirect the browser to https://forum.example.com{redirect}.");

	Ok(())
}
