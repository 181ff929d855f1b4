#![warn(clippy::pedantic)]

use wasm_bindgen::{prelude::wasm_bindgen, JsError};

/// Converts the HTML of a schedule page into an iCalendar string. `user` is
/// only used to keep event UIDs unique.
#[wasm_bindgen]
pub fn from_html(html: &str, user: &str) -> Result<String, JsError> {
	let config = ucsc2ics_core::Config::default();
	let calendar = ucsc2ics_core::from_html(html, user, &config)?;

	Ok(calendar.to_string())
}
