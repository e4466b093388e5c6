use crate::util::query_html_elements;
use wasm_bindgen::JsValue;

/// Turns a percentage from a `data-width` attribute into a css width. Decimal commas from the server locale become dots. Returns `None` for an empty value.
pub fn normalize_width(value: &str) -> Option<String> {
	if value.is_empty() {
		return None;
	}
	Some(format!("{}%", value.replacen(',', ".", 1)))
}

/// Sets the inline width of every element carrying `attribute`. Values the style engine rejects are ignored by it.
pub fn boot_data_widths(attribute: &str) -> Result<(), JsValue> {
	for element in query_html_elements(&format!("[{}]", attribute))? {
		let width = match element
			.get_attribute(attribute)
			.and_then(|value| normalize_width(&value))
		{
			Some(width) => width,
			None => continue,
		};
		element.style().set_property("width", &width)?;
	}
	Ok(())
}

#[test]
fn test_normalize_width() {
	assert_eq!(normalize_width("45,5"), Some("45.5%".to_owned()));
	assert_eq!(normalize_width("45.5"), Some("45.5%".to_owned()));
	assert_eq!(normalize_width("100"), Some("100%".to_owned()));
	assert_eq!(normalize_width(""), None);
	// Only the decimal separator is rewritten.
	assert_eq!(normalize_width("1,2,3"), Some("1.2,3%".to_owned()));
	assert_eq!(normalize_width("wide"), Some("wide%".to_owned()));
}

#[test]
fn test_normalize_width_is_idempotent() {
	let once = normalize_width("33,3").unwrap();
	let twice = normalize_width(once.trim_end_matches('%')).unwrap();
	assert_eq!(once, twice);
}
