use wasm_bindgen::{JsCast, JsValue};

pub(crate) fn document() -> Result<web_sys::Document, JsValue> {
	web_sys::window()
		.and_then(|window| window.document())
		.ok_or_else(|| JsValue::from_str("no global document"))
}

/// Collects the html elements matching `selector`, in document order.
pub(crate) fn query_html_elements(selector: &str) -> Result<Vec<web_sys::HtmlElement>, JsValue> {
	let node_list = document()?.query_selector_all(selector)?;
	let mut elements = Vec::with_capacity(node_list.length() as usize);
	for index in 0..node_list.length() {
		if let Some(element) = node_list
			.item(index)
			.and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
		{
			elements.push(element);
		}
	}
	Ok(elements)
}
