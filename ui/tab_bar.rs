use crate::util::query_html_elements;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{console, HtmlElement};

/// The key a tab or content block carries. The attribute may be missing, and two missing keys match.
pub type TabKey = Option<String>;

/// Which tab was clicked last. `None` until the first click, when the markup alone decides what is shown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabSelection {
	selected: Option<TabKey>,
}

impl TabSelection {
	pub fn new() -> TabSelection {
		TabSelection::default()
	}

	pub fn select(&mut self, key: TabKey) {
		self.selected = Some(key);
	}

	pub fn selected(&self) -> Option<&TabKey> {
		self.selected.as_ref()
	}

	/// Whether the content block with `content_key` is visible. Before any selection nothing is decided here.
	pub fn shows(&self, content_key: &TabKey) -> Option<bool> {
		self.selected.as_ref().map(|selected| selected == content_key)
	}
}

const TAB_ACTIVE_CLASS: &str = "active";

fn tab_key(tab: &HtmlElement) -> TabKey {
	tab.get_attribute("data-tab")
}

fn content_key(content: &HtmlElement) -> TabKey {
	content.get_attribute("data-content")
}

fn set_tab_style(tab: &HtmlElement, active: bool) -> Result<(), JsValue> {
	let style = tab.style();
	if active {
		tab.class_list().add_1(TAB_ACTIVE_CLASS)?;
		style.set_property("background", "#fff")?;
		style.set_property("font-weight", "bold")?;
		style.set_property("border-bottom", "2px solid #0066cc")?;
	} else {
		tab.class_list().remove_1(TAB_ACTIVE_CLASS)?;
		style.set_property("background", "transparent")?;
		style.set_property("font-weight", "normal")?;
		style.set_property("border-bottom", "none")?;
	}
	Ok(())
}

fn select_tab(
	tabs: &[HtmlElement],
	contents: &[HtmlElement],
	selection: &RefCell<TabSelection>,
	tab_index: usize,
) -> Result<(), JsValue> {
	let clicked = &tabs[tab_index];
	selection.borrow_mut().select(tab_key(clicked));
	for tab in tabs.iter() {
		set_tab_style(tab, false)?;
	}
	set_tab_style(clicked, true)?;
	let selection = selection.borrow();
	for content in contents.iter() {
		let display = if selection.shows(&content_key(content)) == Some(true) {
			"block"
		} else {
			"none"
		};
		content.style().set_property("display", display)?;
	}
	Ok(())
}

/// Wires the comparison tabs. Clicking a tab makes it the only active tab and shows only the content blocks whose `data-content` matches its `data-tab`.
pub fn boot_comparison_tabs(
	tab_selector: &str,
	content_selector: &str,
) -> Result<Rc<RefCell<TabSelection>>, JsValue> {
	let tabs = Rc::new(query_html_elements(tab_selector)?);
	let contents = Rc::new(query_html_elements(content_selector)?);
	let selection = Rc::new(RefCell::new(TabSelection::new()));
	for tab_index in 0..tabs.len() {
		let callback_fn = {
			let tabs = tabs.clone();
			let contents = contents.clone();
			let selection = selection.clone();
			Closure::wrap(Box::new(move || {
				if let Err(error) = select_tab(&tabs, &contents, &selection, tab_index) {
					console::error_1(&error);
				}
			}) as Box<dyn FnMut()>)
		};
		tabs[tab_index]
			.add_event_listener_with_callback("click", callback_fn.as_ref().unchecked_ref())?;
		callback_fn.forget();
	}
	Ok(selection)
}

#[test]
fn test_tab_selection() {
	let mut selection = TabSelection::new();
	assert_eq!(selection.selected(), None);
	assert_eq!(selection.shows(&Some("summary".to_owned())), None);
	selection.select(Some("h2h".to_owned()));
	assert_eq!(selection.shows(&Some("h2h".to_owned())), Some(true));
	assert_eq!(selection.shows(&Some("summary".to_owned())), Some(false));
	// Selection is unconditional, including reselecting the same tab.
	selection.select(Some("summary".to_owned()));
	selection.select(Some("summary".to_owned()));
	assert_eq!(selection.selected(), Some(&Some("summary".to_owned())));
	assert_eq!(selection.shows(&Some("h2h".to_owned())), Some(false));
}

#[test]
fn test_tab_selection_missing_keys() {
	let mut selection = TabSelection::new();
	selection.select(None);
	assert_eq!(selection.shows(&None), Some(true));
	assert_eq!(selection.shows(&Some("summary".to_owned())), Some(false));
}
