/// Where the page client finds its inputs in the markup.
#[derive(Debug, Clone)]
pub struct PageConfig {
	pub mount_id: String,
	pub payload_attr: String,
	pub width_attr: String,
	pub tab_selector: String,
	pub content_selector: String,
}

impl Default for PageConfig {
	fn default() -> PageConfig {
		PageConfig {
			mount_id: "progressionChart".to_owned(),
			payload_attr: "data-chart".to_owned(),
			width_attr: "data-width".to_owned(),
			tab_selector: ".comparison-tab".to_owned(),
			content_selector: ".comparison-content".to_owned(),
		}
	}
}
