use scoreline_ui as ui;
use wasm_bindgen::prelude::*;

mod config;
mod error;
mod progression_chart;

pub use self::config::PageConfig;
pub use self::error::Error;
pub use self::progression_chart::{boot_progression_chart, progression_chart_options};

/// Each feature boots even if another fails. The first failure is returned so it surfaces in the console.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
	console_error_panic_hook::set_once();
	let config = PageConfig::default();
	let chart = boot_progression_chart(&config);
	let widths = ui::boot_data_widths(&config.width_attr).map_err(Error::from);
	let tabs = ui::boot_comparison_tabs(&config.tab_selector, &config.content_selector)
		.map(|_| ())
		.map_err(Error::from);
	chart.and(widths).and(tabs).map_err(JsValue::from)
}
