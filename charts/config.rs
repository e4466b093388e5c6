pub struct ChartConfig {
	pub bottom_padding: f64,
	pub font: &'static str,
	pub font_size: f64,
	pub label_padding: f64,
	pub left_padding: f64,
	pub legend_item_gap: f64,
	/// Grid lines closer together than this are thinned out by picking a larger interval.
	pub min_grid_line_distance: f64,
	pub right_padding: f64,
	pub top_padding: f64,
}

pub struct ChartColors {
	pub fallback_bar_color: &'static str,
	pub grid_line_color: &'static str,
	pub label_color: &'static str,
}

pub const CHART_CONFIG: ChartConfig = ChartConfig {
	bottom_padding: 4.0,
	font: "12px sans-serif",
	font_size: 12.0,
	label_padding: 8.0,
	left_padding: 4.0,
	legend_item_gap: 16.0,
	min_grid_line_distance: 32.0,
	right_padding: 4.0,
	top_padding: 4.0,
};

pub const LIGHT_CHART_COLORS: ChartColors = ChartColors {
	fallback_bar_color: "#0A84FF",
	grid_line_color: "#EEEEEE",
	label_color: "#666666",
};

pub const DARK_CHART_COLORS: ChartColors = ChartColors {
	fallback_bar_color: "#0A84FF",
	grid_line_color: "#333333",
	label_color: "#AAAAAA",
};
