use crate::{
	bar_chart::{bar_extent, draw_bar, stack_bars, BarExtentOptions, BarSegment, DrawBarOptions},
	chart::{ChartImpl, DrawChartOptions},
	common::{
		category_center, compute_axis_range, compute_grid_line_info, compute_grid_line_interval,
		draw_x_axis_labels, draw_y_axis_grid_lines, draw_y_axis_labels, format_number,
		value_to_pixel, DrawXAxisLabelsOptions, DrawYAxisGridLinesOptions, DrawYAxisLabelsOptions,
		GridLineInfo, Point, Rect,
	},
	line_chart::{draw_line, draw_point, DrawLineOptions, DrawPointOptions},
};
use std::cmp::Reverse;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// A chart that plots line and bar series against shared categories, each series on its own value axis.
pub struct MixedChart;

impl ChartImpl for MixedChart {
	type Options = MixedChartOptions;

	fn draw_chart(options: DrawChartOptions<Self::Options>) -> Result<(), JsValue> {
		draw_mixed_chart(options)
	}
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MixedChartOptions {
	pub axes: Vec<MixedChartAxis>,
	/// Fraction of each bar slot the bar fills. Defaults to 0.9.
	pub bar_percentage: Option<f64>,
	/// Fraction of each category the bars of that category fill. Defaults to 0.8.
	pub category_percentage: Option<f64>,
	pub hide_legend: Option<bool>,
	pub labels: Vec<String>,
	pub series: Vec<MixedChartSeries>,
	pub x_axis: MixedChartXAxis,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct MixedChartXAxis {
	pub display: bool,
	pub stacked: bool,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MixedChartAxis {
	pub display: bool,
	pub draw_grid_lines: bool,
	pub draw_labels: bool,
	pub grid_line_color: Option<String>,
	pub id: String,
	pub stacked: bool,
}

impl MixedChartAxis {
	fn hidden(id: &str) -> MixedChartAxis {
		MixedChartAxis {
			display: false,
			draw_grid_lines: false,
			draw_labels: false,
			grid_line_color: None,
			id: id.to_owned(),
			stacked: false,
		}
	}
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum MixedChartSeries {
	#[serde(rename = "line")]
	Line(LineSeries),
	#[serde(rename = "bar")]
	Bar(BarSeries),
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LineSeries {
	pub axis_id: String,
	pub color: String,
	pub data: Vec<f64>,
	pub line_width: f64,
	pub order: usize,
	pub point_radius: f64,
	pub title: Option<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BarSeries {
	pub axis_id: String,
	/// One color per bar. Shorter lists repeat.
	pub colors: Vec<String>,
	pub data: Vec<f64>,
	pub order: usize,
	pub title: Option<String>,
}

impl MixedChartSeries {
	pub fn axis_id(&self) -> &str {
		match self {
			MixedChartSeries::Line(series) => &series.axis_id,
			MixedChartSeries::Bar(series) => &series.axis_id,
		}
	}

	/// Series with a lower order are drawn on top.
	pub fn order(&self) -> usize {
		match self {
			MixedChartSeries::Line(series) => series.order,
			MixedChartSeries::Bar(series) => series.order,
		}
	}

	fn legend_item(&self) -> Option<(&str, &str)> {
		match self {
			MixedChartSeries::Line(series) => series
				.title
				.as_deref()
				.map(|title| (title, series.color.as_str())),
			MixedChartSeries::Bar(series) => match (&series.title, series.colors.first()) {
				(Some(title), Some(color)) => Some((title.as_str(), color.as_str())),
				_ => None,
			},
		}
	}
}

impl MixedChartOptions {
	fn axis(&self, id: &str) -> MixedChartAxis {
		self.axes
			.iter()
			.find(|axis| axis.id == id)
			.cloned()
			.unwrap_or_else(|| MixedChartAxis::hidden(id))
	}

	fn n_categories(&self) -> usize {
		if !self.labels.is_empty() {
			return self.labels.len();
		}
		self.series
			.iter()
			.map(|series| match series {
				MixedChartSeries::Line(series) => series.data.len(),
				MixedChartSeries::Bar(series) => series.data.len(),
			})
			.max()
			.unwrap_or(0)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisRange {
	pub id: String,
	pub max: f64,
	pub min: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarRect {
	pub category: usize,
	pub color: String,
	pub rect: Rect,
	pub segment: BarSegment,
	pub series_index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinePath {
	pub points: Vec<Point>,
	pub series_index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MixedChartLayout {
	pub bars: Vec<BarRect>,
	/// Series indexes in the order they are painted.
	pub draw_order: Vec<usize>,
	pub lines: Vec<LinePath>,
}

/// Computes the segments of every bar series, stacking the series that share a stacked axis.
fn compute_bar_segments(options: &MixedChartOptions) -> Vec<Option<Vec<BarSegment>>> {
	let mut segments = vec![None; options.series.len()];
	let mut axis_ids: Vec<&str> = Vec::new();
	for series in options.series.iter() {
		if let MixedChartSeries::Bar(series) = series {
			if !axis_ids.contains(&series.axis_id.as_str()) {
				axis_ids.push(&series.axis_id);
			}
		}
	}
	for axis_id in axis_ids {
		let stacked = options.axis(axis_id).stacked;
		let series_indexes: Vec<usize> = options
			.series
			.iter()
			.enumerate()
			.filter(|(_, series)| {
				matches!(series, MixedChartSeries::Bar(_)) && series.axis_id() == axis_id
			})
			.map(|(series_index, _)| series_index)
			.collect();
		let data: Vec<&[f64]> = series_indexes
			.iter()
			.filter_map(|series_index| match &options.series[*series_index] {
				MixedChartSeries::Bar(series) => Some(series.data.as_slice()),
				MixedChartSeries::Line(_) => None,
			})
			.collect();
		for (series_index, series_segments) in series_indexes
			.into_iter()
			.zip(stack_bars(&data, stacked))
		{
			segments[series_index] = Some(series_segments);
		}
	}
	segments
}

/// Computes the range of every axis a series is plotted against, in the order the axes are first referenced.
pub fn compute_axis_ranges(options: &MixedChartOptions) -> Vec<AxisRange> {
	let segments = compute_bar_segments(options);
	let mut ids: Vec<&str> = options.axes.iter().map(|axis| axis.id.as_str()).collect();
	for series in options.series.iter() {
		if !ids.contains(&series.axis_id()) {
			ids.push(series.axis_id());
		}
	}
	ids.into_iter()
		.map(|id| {
			let mut values = Vec::new();
			let mut has_bars = false;
			for (series_index, series) in options.series.iter().enumerate() {
				if series.axis_id() != id {
					continue;
				}
				match series {
					MixedChartSeries::Line(series) => values.extend(series.data.iter().cloned()),
					MixedChartSeries::Bar(_) => {
						has_bars = true;
						if let Some(series_segments) = &segments[series_index] {
							for segment in series_segments {
								values.push(segment.start);
								values.push(segment.end);
							}
						}
					}
				}
			}
			let (min, max) = compute_axis_range(values.into_iter(), has_bars);
			AxisRange {
				id: id.to_owned(),
				max,
				min,
			}
		})
		.collect()
}

/// Lays out every bar and line inside `chart_box`.
pub fn compute_mixed_chart_layout(
	options: &MixedChartOptions,
	axis_ranges: &[AxisRange],
	chart_box: Rect,
	fallback_bar_color: &str,
) -> MixedChartLayout {
	let n_categories = options.n_categories();
	let segments = compute_bar_segments(options);
	let bar_percentage = options.bar_percentage.unwrap_or(0.9);
	let category_percentage = options.category_percentage.unwrap_or(0.8);
	let n_bar_series = options
		.series
		.iter()
		.filter(|series| matches!(series, MixedChartSeries::Bar(_)))
		.count();
	let n_stacks = if options.x_axis.stacked {
		1
	} else {
		n_bar_series
	};
	let range_for = |axis_id: &str| {
		axis_ranges
			.iter()
			.find(|range| range.id == axis_id)
			.map(|range| (range.min, range.max))
			.unwrap_or((-1.0, 1.0))
	};

	let mut bars = Vec::new();
	let mut lines = Vec::new();
	let mut bar_series_ordinal = 0;
	for (series_index, series) in options.series.iter().enumerate() {
		let (y_min, y_max) = range_for(series.axis_id());
		match series {
			MixedChartSeries::Bar(series) => {
				let stack_index = if options.x_axis.stacked {
					0
				} else {
					bar_series_ordinal
				};
				bar_series_ordinal += 1;
				let series_segments = match &segments[series_index] {
					Some(series_segments) => series_segments,
					None => continue,
				};
				for (category, segment) in series_segments.iter().take(n_categories).enumerate() {
					let (x, w) = bar_extent(BarExtentOptions {
						bar_percentage,
						category,
						category_percentage,
						chart_box: &chart_box,
						n_categories,
						n_stacks,
						stack_index,
					});
					let top = value_to_pixel(segment.start.max(segment.end), y_min, y_max, &chart_box);
					let bottom =
						value_to_pixel(segment.start.min(segment.end), y_min, y_max, &chart_box);
					let color = if series.colors.is_empty() {
						fallback_bar_color.to_owned()
					} else {
						series.colors[category % series.colors.len()].clone()
					};
					bars.push(BarRect {
						category,
						color,
						rect: Rect {
							h: bottom - top,
							w,
							x,
							y: top,
						},
						segment: *segment,
						series_index,
					});
				}
			}
			MixedChartSeries::Line(series) => {
				let points = series
					.data
					.iter()
					.take(n_categories)
					.enumerate()
					.filter(|(_, value)| value.is_finite())
					.map(|(category, value)| Point {
						x: category_center(&chart_box, n_categories, category),
						y: value_to_pixel(*value, y_min, y_max, &chart_box),
					})
					.collect();
				lines.push(LinePath {
					points,
					series_index,
				});
			}
		}
	}

	let mut draw_order: Vec<usize> = (0..options.series.len()).collect();
	draw_order.sort_by_key(|series_index| Reverse(options.series[*series_index].order()));

	MixedChartLayout {
		bars,
		draw_order,
		lines,
	}
}

fn draw_mixed_chart(options: DrawChartOptions<MixedChartOptions>) -> Result<(), JsValue> {
	let DrawChartOptions {
		chart_colors,
		chart_config,
		ctx,
		height,
		options,
		width,
	} = options;
	let font_size = chart_config.font_size;
	let label_padding = chart_config.label_padding;

	let legend_items: Vec<(&str, &str)> = if options.hide_legend.unwrap_or(false) {
		Vec::new()
	} else {
		options
			.series
			.iter()
			.filter_map(|series| series.legend_item())
			.collect()
	};
	let legend_height = if legend_items.is_empty() {
		0.0
	} else {
		font_size + label_padding
	};
	let x_axis_labels_height = if options.x_axis.display {
		font_size + label_padding
	} else {
		0.0
	};
	let chart_height = height
		- chart_config.top_padding
		- legend_height
		- x_axis_labels_height
		- chart_config.bottom_padding;

	// Grid lines and labels are computed before the chart box because the labels' width narrows it.
	let axis_ranges = compute_axis_ranges(options);
	let mut grid_lines: Vec<(MixedChartAxis, &AxisRange, GridLineInfo)> = Vec::new();
	for axis_range in axis_ranges.iter() {
		let axis = options.axis(&axis_range.id);
		if !axis.display || !(axis.draw_grid_lines || axis.draw_labels) {
			continue;
		}
		let interval = compute_grid_line_interval(
			axis_range.min,
			axis_range.max,
			chart_height,
			chart_config.min_grid_line_distance,
		);
		let grid_line_info = compute_grid_line_info(axis_range.min, axis_range.max, interval);
		grid_lines.push((axis, axis_range, grid_line_info));
	}
	let mut y_axis_labels_width: f64 = 0.0;
	for (axis, _, grid_line_info) in grid_lines.iter() {
		if !axis.draw_labels {
			continue;
		}
		for value in grid_line_info.values() {
			let label_width = ctx.measure_text(&format_number(value))?.width();
			y_axis_labels_width = y_axis_labels_width.max(label_width + label_padding);
		}
	}

	let chart_box = Rect {
		h: chart_height,
		w: width - chart_config.left_padding - y_axis_labels_width - chart_config.right_padding,
		x: chart_config.left_padding + y_axis_labels_width,
		y: chart_config.top_padding + legend_height,
	};
	if chart_box.w <= 0.0 || chart_box.h <= 0.0 {
		return Ok(());
	}

	draw_legend(DrawLegendOptions {
		ctx: &ctx,
		font_size,
		gap: chart_config.legend_item_gap,
		items: &legend_items,
		label_color: chart_colors.label_color,
		x: chart_box.x,
		y: chart_config.top_padding,
	})?;

	for (axis, axis_range, grid_line_info) in grid_lines.iter() {
		if axis.draw_grid_lines {
			draw_y_axis_grid_lines(DrawYAxisGridLinesOptions {
				chart_box,
				color: axis
					.grid_line_color
					.as_deref()
					.unwrap_or(chart_colors.grid_line_color),
				ctx: &ctx,
				grid_line_info,
				y_max: axis_range.max,
				y_min: axis_range.min,
			});
		}
		if axis.draw_labels {
			draw_y_axis_labels(DrawYAxisLabelsOptions {
				chart_box,
				color: chart_colors.label_color,
				ctx: &ctx,
				grid_line_info,
				label_padding,
				y_max: axis_range.max,
				y_min: axis_range.min,
			})?;
		}
	}

	if options.x_axis.display {
		draw_x_axis_labels(DrawXAxisLabelsOptions {
			chart_box,
			color: chart_colors.label_color,
			ctx: &ctx,
			label_padding,
			labels: &options.labels,
		})?;
	}

	let layout = compute_mixed_chart_layout(
		options,
		&axis_ranges,
		chart_box,
		chart_colors.fallback_bar_color,
	);
	for series_index in layout.draw_order.iter().cloned() {
		match &options.series[series_index] {
			MixedChartSeries::Bar(_) => {
				for bar in layout
					.bars
					.iter()
					.filter(|bar| bar.series_index == series_index)
				{
					draw_bar(DrawBarOptions {
						color: &bar.color,
						ctx: &ctx,
						rect: bar.rect,
					});
				}
			}
			MixedChartSeries::Line(series) => {
				let points = match layout
					.lines
					.iter()
					.find(|line| line.series_index == series_index)
				{
					Some(line) => &line.points,
					None => continue,
				};
				draw_line(DrawLineOptions {
					color: &series.color,
					ctx: &ctx,
					line_width: series.line_width,
					points,
				});
				for point in points.iter() {
					draw_point(DrawPointOptions {
						color: &series.color,
						ctx: &ctx,
						point: *point,
						radius: series.point_radius,
					})?;
				}
			}
		}
	}
	Ok(())
}

struct DrawLegendOptions<'a> {
	ctx: &'a CanvasRenderingContext2d,
	font_size: f64,
	gap: f64,
	items: &'a [(&'a str, &'a str)],
	label_color: &'a str,
	x: f64,
	y: f64,
}

fn draw_legend(options: DrawLegendOptions) -> Result<(), JsValue> {
	let DrawLegendOptions {
		ctx,
		font_size,
		gap,
		items,
		label_color,
		mut x,
		y,
	} = options;
	ctx.save();
	ctx.set_text_baseline("middle");
	ctx.set_text_align("left");
	for (title, color) in items.iter() {
		ctx.set_fill_style(&JsValue::from_str(color));
		ctx.fill_rect(x, y, font_size, font_size);
		x += font_size + 4.0;
		ctx.set_fill_style(&JsValue::from_str(label_color));
		ctx.fill_text(title, x, y + font_size / 2.0)?;
		x += ctx.measure_text(title)?.width() + gap;
	}
	ctx.restore();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn options(series: Vec<MixedChartSeries>, labels: &[&str]) -> MixedChartOptions {
		MixedChartOptions {
			axes: vec![
				MixedChartAxis::hidden("line"),
				MixedChartAxis {
					display: true,
					draw_grid_lines: true,
					draw_labels: false,
					grid_line_color: None,
					id: "bar".to_owned(),
					stacked: true,
				},
			],
			bar_percentage: Some(1.0),
			category_percentage: Some(1.0),
			hide_legend: Some(true),
			labels: labels.iter().map(|label| label.to_string()).collect(),
			series,
			x_axis: MixedChartXAxis {
				display: false,
				stacked: true,
			},
		}
	}

	fn line(data: Vec<f64>, order: usize) -> MixedChartSeries {
		MixedChartSeries::Line(LineSeries {
			axis_id: "line".to_owned(),
			color: "#0066cc".to_owned(),
			data,
			line_width: 2.0,
			order,
			point_radius: 0.0,
			title: None,
		})
	}

	fn bar(data: Vec<f64>, colors: &[&str], order: usize) -> MixedChartSeries {
		MixedChartSeries::Bar(BarSeries {
			axis_id: "bar".to_owned(),
			colors: colors.iter().map(|color| color.to_string()).collect(),
			data,
			order,
			title: None,
		})
	}

	const CHART_BOX: Rect = Rect {
		h: 100.0,
		w: 200.0,
		x: 0.0,
		y: 0.0,
	};

	#[test]
	fn test_axis_ranges_are_per_axis() {
		let options = options(
			vec![
				line(vec![3.0, 6.0], 1),
				bar(vec![2.0, 1.0], &["#28a745"], 2),
				bar(vec![-1.0, 0.0], &["#28a745"], 2),
			],
			&["M1", "M2"],
		);
		let ranges = compute_axis_ranges(&options);
		assert_eq!(
			ranges,
			vec![
				AxisRange {
					id: "line".to_owned(),
					max: 6.0,
					min: 3.0,
				},
				AxisRange {
					id: "bar".to_owned(),
					max: 2.0,
					min: -1.0,
				},
			]
		);
	}

	#[test]
	fn test_line_is_drawn_above_bars() {
		let options = options(
			vec![
				line(vec![1.0], 1),
				bar(vec![1.0], &["#28a745"], 2),
				bar(vec![0.0], &["#28a745"], 2),
			],
			&["M1"],
		);
		let ranges = compute_axis_ranges(&options);
		let layout = compute_mixed_chart_layout(&options, &ranges, CHART_BOX, "#000");
		assert_eq!(layout.draw_order, vec![1, 2, 0]);
	}

	#[test]
	fn test_stacked_bars_share_a_slot() {
		let options = options(
			vec![
				bar(vec![2.0, 1.0], &["#28a745", "#dc3545"], 2),
				bar(vec![-2.0, -1.0], &["#28a745", "#dc3545"], 2),
			],
			&["M1", "M2"],
		);
		let ranges = compute_axis_ranges(&options);
		let layout = compute_mixed_chart_layout(&options, &ranges, CHART_BOX, "#000");
		assert_eq!(layout.bars.len(), 4);
		let first_category: Vec<&BarRect> = layout
			.bars
			.iter()
			.filter(|bar| bar.category == 0)
			.collect();
		// Both series occupy the full category width and meet at the zero line.
		for bar in first_category.iter() {
			assert!((bar.rect.x - 0.0).abs() < 1e-9);
			assert!((bar.rect.w - 100.0).abs() < 1e-9);
			assert!((bar.rect.h - 50.0).abs() < 1e-9);
			assert_eq!(bar.color, "#28a745");
		}
		assert!((first_category[0].rect.y - 0.0).abs() < 1e-9);
		assert!((first_category[1].rect.y - 50.0).abs() < 1e-9);
		let second = layout
			.bars
			.iter()
			.find(|bar| bar.category == 1 && bar.series_index == 0)
			.unwrap();
		assert_eq!(second.color, "#dc3545");
	}

	#[test]
	fn test_bar_colors_repeat_and_fall_back() {
		let options = options(
			vec![bar(vec![1.0, 1.0], &["#111111"], 2), bar(vec![1.0], &[], 2)],
			&["M1", "M2"],
		);
		let ranges = compute_axis_ranges(&options);
		let layout = compute_mixed_chart_layout(&options, &ranges, CHART_BOX, "#000000");
		assert!(layout
			.bars
			.iter()
			.filter(|bar| bar.series_index == 0)
			.all(|bar| bar.color == "#111111"));
		assert!(layout
			.bars
			.iter()
			.filter(|bar| bar.series_index == 1)
			.all(|bar| bar.color == "#000000"));
	}

	#[test]
	fn test_line_points_are_centered_in_categories() {
		let options = options(vec![line(vec![0.0, 10.0], 1)], &["M1", "M2"]);
		let ranges = compute_axis_ranges(&options);
		let layout = compute_mixed_chart_layout(&options, &ranges, CHART_BOX, "#000");
		assert_eq!(
			layout.lines[0].points,
			vec![Point { x: 50.0, y: 100.0 }, Point { x: 150.0, y: 0.0 }]
		);
	}

	#[test]
	fn test_options_round_trip_through_json() {
		let options = options(vec![line(vec![1.0], 1)], &["M1"]);
		let json = serde_json::to_string(&options).unwrap();
		assert!(json.contains(r#""type":"line""#));
		let parsed: MixedChartOptions = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed.labels, vec!["M1".to_owned()]);
	}
}
