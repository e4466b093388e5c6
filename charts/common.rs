use itertools::{Itertools, MinMaxResult};
use num_traits::ToPrimitive;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub h: f64,
	pub w: f64,
	pub x: f64,
	pub y: f64,
}

// The interval is k * 10 ** p. k will always be 1, 2, or 5.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLineInterval {
	pub k: f64,
	pub p: i32,
}

impl GridLineInterval {
	pub fn value(&self) -> f64 {
		self.k * 10f64.powi(self.p)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridLineInfo {
	pub interval: f64,
	pub num_grid_lines: usize,
	pub start: f64,
}

impl GridLineInfo {
	pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
		(0..self.num_grid_lines).map(move |index| self.start + index as f64 * self.interval)
	}
}

/// Computes the range of an axis from the values plotted against it. Bar axes always include zero so bars grow from the baseline.
pub fn compute_axis_range(values: impl Iterator<Item = f64>, include_zero: bool) -> (f64, f64) {
	let (mut min, mut max) = match values.filter(|value| value.is_finite()).minmax() {
		MinMaxResult::NoElements => (0.0, 0.0),
		MinMaxResult::OneElement(value) => (value, value),
		MinMaxResult::MinMax(min, max) => (min, max),
	};
	if include_zero {
		min = min.min(0.0);
		max = max.max(0.0);
	}
	if (max - min).abs() < f64::EPSILON {
		min -= 1.0;
		max += 1.0;
	}
	(min, max)
}

pub fn compute_grid_line_interval(
	min: f64,
	max: f64,
	distance_pixels: f64,
	min_grid_line_distance_pixels: f64,
) -> GridLineInterval {
	let ideal_n = (distance_pixels / min_grid_line_distance_pixels)
		.floor()
		.max(1.0);
	let ideal_interval = (max - min) / ideal_n;
	let mut p = ideal_interval.log10().floor();
	let normalized = ideal_interval / 10f64.powf(p);
	let k = if normalized <= 1.0 {
		1.0
	} else if normalized <= 2.0 {
		2.0
	} else if normalized <= 5.0 {
		5.0
	} else {
		p += 1.0;
		1.0
	};
	GridLineInterval {
		k,
		p: p.to_i32().unwrap_or(0),
	}
}

pub fn compute_grid_line_info(min: f64, max: f64, interval: GridLineInterval) -> GridLineInfo {
	let interval = interval.value();
	let start = (min / interval).ceil() * interval;
	let num_grid_lines = if start > max {
		0
	} else {
		((max - start) / interval + 1e-9).floor().to_usize().unwrap_or(0) + 1
	};
	GridLineInfo {
		interval,
		num_grid_lines,
		start,
	}
}

/// Maps a value on an axis spanning `min..max` to a vertical pixel position inside `chart_box`.
pub fn value_to_pixel(value: f64, min: f64, max: f64, chart_box: &Rect) -> f64 {
	chart_box.y + chart_box.h - (value - min) / (max - min) * chart_box.h
}

pub fn category_center(chart_box: &Rect, n_categories: usize, category: usize) -> f64 {
	let category_width = chart_box.w / n_categories as f64;
	chart_box.x + category_width * (category as f64 + 0.5)
}

pub fn format_number(value: f64) -> String {
	if value.fract().abs() < f64::EPSILON {
		format!("{}", value.to_i64().unwrap_or(0))
	} else {
		let formatted = format!("{:.2}", value);
		formatted
			.trim_end_matches('0')
			.trim_end_matches('.')
			.to_owned()
	}
}

pub struct DrawYAxisGridLinesOptions<'a> {
	pub chart_box: Rect,
	pub color: &'a str,
	pub ctx: &'a CanvasRenderingContext2d,
	pub grid_line_info: &'a GridLineInfo,
	pub y_max: f64,
	pub y_min: f64,
}

pub fn draw_y_axis_grid_lines(options: DrawYAxisGridLinesOptions) {
	let DrawYAxisGridLinesOptions {
		chart_box,
		color,
		ctx,
		grid_line_info,
		y_max,
		y_min,
	} = options;
	ctx.save();
	ctx.set_stroke_style(&JsValue::from_str(color));
	ctx.set_line_width(1.0);
	for value in grid_line_info.values() {
		let y = value_to_pixel(value, y_min, y_max, &chart_box).round() + 0.5;
		ctx.begin_path();
		ctx.move_to(chart_box.x, y);
		ctx.line_to(chart_box.x + chart_box.w, y);
		ctx.stroke();
	}
	ctx.restore();
}

pub struct DrawYAxisLabelsOptions<'a> {
	pub chart_box: Rect,
	pub color: &'a str,
	pub ctx: &'a CanvasRenderingContext2d,
	pub grid_line_info: &'a GridLineInfo,
	pub label_padding: f64,
	pub y_max: f64,
	pub y_min: f64,
}

pub fn draw_y_axis_labels(options: DrawYAxisLabelsOptions) -> Result<(), JsValue> {
	let DrawYAxisLabelsOptions {
		chart_box,
		color,
		ctx,
		grid_line_info,
		label_padding,
		y_max,
		y_min,
	} = options;
	ctx.save();
	ctx.set_fill_style(&JsValue::from_str(color));
	ctx.set_text_align("right");
	ctx.set_text_baseline("middle");
	for value in grid_line_info.values() {
		let y = value_to_pixel(value, y_min, y_max, &chart_box);
		ctx.fill_text(&format_number(value), chart_box.x - label_padding, y)?;
	}
	ctx.restore();
	Ok(())
}

pub struct DrawXAxisLabelsOptions<'a> {
	pub chart_box: Rect,
	pub color: &'a str,
	pub ctx: &'a CanvasRenderingContext2d,
	pub label_padding: f64,
	pub labels: &'a [String],
}

pub fn draw_x_axis_labels(options: DrawXAxisLabelsOptions) -> Result<(), JsValue> {
	let DrawXAxisLabelsOptions {
		chart_box,
		color,
		ctx,
		label_padding,
		labels,
	} = options;
	ctx.save();
	ctx.set_fill_style(&JsValue::from_str(color));
	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	for (category, label) in labels.iter().enumerate() {
		let x = category_center(&chart_box, labels.len(), category);
		ctx.fill_text(label, x, chart_box.y + chart_box.h + label_padding)?;
	}
	ctx.restore();
	Ok(())
}

#[test]
fn test_compute_axis_range() {
	assert_eq!(compute_axis_range(vec![1.0, 3.0, 2.0].into_iter(), false), (1.0, 3.0));
	assert_eq!(compute_axis_range(vec![1.0, 3.0].into_iter(), true), (0.0, 3.0));
	assert_eq!(compute_axis_range(vec![-2.0, 0.2].into_iter(), true), (-2.0, 0.2));
	// A single value is widened on both sides.
	assert_eq!(compute_axis_range(vec![3.0].into_iter(), false), (2.0, 4.0));
	assert_eq!(compute_axis_range(std::iter::empty(), true), (-1.0, 1.0));
	assert_eq!(
		compute_axis_range(vec![f64::NAN, 5.0].into_iter(), false),
		(4.0, 6.0)
	);
}

#[test]
fn test_compute_grid_line_interval() {
	assert_eq!(
		compute_grid_line_interval(0.0, 10.0, 320.0, 32.0),
		GridLineInterval { k: 1.0, p: 0 }
	);
	assert_eq!(
		compute_grid_line_interval(-3.0, 5.0, 100.0, 32.0),
		GridLineInterval { k: 5.0, p: 0 }
	);
	assert_eq!(
		compute_grid_line_interval(0.0, 700.0, 100.0, 32.0),
		GridLineInterval { k: 5.0, p: 2 }
	);
	assert_eq!(
		compute_grid_line_interval(0.0, 8.0, 100.0, 32.0),
		GridLineInterval { k: 5.0, p: 0 }
	);
}

#[test]
fn test_compute_grid_line_info() {
	let info = compute_grid_line_info(-3.0, 5.0, GridLineInterval { k: 5.0, p: 0 });
	assert_eq!(info.values().collect::<Vec<_>>(), vec![0.0, 5.0]);
	let info = compute_grid_line_info(0.0, 10.0, GridLineInterval { k: 1.0, p: 0 });
	assert_eq!(info.num_grid_lines, 11);
	let info = compute_grid_line_info(0.1, 0.15, GridLineInterval { k: 1.0, p: 0 });
	assert_eq!(info.num_grid_lines, 0);
}

#[test]
fn test_value_to_pixel() {
	let chart_box = Rect {
		h: 100.0,
		w: 200.0,
		x: 10.0,
		y: 20.0,
	};
	assert!((value_to_pixel(0.0, 0.0, 10.0, &chart_box) - 120.0).abs() < 1e-9);
	assert!((value_to_pixel(10.0, 0.0, 10.0, &chart_box) - 20.0).abs() < 1e-9);
	assert!((value_to_pixel(5.0, 0.0, 10.0, &chart_box) - 70.0).abs() < 1e-9);
	assert!((category_center(&chart_box, 4, 0) - 35.0).abs() < 1e-9);
	assert!((category_center(&chart_box, 4, 3) - 185.0).abs() < 1e-9);
}

#[test]
fn test_format_number() {
	assert_eq!(format_number(3.0), "3");
	assert_eq!(format_number(-2.0), "-2");
	assert_eq!(format_number(0.25), "0.25");
	assert_eq!(format_number(0.5), "0.5");
}
