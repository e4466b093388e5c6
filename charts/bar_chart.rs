use crate::common::Rect;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// The span a single bar covers on its value axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSegment {
	pub start: f64,
	pub end: f64,
}

impl BarSegment {
	pub fn height(&self) -> f64 {
		(self.end - self.start).abs()
	}
}

/// Computes the segment of every bar in every series. When `stacked` is set, positive values stack upward from zero and negative values stack downward from zero, per category, in series order.
pub fn stack_bars(series: &[&[f64]], stacked: bool) -> Vec<Vec<BarSegment>> {
	let n_categories = series.iter().map(|values| values.len()).max().unwrap_or(0);
	let mut positive_bases = vec![0.0; n_categories];
	let mut negative_bases = vec![0.0; n_categories];
	let mut segments = Vec::with_capacity(series.len());
	for values in series {
		let mut series_segments = Vec::with_capacity(values.len());
		for (category, &value) in values.iter().enumerate() {
			if !stacked {
				series_segments.push(BarSegment {
					start: 0.0,
					end: value,
				});
				continue;
			}
			let base = if value < 0.0 {
				&mut negative_bases[category]
			} else {
				&mut positive_bases[category]
			};
			let start = *base;
			if value.is_finite() {
				*base += value;
			}
			series_segments.push(BarSegment { start, end: *base });
		}
		segments.push(series_segments);
	}
	segments
}

pub struct BarExtentOptions<'a> {
	pub bar_percentage: f64,
	pub category: usize,
	pub category_percentage: f64,
	pub chart_box: &'a Rect,
	pub n_categories: usize,
	pub n_stacks: usize,
	pub stack_index: usize,
}

/// Computes the left edge and width of a bar. Each category is split into `n_stacks` side by side slots, and the group of slots takes `category_percentage` of the category's width.
pub fn bar_extent(options: BarExtentOptions) -> (f64, f64) {
	let BarExtentOptions {
		bar_percentage,
		category,
		category_percentage,
		chart_box,
		n_categories,
		n_stacks,
		stack_index,
	} = options;
	let category_width = chart_box.w / n_categories as f64;
	let group_width = category_width * category_percentage;
	let stack_width = group_width / n_stacks.max(1) as f64;
	let bar_width = stack_width * bar_percentage;
	let x = chart_box.x
		+ category_width * category as f64
		+ (category_width - group_width) / 2.0
		+ stack_width * stack_index as f64
		+ (stack_width - bar_width) / 2.0;
	(x, bar_width)
}

pub struct DrawBarOptions<'a> {
	pub color: &'a str,
	pub ctx: &'a CanvasRenderingContext2d,
	pub rect: Rect,
}

pub fn draw_bar(options: DrawBarOptions) {
	let DrawBarOptions { color, ctx, rect } = options;
	if rect.h <= 0.0 || rect.w <= 0.0 {
		return;
	}
	ctx.set_fill_style(&JsValue::from_str(color));
	ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_stack_bars_positive_and_negative() {
		let goals_for = [2.0, 0.2, 1.0];
		let goals_against = [-1.0, -0.2, 0.0];
		let segments = stack_bars(&[&goals_for, &goals_against], true);
		assert_eq!(
			segments[0],
			vec![
				BarSegment {
					start: 0.0,
					end: 2.0
				},
				BarSegment {
					start: 0.0,
					end: 0.2
				},
				BarSegment {
					start: 0.0,
					end: 1.0
				},
			]
		);
		// Negative values grow down from zero rather than from the top of the positive stack.
		assert_eq!(
			segments[1][0],
			BarSegment {
				start: 0.0,
				end: -1.0
			}
		);
		assert_eq!(
			segments[1][1],
			BarSegment {
				start: 0.0,
				end: -0.2
			}
		);
		// A zero stacks on the positive side with no height.
		assert_eq!(
			segments[1][2],
			BarSegment {
				start: 1.0,
				end: 1.0
			}
		);
		assert_eq!(segments[1][2].height(), 0.0);
	}

	#[test]
	fn test_stack_bars_same_sign() {
		let segments = stack_bars(&[&[1.0], &[2.0]], true);
		assert_eq!(
			segments[1][0],
			BarSegment {
				start: 1.0,
				end: 3.0
			}
		);
		let segments = stack_bars(&[&[1.0], &[2.0]], false);
		assert_eq!(
			segments[1][0],
			BarSegment {
				start: 0.0,
				end: 2.0
			}
		);
	}

	#[test]
	fn test_bar_extent() {
		let chart_box = Rect {
			h: 100.0,
			w: 100.0,
			x: 0.0,
			y: 0.0,
		};
		let (x, w) = bar_extent(BarExtentOptions {
			bar_percentage: 1.0,
			category: 1,
			category_percentage: 0.9,
			chart_box: &chart_box,
			n_categories: 2,
			n_stacks: 1,
			stack_index: 0,
		});
		assert!((x - 52.5).abs() < 1e-9);
		assert!((w - 45.0).abs() < 1e-9);
		let (x, w) = bar_extent(BarExtentOptions {
			bar_percentage: 0.5,
			category: 0,
			category_percentage: 1.0,
			chart_box: &chart_box,
			n_categories: 1,
			n_stacks: 2,
			stack_index: 1,
		});
		assert!((x - 62.5).abs() < 1e-9);
		assert!((w - 25.0).abs() < 1e-9);
	}
}
