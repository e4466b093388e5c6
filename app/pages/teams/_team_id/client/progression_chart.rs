use crate::{config::PageConfig, error::Error};
use scoreline_app_pages_teams_team_id_common::ChartPayload;
use scoreline_charts::{
	BarSeries, Chart, LineSeries, MixedChart, MixedChartAxis, MixedChartOptions, MixedChartSeries,
	MixedChartXAxis,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::console;

const LINE_AXIS_ID: &str = "y-line";
const BAR_AXIS_ID: &str = "y-bar";
const LINE_COLOR: &str = "#0066cc";
const GRID_LINE_COLOR: &str = "#eee";

/// Builds the chart of the running metric drawn over stacked goals for and goals against bars colored by result.
pub fn progression_chart_options(payload: &ChartPayload) -> MixedChartOptions {
	let colors: Vec<String> = payload
		.bar_colors()
		.into_iter()
		.map(|color| color.to_owned())
		.collect();
	let (gf, ga) = payload.adjusted_goals();
	MixedChartOptions {
		axes: vec![
			MixedChartAxis {
				display: false,
				draw_grid_lines: false,
				draw_labels: false,
				grid_line_color: None,
				id: LINE_AXIS_ID.to_owned(),
				stacked: false,
			},
			MixedChartAxis {
				display: true,
				draw_grid_lines: true,
				draw_labels: false,
				grid_line_color: Some(GRID_LINE_COLOR.to_owned()),
				id: BAR_AXIS_ID.to_owned(),
				stacked: true,
			},
		],
		bar_percentage: Some(1.0),
		category_percentage: Some(0.9),
		hide_legend: Some(true),
		labels: payload.labels.clone(),
		series: vec![
			MixedChartSeries::Line(LineSeries {
				axis_id: LINE_AXIS_ID.to_owned(),
				color: LINE_COLOR.to_owned(),
				data: payload.values.clone(),
				line_width: 2.0,
				order: 1,
				point_radius: 0.0,
				title: None,
			}),
			MixedChartSeries::Bar(BarSeries {
				axis_id: BAR_AXIS_ID.to_owned(),
				colors: colors.clone(),
				data: gf,
				order: 2,
				title: Some("GF".to_owned()),
			}),
			MixedChartSeries::Bar(BarSeries {
				axis_id: BAR_AXIS_ID.to_owned(),
				colors,
				data: ga,
				order: 2,
				title: Some("GA".to_owned()),
			}),
		],
		x_axis: MixedChartXAxis {
			display: false,
			stacked: true,
		},
	}
}

/// Draws the progression chart if this page has one. A page without the mount point or without a payload is left alone.
pub fn boot_progression_chart(config: &PageConfig) -> Result<(), Error> {
	let document = web_sys::window()
		.and_then(|window| window.document())
		.ok_or_else(|| JsValue::from_str("no global document"))?;
	let mount = match document.get_element_by_id(&config.mount_id) {
		Some(mount) => mount,
		None => {
			console::debug_1(&format!("#{} not found, skipping chart", config.mount_id).into());
			return Ok(());
		}
	};
	let payload = match mount.get_attribute(&config.payload_attr) {
		Some(payload) if !payload.is_empty() => payload,
		_ => {
			console::debug_1(
				&format!(
					"#{} has no {}, skipping chart",
					config.mount_id, config.payload_attr
				)
				.into(),
			);
			return Ok(());
		}
	};
	let payload: ChartPayload = serde_json::from_str(&payload)?;
	let mount = mount
		.dyn_into::<web_sys::HtmlElement>()
		.map_err(JsValue::from)?;
	let chart = Chart::<MixedChart>::new(mount)?;
	chart.draw(progression_chart_options(&payload))?;
	chart.forget();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use scoreline_app_pages_teams_team_id_common::{DRAW_COLOR, WIN_COLOR};
	use scoreline_charts::{common::Rect, compute_axis_ranges, compute_mixed_chart_layout};

	const CHART_BOX: Rect = Rect {
		h: 100.0,
		w: 100.0,
		x: 0.0,
		y: 0.0,
	};

	fn payload(json: &str) -> ChartPayload {
		serde_json::from_str(json).unwrap()
	}

	#[test]
	fn test_single_match() {
		let payload =
			payload(r#"{"labels":["M1"],"values":[3],"results":["W"],"gf":[1],"ga":[0]}"#);
		let options = progression_chart_options(&payload);
		let ranges = compute_axis_ranges(&options);
		let layout = compute_mixed_chart_layout(&options, &ranges, CHART_BOX, "#000");

		// One category, one point for the running value in the middle of its widened range.
		assert_eq!(options.labels, vec!["M1".to_owned()]);
		assert_eq!(layout.lines.len(), 1);
		assert_eq!(layout.lines[0].points.len(), 1);
		assert!((layout.lines[0].points[0].x - 50.0).abs() < 1e-9);
		assert!((layout.lines[0].points[0].y - 50.0).abs() < 1e-9);

		let goals_for = layout.bars.iter().find(|bar| bar.series_index == 1).unwrap();
		assert_eq!(goals_for.color, WIN_COLOR);
		assert_eq!(goals_for.segment.height(), 1.0);
		assert!((goals_for.rect.h - 100.0).abs() < 1e-9);
		// The goals against bar of a 1-0 win keeps its zero height.
		let goals_against = layout.bars.iter().find(|bar| bar.series_index == 2).unwrap();
		assert_eq!(goals_against.color, WIN_COLOR);
		assert_eq!(goals_against.segment.height(), 0.0);
		assert_eq!(goals_against.rect.h, 0.0);

		// Full-width bar groups, line drawn last.
		assert!((goals_for.rect.w - 90.0).abs() < 1e-9);
		assert_eq!(layout.draw_order.last(), Some(&0));
	}

	#[test]
	fn test_goalless_draw_is_visible() {
		let payload = payload(
			r#"{"labels":["M1","M2"],"values":[1,1],"results":["D","L"],"gf":[0,0],"ga":[0,-2]}"#,
		);
		let options = progression_chart_options(&payload);
		match (&options.series[1], &options.series[2]) {
			(MixedChartSeries::Bar(goals_for), MixedChartSeries::Bar(goals_against)) => {
				assert_eq!(goals_for.data, vec![0.2, 0.0]);
				assert_eq!(goals_against.data, vec![-0.2, -2.0]);
				assert_eq!(goals_for.colors[0], DRAW_COLOR);
				assert_eq!(goals_for.colors, goals_against.colors);
			}
			_ => panic!("expected two bar series"),
		}
		let ranges = compute_axis_ranges(&options);
		let layout = compute_mixed_chart_layout(&options, &ranges, CHART_BOX, "#000");
		assert!(layout
			.bars
			.iter()
			.filter(|bar| bar.category == 0)
			.all(|bar| bar.rect.h > 0.0));
	}

	#[test]
	fn test_axes_and_plugins() {
		let payload =
			payload(r#"{"labels":["M1"],"values":[3],"results":["W"],"gf":[1],"ga":[0]}"#);
		let options = progression_chart_options(&payload);
		assert!(!options.x_axis.display);
		assert!(options.x_axis.stacked);
		assert_eq!(options.hide_legend, Some(true));
		let line_axis = options.axes.iter().find(|axis| axis.id == "y-line").unwrap();
		assert!(!line_axis.display);
		let bar_axis = options.axes.iter().find(|axis| axis.id == "y-bar").unwrap();
		assert!(bar_axis.display && bar_axis.stacked && bar_axis.draw_grid_lines);
		assert!(!bar_axis.draw_labels);
		assert_eq!(bar_axis.grid_line_color.as_deref(), Some("#eee"));
		match &options.series[0] {
			MixedChartSeries::Line(line) => {
				assert_eq!(line.color, "#0066cc");
				assert_eq!(line.line_width, 2.0);
				assert_eq!(line.point_radius, 0.0);
				assert_eq!(line.data, vec![3.0]);
			}
			_ => panic!("expected the line series first"),
		}
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
	use super::*;
	use wasm_bindgen_test::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn set_body(html: &str) -> web_sys::Document {
		let document = web_sys::window().unwrap().document().unwrap();
		document.body().unwrap().set_inner_html(html);
		document
	}

	#[wasm_bindgen_test]
	fn test_missing_mount_point_is_a_no_op() {
		let document = set_body("<div></div>");
		boot_progression_chart(&PageConfig::default()).unwrap();
		assert!(document.query_selector("canvas").unwrap().is_none());
	}

	#[wasm_bindgen_test]
	fn test_missing_payload_is_a_no_op() {
		let document = set_body(r#"<div id="progressionChart"></div>"#);
		boot_progression_chart(&PageConfig::default()).unwrap();
		assert!(document.query_selector("canvas").unwrap().is_none());
	}

	#[wasm_bindgen_test]
	fn test_malformed_payload_is_an_error() {
		set_body(r#"<div id="progressionChart" data-chart="{not json"></div>"#);
		let result = boot_progression_chart(&PageConfig::default());
		assert!(matches!(result, Err(Error::Payload(_))));
	}

	#[wasm_bindgen_test]
	fn test_chart_is_mounted() {
		let document = set_body(
			r#"<div style="width: 400px; height: 200px"><div id="progressionChart" style="height: 100%" data-chart='{"labels":["M1"],"values":[3],"results":["W"],"gf":[1],"ga":[0]}'></div></div>"#,
		);
		boot_progression_chart(&PageConfig::default()).unwrap();
		assert!(document
			.query_selector("#progressionChart canvas")
			.unwrap()
			.is_some());
	}

	#[wasm_bindgen_test]
	fn test_canvas_mount_fits_padded_parent() {
		let document = set_body(
			r#"<div style="width: 400px; padding: 10px"><canvas id="progressionChart" data-chart='{"labels":["M1","M2"],"values":[3,3],"results":["W","D"],"gf":[1,0],"ga":[0,0]}'></canvas></div>"#,
		);
		boot_progression_chart(&PageConfig::default()).unwrap();
		let canvas = document
			.get_element_by_id("progressionChart")
			.unwrap()
			.dyn_into::<web_sys::HtmlElement>()
			.unwrap();
		let size = |canvas: &web_sys::HtmlElement| {
			let style = canvas.style();
			(
				style.get_property_value("width").unwrap(),
				style.get_property_value("height").unwrap(),
			)
		};
		assert_eq!(size(&canvas), ("400px".to_owned(), "150px".to_owned()));
		// Redrawing on resize must not feed the parent's padding back into the canvas.
		let window = web_sys::window().unwrap();
		for _ in 0..3 {
			window
				.dispatch_event(&web_sys::Event::new("resize").unwrap())
				.unwrap();
		}
		assert_eq!(size(&canvas), ("400px".to_owned(), "150px".to_owned()));
		assert!(document.query_selector("canvas canvas").unwrap().is_none());
	}
}
