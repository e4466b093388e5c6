use crate::config::{ChartColors, ChartConfig, CHART_CONFIG, DARK_CHART_COLORS, LIGHT_CHART_COLORS};
use num_traits::ToPrimitive;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::*;

pub trait ChartImpl: 'static {
	type Options: 'static;
	fn draw_chart(options: DrawChartOptions<Self::Options>) -> Result<(), JsValue>;
}

pub struct DrawChartOptions<'a, Options> {
	pub chart_colors: &'a ChartColors,
	pub chart_config: &'a ChartConfig,
	pub ctx: CanvasRenderingContext2d,
	pub height: f64,
	pub options: &'a Options,
	pub width: f64,
}

/// A chart drawn into a canvas that tracks the size of its container.
pub struct Chart<T: ChartImpl> {
	on_resize: Closure<dyn FnMut()>,
	owns_canvas: bool,
	state: Rc<RefCell<ChartState<T>>>,
}

struct ChartState<T: ChartImpl> {
	canvas: HtmlCanvasElement,
	container: HtmlElement,
	/// The canvas sits in the container's content box, so the container's padding is not available to it.
	inside_padding: bool,
	options: Option<T::Options>,
}

impl<T: ChartImpl> Chart<T> {
	/// Mounts a chart at `mount`. A `<canvas>` mount point is drawn into directly and sized to its parent's content box. Any other element gets a canvas appended that covers it.
	pub fn new(mount: HtmlElement) -> Result<Self, JsValue> {
		let window = window()?;
		let document = window
			.document()
			.ok_or_else(|| JsValue::from_str("window has no document"))?;
		let (canvas, container, owns_canvas) = match mount.dyn_into::<HtmlCanvasElement>() {
			Ok(canvas) => {
				canvas.style().set_property("display", "block")?;
				let container = canvas
					.parent_element()
					.and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
					.unwrap_or_else(|| HtmlElement::from(canvas.clone()));
				(canvas, container, false)
			}
			Err(mount) => {
				let canvas = document
					.create_element("canvas")?
					.dyn_into::<HtmlCanvasElement>()?;
				mount.style().set_property("position", "relative")?;
				let style = canvas.style();
				style.set_property("position", "absolute")?;
				style.set_property("top", "0")?;
				style.set_property("left", "0")?;
				mount.append_child(&canvas)?;
				(canvas, mount, true)
			}
		};
		let state = Rc::new(RefCell::new(ChartState {
			canvas,
			container,
			inside_padding: !owns_canvas,
			options: None,
		}));
		let on_resize = {
			let state = state.clone();
			Closure::wrap(Box::new(move || {
				if let Err(error) = render(&state.borrow()) {
					console::error_1(&error);
				}
			}) as Box<dyn FnMut()>)
		};
		window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
		Ok(Chart {
			on_resize,
			owns_canvas,
			state,
		})
	}

	pub fn draw(&self, options: T::Options) -> Result<(), JsValue> {
		self.state.borrow_mut().options = Some(options);
		render(&self.state.borrow())
	}

	/// Keep the chart redrawing on resize for the rest of the page's life.
	pub fn forget(self) {
		self.on_resize.forget();
	}

	pub fn destroy(self) -> Result<(), JsValue> {
		window()?.remove_event_listener_with_callback(
			"resize",
			self.on_resize.as_ref().unchecked_ref(),
		)?;
		if self.owns_canvas {
			let state = self.state.borrow();
			state.container.remove_child(&state.canvas)?;
		}
		Ok(())
	}
}

fn window() -> Result<Window, JsValue> {
	web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn render<T: ChartImpl>(state: &ChartState<T>) -> Result<(), JsValue> {
	let options = match &state.options {
		Some(options) => options,
		None => return Ok(()),
	};
	let window = window()?;
	let (width, height) = container_size(&window, &state.container, state.inside_padding)?;
	let dpr = window.device_pixel_ratio();
	let canvas = &state.canvas;
	canvas.set_width((width * dpr).to_u32().unwrap_or(0));
	canvas.set_height((height * dpr).to_u32().unwrap_or(0));
	canvas
		.style()
		.set_property("width", &format!("{}px", width))?;
	canvas
		.style()
		.set_property("height", &format!("{}px", height))?;
	let ctx = canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
		.dyn_into::<CanvasRenderingContext2d>()?;
	ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
	ctx.clear_rect(0.0, 0.0, width, height);
	ctx.set_font(CHART_CONFIG.font);
	let chart_colors = if prefers_dark_color_scheme(&window) {
		&DARK_CHART_COLORS
	} else {
		&LIGHT_CHART_COLORS
	};
	T::draw_chart(DrawChartOptions {
		chart_colors,
		chart_config: &CHART_CONFIG,
		ctx,
		height,
		options,
		width,
	})
}

fn container_size(
	window: &Window,
	container: &HtmlElement,
	inside_padding: bool,
) -> Result<(f64, f64), JsValue> {
	let width = f64::from(container.client_width());
	let height = f64::from(container.client_height());
	if !inside_padding {
		return Ok((width, height));
	}
	let style = match window.get_computed_style(container)? {
		Some(style) => style,
		None => return Ok((width, height)),
	};
	let padding = |property: &str| -> Result<f64, JsValue> {
		Ok(parse_px(&style.get_property_value(property)?))
	};
	let width = width - padding("padding-left")? - padding("padding-right")?;
	let height = height - padding("padding-top")? - padding("padding-bottom")?;
	Ok((width.max(0.0), height.max(0.0)))
}

/// Reads a computed length such as `"10px"`. Anything else counts as zero.
fn parse_px(value: &str) -> f64 {
	value
		.trim()
		.trim_end_matches("px")
		.parse::<f64>()
		.ok()
		.filter(|value| value.is_finite())
		.unwrap_or(0.0)
}

fn prefers_dark_color_scheme(window: &Window) -> bool {
	window
		.match_media("(prefers-color-scheme: dark)")
		.ok()
		.flatten()
		.map(|media_query_list| media_query_list.matches())
		.unwrap_or(false)
}

#[test]
fn test_parse_px() {
	assert_eq!(parse_px("10px"), 10.0);
	assert_eq!(parse_px("12.5px"), 12.5);
	assert_eq!(parse_px("0px"), 0.0);
	assert_eq!(parse_px(""), 0.0);
	assert_eq!(parse_px("auto"), 0.0);
}
