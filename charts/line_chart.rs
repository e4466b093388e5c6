use crate::common::Point;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub struct DrawLineOptions<'a> {
	pub color: &'a str,
	pub ctx: &'a CanvasRenderingContext2d,
	pub line_width: f64,
	pub points: &'a [Point],
}

pub fn draw_line(options: DrawLineOptions) {
	let DrawLineOptions {
		color,
		ctx,
		line_width,
		points,
	} = options;
	if points.len() < 2 || line_width <= 0.0 {
		return;
	}
	ctx.save();
	ctx.begin_path();
	ctx.set_stroke_style(&JsValue::from_str(color));
	ctx.set_line_width(line_width);
	ctx.set_line_join("round");
	ctx.move_to(points[0].x, points[0].y);
	for point in &points[1..] {
		ctx.line_to(point.x, point.y);
	}
	ctx.stroke();
	ctx.restore();
}

pub struct DrawPointOptions<'a> {
	pub color: &'a str,
	pub ctx: &'a CanvasRenderingContext2d,
	pub point: Point,
	pub radius: f64,
}

pub fn draw_point(options: DrawPointOptions) -> Result<(), JsValue> {
	let DrawPointOptions {
		color,
		ctx,
		point,
		radius,
	} = options;
	if radius <= 0.0 {
		return Ok(());
	}
	ctx.begin_path();
	ctx.set_fill_style(&JsValue::from_str(color));
	ctx.arc(point.x, point.y, radius, 0.0, 2.0 * std::f64::consts::PI)?;
	ctx.fill();
	Ok(())
}
