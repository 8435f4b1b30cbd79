use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, EdgeShape, NODE_RADIUS, ViewTransform};

const BACKGROUND: &str = "#1a1a2e";
const NODE_FILL: &str = "#1f77b4";
const PATH_FILL: &str = "#ff7f0e";
const EDGE_STROKE: &str = "rgba(100, 180, 255, 0.7)";
const PATH_STROKE: &str = "rgba(255, 209, 102, 0.95)";
const WEIGHT_TEXT: &str = "rgba(255, 255, 255, 0.85)";

type Positions = HashMap<DefaultNodeIdx, (f64, f64)>;

/// Draw the live view.
pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	render_view(state, ctx, &state.transform, state.width, state.height);
}

/// Draw the graph through an arbitrary transform onto a `width` x `height`
/// surface. Shared by the live canvas and the PNG export.
pub fn render_view(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	transform: &ViewTransform,
	width: f64,
	height: f64,
) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);
	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);
	let positions = state.positions();
	draw_edges(state, ctx, &positions, transform.k);
	draw_nodes(state, ctx, transform.k);
	ctx.restore();
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d, positions: &Positions, k: f64) {
	let (dash, gap) = (8.0 / k, 4.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	for edge in state.edges() {
		let Some(shape) = state.edge_shape(edge, positions) else {
			continue;
		};
		let on_path = state.is_edge_highlighted(edge.id);

		if on_path {
			ctx.set_stroke_style_str(PATH_STROKE);
			ctx.set_line_width(3.0 / k);
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		} else {
			ctx.set_stroke_style_str(EDGE_STROKE);
			ctx.set_line_width(1.5 / k);
		}

		ctx.begin_path();
		match shape {
			EdgeShape::Line { x1, y1, x2, y2 } => {
				let (dx, dy) = (x2 - x1, y2 - y1);
				let dist = (dx * dx + dy * dy).sqrt();
				if dist < 0.001 {
					let _ = ctx.set_line_dash(&js_sys::Array::new());
					continue;
				}
				let (ux, uy) = (dx / dist, dy / dist);
				ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
				ctx.line_to(x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
				ctx.stroke();
				let _ = ctx.set_line_dash(&js_sys::Array::new());
				if state.directed {
					draw_arrow(ctx, x2, y2, ux, uy, 8.0 / k, on_path);
				}
			}
			EdgeShape::Loop { cx, cy, r } => {
				let _ = ctx.arc(cx, cy, r, 0.0, 2.0 * PI);
				ctx.stroke();
				let _ = ctx.set_line_dash(&js_sys::Array::new());
			}
		}

		if let Some(weight) = edge.weight {
			let (lx, ly) = shape.label_position();
			ctx.set_fill_style_str(if on_path { PATH_STROKE } else { WEIGHT_TEXT });
			ctx.set_font(&format!("{}px sans-serif", 12.0 / k.max(0.5)));
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			let _ = ctx.fill_text(&weight.to_string(), lx, ly);
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_arrow(
	ctx: &CanvasRenderingContext2d,
	x2: f64,
	y2: f64,
	ux: f64,
	uy: f64,
	size: f64,
	on_path: bool,
) {
	ctx.set_fill_style_str(if on_path { PATH_STROKE } else { EDGE_STROKE });
	let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
	let (back_x, back_y) = (tip_x - ux * size, tip_y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d, k: f64) {
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font(&format!("{}px sans-serif", 13.0 / k.max(0.5)));

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;

		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(if state.is_vertex_highlighted(info.index) {
			PATH_FILL
		} else {
			NODE_FILL
		});
		ctx.fill();

		if state.hover == Some(node.index()) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, NODE_RADIUS + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		let _ = ctx.fill_text(&info.label, x, y);
	});
}
