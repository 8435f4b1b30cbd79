use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::SharedSurface;
use super::render;
use crate::graph::EdgeId;

/// Pointer travel, in pixels, below which a press still counts as a click.
const CLICK_SLOP: f64 = 4.0;

/// Canvas showing the graph held in `surface`.
///
/// Vertices can be dragged, the background pans, the wheel zooms, and a click
/// on an edge calls `on_edge_click` with its id.
#[component]
pub fn GraphCanvas(
	surface: SharedSurface,
	on_edge_click: Rc<dyn Fn(EdgeId)>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(surface.clone(), animate.clone(), resize_cb.clone());

	let measure = move |canvas: &HtmlCanvasElement| -> (f64, f64) {
		(
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0)
			}),
		)
	};

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = measure(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		state_init.borrow_mut().resize(w, h);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				log::error!("graph-canvas: 2d context unavailable");
				return;
			}
		};

		if width.is_none() || height.is_none() {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let (nw, nh) = measure(&canvas_resize);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				state_resize.borrow_mut().resize(nw, nh);
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			{
				let mut s = state_anim.borrow_mut();
				s.tick(0.016);
				render::render(&s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let pointer = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let state_md = surface.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		let mut s = state_md.borrow_mut();
		s.edge_press = None;
		if let Some(idx) = s.node_at_position(x, y) {
			s.drag.active = true;
			s.drag.node_idx = Some(idx);
			s.drag.start_x = x;
			s.drag.start_y = y;
			let mut start = (0.0, 0.0);
			s.graph.visit_nodes(|node| {
				if node.index() == idx {
					start = (node.x(), node.y());
				}
			});
			(s.drag.node_start_x, s.drag.node_start_y) = start;
		} else {
			s.edge_press = s.edge_at_position(x, y);
			s.pan.active = true;
			s.pan.start_x = x;
			s.pan.start_y = y;
			s.pan.transform_start_x = s.transform.x;
			s.pan.transform_start_y = s.transform.y;
		}
	};

	let state_mm = surface.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		let mut s = state_mm.borrow_mut();
		if !s.drag.active {
			let hovered = s.node_at_position(x, y);
			s.set_hover(hovered);
		}

		if s.drag.active {
			if let Some(idx) = s.drag.node_idx {
				let (dx, dy) = (
					(x - s.drag.start_x) / s.transform.k,
					(y - s.drag.start_y) / s.transform.k,
				);
				let (nx, ny) = (
					s.drag.node_start_x + dx as f32,
					s.drag.node_start_y + dy as f32,
				);
				s.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if s.pan.active {
			if (x - s.pan.start_x).hypot(y - s.pan.start_y) > CLICK_SLOP {
				s.edge_press = None;
			}
			s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
			s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
		}
	};

	let state_mu = surface.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let clicked = {
			let mut s = state_mu.borrow_mut();
			let pressed = s.edge_press.take();
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			let released = pointer(&ev).and_then(|(x, y)| s.edge_at_position(x, y));
			pressed.filter(|&id| released == Some(id))
		};
		// Borrow released above: the handler may touch the surface again.
		if let Some(id) = clicked {
			on_edge_click(id);
		}
	};

	let state_ml = surface.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut s = state_ml.borrow_mut();
		s.drag.active = false;
		s.drag.node_idx = None;
		s.pan.active = false;
		s.edge_press = None;
		s.set_hover(None);
	};

	let state_wh = surface;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let mouse: &MouseEvent = &ev;
		let Some((x, y)) = pointer(mouse) else {
			return;
		};
		let mut s = state_wh.borrow_mut();
		let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
		let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / s.transform.k;
		s.transform.x = x - (x - s.transform.x) * ratio;
		s.transform.y = y - (y - s.transform.y) * ratio;
		s.transform.k = new_k;
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
