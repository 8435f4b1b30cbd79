use std::cell::RefCell;
use std::rc::Rc;

use leptos::leptos_dom::helpers::IntervalHandle;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::components::build_driver::start_build;
use crate::components::edge_form::EdgeForm;
use crate::components::graph_canvas::{CanvasState, GraphCanvas, SharedSurface, export};
use crate::components::path_panel::PathPanel;
use crate::components::prompt::{PromptHost, PromptService};
use crate::config::AppConfig;
use crate::graph::{Direction, EdgeId, ElementId, Session};

/// Graph editor: forms on the side, canvas in the middle.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let prompts = PromptService::provide();
	let session = RwSignal::new(Session::new(config.edge_rule, config.direction));
	let surface: SharedSurface = Rc::new(RefCell::new(CanvasState::new(
		config.layout,
		config.direction == Direction::Directed,
	)));
	let build_timer = StoredValue::new(None::<IntervalHandle>);

	let on_draw = {
		let surface = surface.clone();
		let interval = config.tick_interval();
		move |_| start_build(session, &surface, build_timer, interval)
	};

	let on_export = {
		let surface = surface.clone();
		let file_name = config.export_file_name.clone();
		move |_| {
			let exported = export::snapshot_png(&surface.borrow(), &file_name)
				.and_then(|artifact| export::offer_download(&artifact).map(|()| artifact));
			match exported {
				Ok(artifact) => info!(
					"graph-sketch: exported {} ({} base64 bytes)",
					artifact.file_name,
					artifact.payload().len()
				),
				Err(e) => {
					warn!("graph-sketch: export failed: {e}");
					prompts.notify(e.to_string());
				}
			}
		}
	};

	let on_edge_click: Rc<dyn Fn(EdgeId)> = {
		let surface = surface.clone();
		Rc::new(move |edge| {
			let surface = surface.clone();
			spawn_local(async move {
				let raw = prompts.ask(format!("Edge weight ({})", ElementId::Edge(edge))).await;
				let assigned = session
					.try_update(|s| s.assign_weight(edge, raw.as_deref(), &mut *surface.borrow_mut()));
				if let Some(Err(e)) = assigned {
					warn!("graph-sketch: weight rejected: {e}");
					prompts.notify(e.to_string());
				}
			});
		})
	};

	view! {
		<div class="editor">
			<aside class="controls">
				<h1>"Graph Sketch"</h1>
				<p class="subtitle">
					"Click an edge to weight it. Drag vertices, scroll to zoom, drag the background to pan."
				</p>
				<EdgeForm session=session />
				<div class="actions">
					<button type="button" on:click=on_draw>"Draw"</button>
					<button type="button" on:click=on_export>"Export PNG"</button>
				</div>
				<PathPanel session=session surface=surface.clone() />
			</aside>
			<main class="draw-zone">
				<GraphCanvas surface=surface on_edge_click=on_edge_click />
			</main>
		</div>
		<PromptHost />
	}
}
