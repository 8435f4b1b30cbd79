//! Browser tests for the PNG export. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use graph_sketch::components::graph_canvas::{CanvasState, export};
use graph_sketch::config::LayoutKind;
use graph_sketch::graph::{GraphSurface, Session, Tick};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn built_canvas() -> CanvasState {
	let mut surface = CanvasState::new(LayoutKind::Circle, false);
	let mut session = Session::default();
	session.set_vertex_count(3);
	session.add_edge("0/1");
	session.add_edge("1/2");
	let generation = session.begin_draw(&mut surface).expect("draw starts");
	while let Tick::Applied(_) = session.tick(generation, &mut surface) {}
	session
		.assign_weight(0, Some("2"), &mut surface)
		.expect("weight accepted");
	surface
}

#[wasm_bindgen_test]
fn export_after_build_produces_a_png() {
	let surface = built_canvas();
	let artifact = export::snapshot_png(&surface, "graph.png").expect("export succeeds");
	assert_eq!(artifact.file_name, "graph.png");
	assert!(artifact.data_url.starts_with("data:image/png;base64,"));
	assert!(!artifact.is_empty());
}

#[wasm_bindgen_test]
fn repeated_exports_are_independent() {
	let surface = built_canvas();
	let positions = surface.positions();
	let first = export::snapshot_png(&surface, "graph.png").expect("first export");
	let second = export::snapshot_png(&surface, "graph.png").expect("second export");

	assert!(!first.is_empty() && !second.is_empty());
	assert_eq!(first.file_name, second.file_name);
	assert_eq!(surface.positions(), positions);
	assert_eq!(surface.vertex_count(), 3);
	assert_eq!(surface.edges().len(), 2);
}

#[wasm_bindgen_test]
fn empty_canvas_refuses_to_export() {
	let mut surface = CanvasState::new(LayoutKind::Circle, false);
	surface.clear();
	assert!(matches!(
		export::snapshot_png(&surface, "graph.png"),
		Err(export::ExportError::EmptyGraph)
	));
}
