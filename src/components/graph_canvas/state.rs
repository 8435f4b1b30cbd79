use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use crate::config::LayoutKind;
use crate::graph::{EdgeId, GraphSurface, MaterializedEdge, ShortestPath, Vertex};

pub const NODE_RADIUS: f64 = 16.0;
pub const HIT_RADIUS: f64 = 20.0;
/// World-space tolerance for clicking an edge.
pub const EDGE_HIT_DISTANCE: f64 = 6.0;
/// Arc length between neighbours on the circle layout.
const LAYOUT_SPACING: f64 = 3.0 * NODE_RADIUS;
const MIN_LAYOUT_RADIUS: f64 = 100.0;
const LOOP_RADIUS: f64 = NODE_RADIUS * 0.8;

#[derive(Clone, Debug, Default)]
pub struct VertexInfo {
	pub index: usize,
	pub label: String,
}

#[derive(Clone, Debug)]
pub struct CanvasEdge {
	pub id: EdgeId,
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub weight: Option<f64>,
}

/// Where an edge is drawn, in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeShape {
	Line { x1: f64, y1: f64, x2: f64, y2: f64 },
	/// Self-loop drawn as a small circle above its vertex.
	Loop { cx: f64, cy: f64, r: f64 },
}

impl EdgeShape {
	/// Anchor point for the weight label.
	pub fn label_position(&self) -> (f64, f64) {
		match *self {
			EdgeShape::Line { x1, y1, x2, y2 } => {
				let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
				let (dx, dy) = (x2 - x1, y2 - y1);
				let len = (dx * dx + dy * dy).sqrt().max(0.001);
				// Offset perpendicular to the edge so the text does not sit on it.
				(mx - dy / len * 12.0, my + dx / len * 12.0)
			}
			EdgeShape::Loop { cx, cy, r } => (cx, cy - r - 8.0),
		}
	}

	fn distance_to(&self, px: f64, py: f64) -> f64 {
		match *self {
			EdgeShape::Line { x1, y1, x2, y2 } => {
				let (dx, dy) = (x2 - x1, y2 - y1);
				let len_sq = dx * dx + dy * dy;
				let t = if len_sq < 1e-9 {
					0.0
				} else {
					(((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0)
				};
				let (cx, cy) = (x1 + t * dx, y1 + t * dy);
				((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
			}
			EdgeShape::Loop { cx, cy, r } => {
				(((px - cx).powi(2) + (py - cy).powi(2)).sqrt() - r).abs()
			}
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Vertices and edges of the last shortest path shown.
#[derive(Clone, Debug, Default)]
pub struct PathHighlight {
	pub vertices: HashSet<usize>,
	pub edges: HashSet<EdgeId>,
}

/// Layout and view state behind the canvas. Mirrors the session's graph
/// through [`GraphSurface`].
pub struct CanvasState {
	pub graph: ForceGraph<VertexInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: Option<DefaultNodeIdx>,
	pub highlight: PathHighlight,
	/// Edge under the pointer when the button went down.
	pub edge_press: Option<EdgeId>,
	pub layout: LayoutKind,
	pub directed: bool,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	nodes: Vec<DefaultNodeIdx>,
	edges: Vec<CanvasEdge>,
}

fn simulation() -> ForceGraph<VertexInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl CanvasState {
	pub fn new(layout: LayoutKind, directed: bool) -> Self {
		let (width, height) = (800.0, 600.0);
		Self {
			graph: simulation(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: None,
			highlight: PathHighlight::default(),
			edge_press: None,
			layout,
			directed,
			width,
			height,
			flow_time: 0.0,
			nodes: Vec::new(),
			edges: Vec::new(),
		}
	}

	pub fn vertex_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edges(&self) -> &[CanvasEdge] {
		&self.edges
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::with_capacity(self.nodes.len());
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn edge_shape(
		&self,
		edge: &CanvasEdge,
		positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
	) -> Option<EdgeShape> {
		let &(x1, y1) = positions.get(&edge.source)?;
		if edge.source == edge.target {
			return Some(EdgeShape::Loop {
				cx: x1,
				cy: y1 - NODE_RADIUS - LOOP_RADIUS * 0.6,
				r: LOOP_RADIUS,
			});
		}
		let &(x2, y2) = positions.get(&edge.target)?;
		Some(EdgeShape::Line { x1, y1, x2, y2 })
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Closest edge within [`EDGE_HIT_DISTANCE`] of the screen point.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<EdgeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let positions = self.positions();
		self.edges
			.iter()
			.filter_map(|edge| {
				let shape = self.edge_shape(edge, &positions)?;
				Some((edge.id, shape.distance_to(gx, gy)))
			})
			.filter(|&(_, d)| d < EDGE_HIT_DISTANCE)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(id, _)| id)
	}

	pub fn vertex_index(&self, idx: DefaultNodeIdx) -> Option<usize> {
		self.nodes.iter().position(|&n| n == idx)
	}

	pub fn highlight_path(&mut self, path: &ShortestPath) {
		self.highlight = PathHighlight {
			vertices: path.vertices().into_iter().collect(),
			edges: path.edges().into_iter().collect(),
		};
	}

	pub fn clear_highlight(&mut self) {
		self.highlight = PathHighlight::default();
	}

	pub fn is_vertex_highlighted(&self, vertex: usize) -> bool {
		self.highlight.vertices.contains(&vertex)
	}

	pub fn is_edge_highlighted(&self, edge: EdgeId) -> bool {
		self.highlight.edges.contains(&edge)
	}

	/// World-space bounding box of all vertices, node radius included.
	pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			let (x0, y0, x1, y1) = (x - NODE_RADIUS, y - NODE_RADIUS, x + NODE_RADIUS, y + NODE_RADIUS);
			bounds = Some(match bounds {
				None => (x0, y0, x1, y1),
				Some((a, b, c, d)) => (a.min(x0), b.min(y0), c.max(x1), d.max(y1)),
			});
		});
		bounds
	}

	/// Canvas size and transform that show the whole graph at zoom 1 with
	/// `padding` pixels on every side. Loops and labels sit above nodes, so
	/// the top gets extra room.
	pub fn fitted_view(&self, padding: f64) -> Option<(f64, f64, ViewTransform)> {
		let (x0, y0, x1, y1) = self.bounds()?;
		let top = padding + 2.0 * LOOP_RADIUS + 16.0;
		let width = (x1 - x0) + 2.0 * padding;
		let height = (y1 - y0) + top + padding;
		let transform = ViewTransform {
			x: padding - x0,
			y: top - y0,
			k: 1.0,
		};
		Some((width.ceil(), height.ceil(), transform))
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.hover = node;
	}

	pub fn tick(&mut self, dt: f32) {
		if self.layout == LayoutKind::Force {
			self.graph.update(dt);
		}
		self.flow_time += dt as f64;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.transform.x = width / 2.0;
		self.transform.y = height / 2.0;
	}
}

impl GraphSurface for CanvasState {
	fn clear(&mut self) {
		self.graph = simulation();
		self.nodes.clear();
		self.edges.clear();
		self.hover = None;
		self.edge_press = None;
		self.drag = DragState::default();
		self.clear_highlight();
	}

	fn add_vertex(&mut self, vertex: &Vertex) {
		let idx = self.graph.add_node(NodeData {
			x: 0.0,
			y: 0.0,
			mass: 10.0,
			is_anchor: self.layout == LayoutKind::Circle,
			user_data: VertexInfo {
				index: vertex.index,
				label: vertex.label.clone(),
			},
		});
		self.nodes.push(idx);
	}

	fn add_edge(&mut self, edge: &MaterializedEdge) {
		let (Some(&source), Some(&target)) =
			(self.nodes.get(edge.source), self.nodes.get(edge.target))
		else {
			warn!("canvas: edge e{} has an endpoint that is not drawn", edge.id);
			return;
		};
		self.graph.add_edge(source, target, EdgeData::default());
		self.edges.push(CanvasEdge {
			id: edge.id,
			source,
			target,
			weight: edge.weight,
		});
	}

	fn set_edge_weight(&mut self, edge: EdgeId, weight: f64) {
		if let Some(e) = self.edges.iter_mut().find(|e| e.id == edge) {
			e.weight = Some(weight);
		}
	}

	/// Spread all vertices evenly on a circle that grows with their count.
	fn relayout(&mut self) {
		let n = self.nodes.len().max(1) as f64;
		let radius = (n * LAYOUT_SPACING / (2.0 * PI)).max(MIN_LAYOUT_RADIUS);
		let pinned = self.layout == LayoutKind::Circle;
		self.graph.visit_nodes_mut(|node| {
			let angle = node.data.user_data.index as f64 * 2.0 * PI / n - PI / 2.0;
			node.data.x = (radius * angle.cos()) as f32;
			node.data.y = (radius * angle.sin()) as f32;
			node.data.is_anchor = pinned;
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::PathStep;

	fn vertex(index: usize) -> Vertex {
		Vertex {
			index,
			label: index.to_string(),
		}
	}

	fn edge(id: EdgeId, source: usize, target: usize) -> MaterializedEdge {
		MaterializedEdge {
			id,
			source,
			target,
			weight: None,
		}
	}

	fn drawn(n: usize, edges: &[(usize, usize)]) -> CanvasState {
		let mut state = CanvasState::new(LayoutKind::Circle, false);
		for i in 0..n {
			state.add_vertex(&vertex(i));
			state.relayout();
		}
		for (id, &(s, t)) in edges.iter().enumerate() {
			state.add_edge(&edge(id, s, t));
			state.relayout();
		}
		state
	}

	fn to_screen(state: &CanvasState, x: f64, y: f64) -> (f64, f64) {
		(
			x * state.transform.k + state.transform.x,
			y * state.transform.k + state.transform.y,
		)
	}

	#[test]
	fn circle_layout_spaces_vertices_evenly() {
		let state = drawn(4, &[]);
		let positions = state.positions();
		assert_eq!(positions.len(), 4);

		let radii: Vec<f64> = positions.values().map(|(x, y)| (x * x + y * y).sqrt()).collect();
		for r in &radii {
			assert!((r - MIN_LAYOUT_RADIUS).abs() < 0.01, "radius {r}");
		}

		// Vertex 0 sits at the top.
		let &(x0, y0) = positions.get(&state.nodes[0]).unwrap();
		assert!(x0.abs() < 0.01 && y0 < 0.0);
	}

	#[test]
	fn circle_grows_with_vertex_count() {
		let state = drawn(40, &[]);
		let &(x, y) = state.positions().get(&state.nodes[0]).unwrap();
		let expected = 40.0 * LAYOUT_SPACING / (2.0 * PI);
		assert!(((x * x + y * y).sqrt() - expected).abs() < 0.5);
	}

	#[test]
	fn circle_layout_pins_vertices() {
		let mut state = drawn(3, &[(0, 1)]);
		let before = state.positions();
		state.tick(0.016);
		assert_eq!(state.positions(), before);
	}

	#[test]
	fn edges_to_missing_vertices_are_ignored() {
		let mut state = drawn(2, &[]);
		state.add_edge(&edge(0, 0, 5));
		assert!(state.edges().is_empty());
	}

	#[test]
	fn clicking_the_middle_of_an_edge_hits_it() {
		let state = drawn(2, &[(0, 1)]);
		let positions = state.positions();
		let shape = state.edge_shape(&state.edges()[0], &positions).unwrap();
		let EdgeShape::Line { x1, y1, x2, y2 } = shape else {
			panic!("expected a line, got {shape:?}");
		};
		let (sx, sy) = to_screen(&state, (x1 + x2) / 2.0, (y1 + y2) / 2.0);
		assert_eq!(state.edge_at_position(sx, sy), Some(0));

		let (fx, fy) = to_screen(&state, (x1 + x2) / 2.0 + 50.0, (y1 + y2) / 2.0);
		assert_eq!(state.edge_at_position(fx, fy), None);
	}

	#[test]
	fn self_loops_are_hit_on_their_ring() {
		let state = drawn(1, &[(0, 0)]);
		let shape = state.edge_shape(&state.edges()[0], &state.positions()).unwrap();
		let EdgeShape::Loop { cx, cy, r } = shape else {
			panic!("expected a loop, got {shape:?}");
		};
		let (sx, sy) = to_screen(&state, cx, cy - r);
		assert_eq!(state.edge_at_position(sx, sy), Some(0));
	}

	#[test]
	fn vertices_are_hit_within_radius() {
		let state = drawn(3, &[]);
		let &(x, y) = state.positions().get(&state.nodes[2]).unwrap();
		let (sx, sy) = to_screen(&state, x + 5.0, y);
		let hit = state.node_at_position(sx, sy).unwrap();
		assert_eq!(state.vertex_index(hit), Some(2));
	}

	#[test]
	fn weights_and_clear() {
		let mut state = drawn(2, &[(0, 1)]);
		state.set_edge_weight(0, 3.5);
		assert_eq!(state.edges()[0].weight, Some(3.5));

		state.clear();
		assert_eq!(state.vertex_count(), 0);
		assert!(state.edges().is_empty());
		assert!(state.bounds().is_none());
	}

	#[test]
	fn path_highlight_tracks_vertices_and_edges() {
		let mut state = drawn(3, &[(0, 1), (1, 2)]);
		let path = ShortestPath {
			origin: 0,
			destination: 1,
			distance: 1.0,
			trace: vec![PathStep::Vertex(0), PathStep::Edge(0), PathStep::Vertex(1)],
		};
		state.highlight_path(&path);
		assert!(state.is_vertex_highlighted(0) && state.is_vertex_highlighted(1));
		assert!(!state.is_vertex_highlighted(2));
		assert!(state.is_edge_highlighted(0) && !state.is_edge_highlighted(1));
	}

	#[test]
	fn fitted_view_contains_every_vertex() {
		let state = drawn(6, &[]);
		let padding = 30.0;
		let (width, height, transform) = state.fitted_view(padding).unwrap();
		for &(x, y) in state.positions().values() {
			let (sx, sy) = (x + transform.x, y + transform.y);
			assert!(sx - NODE_RADIUS >= padding - 0.5 && sx + NODE_RADIUS <= width - padding + 0.5);
			assert!(sy - NODE_RADIUS >= 0.0 && sy + NODE_RADIUS <= height - padding + 0.5);
		}
		assert!(CanvasState::new(LayoutKind::Circle, false).fitted_view(padding).is_none());
	}
}
