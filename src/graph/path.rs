//! Single-source shortest path over the materialized graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use super::model::{EdgeId, MaterializedEdge, VisualGraph};

/// How edges may be traversed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	/// Either way, regardless of which endpoint was typed first.
	#[default]
	Undirected,
	/// Only from source to target.
	Directed,
}

/// One entry of a path trace. Traces alternate vertex, edge, vertex, ...
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathStep {
	Vertex(usize),
	Edge(EdgeId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPath {
	pub origin: usize,
	pub destination: usize,
	/// `f64::INFINITY` when the destination cannot be reached.
	pub distance: f64,
	/// Empty when unreachable.
	pub trace: Vec<PathStep>,
}

impl ShortestPath {
	pub fn is_reachable(&self) -> bool {
		self.distance.is_finite()
	}

	/// Vertex ids along the path, origin first.
	pub fn vertices(&self) -> Vec<usize> {
		self.trace
			.iter()
			.step_by(2)
			.filter_map(|step| match step {
				PathStep::Vertex(v) => Some(*v),
				PathStep::Edge(_) => None,
			})
			.collect()
	}

	pub fn edges(&self) -> Vec<EdgeId> {
		self.trace
			.iter()
			.filter_map(|step| match step {
				PathStep::Edge(e) => Some(*e),
				PathStep::Vertex(_) => None,
			})
			.collect()
	}

	pub fn distance_label(&self) -> String {
		if self.is_reachable() {
			self.distance.to_string()
		} else {
			"∞".to_string()
		}
	}

	/// `0 → 1 → 2`, or `no route`.
	pub fn route_label(&self) -> String {
		if !self.is_reachable() {
			return "no route".to_string();
		}
		self.vertices()
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(" → ")
	}
}

/// Dijkstra from `origin` to `destination`.
///
/// `weight` gives the cost of each edge; infinite, negative and NaN costs
/// make the edge impassable. Both endpoints are expected to be vertices of
/// `graph`; anything else is reported as unreachable.
pub fn shortest_path<F>(
	graph: &VisualGraph,
	origin: usize,
	destination: usize,
	direction: Direction,
	weight: F,
) -> ShortestPath
where
	F: Fn(&MaterializedEdge) -> f64,
{
	let unreachable = ShortestPath {
		origin,
		destination,
		distance: f64::INFINITY,
		trace: Vec::new(),
	};
	let n = graph.vertex_count();
	if origin >= n || destination >= n {
		return unreachable;
	}

	// (edge position, neighbour, cost)
	let mut adjacency: Vec<Vec<(usize, usize, f64)>> = vec![Vec::new(); n];
	for (pos, edge) in graph.edges().iter().enumerate() {
		let cost = weight(edge);
		if !(cost >= 0.0) || cost.is_infinite() {
			continue;
		}
		adjacency[edge.source].push((pos, edge.target, cost));
		if direction == Direction::Undirected && edge.source != edge.target {
			adjacency[edge.target].push((pos, edge.source, cost));
		}
	}

	let mut dist = vec![f64::INFINITY; n];
	let mut prev: Vec<Option<(usize, usize)>> = vec![None; n];
	let mut visited = vec![false; n];
	let mut heap = BinaryHeap::new();
	dist[origin] = 0.0;
	heap.push(Reverse((OrderedFloat(0.0), origin)));

	while let Some(Reverse((OrderedFloat(d), node))) = heap.pop() {
		if visited[node] {
			continue;
		}
		visited[node] = true;
		if node == destination {
			break;
		}
		for &(pos, next, cost) in &adjacency[node] {
			let candidate = d + cost;
			if candidate < dist[next] {
				dist[next] = candidate;
				prev[next] = Some((node, pos));
				heap.push(Reverse((OrderedFloat(candidate), next)));
			}
		}
	}

	if !dist[destination].is_finite() {
		return unreachable;
	}

	let edges = graph.edges();
	let mut trace = vec![PathStep::Vertex(destination)];
	let mut at = destination;
	while let Some((from, pos)) = prev[at] {
		trace.push(PathStep::Edge(edges[pos].id));
		trace.push(PathStep::Vertex(from));
		at = from;
	}
	trace.reverse();

	ShortestPath {
		origin,
		destination,
		distance: dist[destination],
		trace,
	}
}
