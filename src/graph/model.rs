//! The materialized graph: what has actually been drawn so far.

use std::fmt;
use std::str::FromStr;

use super::ModelError;

/// Position of an edge in the snapshot it was materialized from.
pub type EdgeId = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex {
	pub index: usize,
	pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaterializedEdge {
	pub id: EdgeId,
	pub source: usize,
	pub target: usize,
	pub weight: Option<f64>,
}

impl MaterializedEdge {
	/// Traversal cost; an edge nobody weighted yet is impassable.
	pub fn cost(&self) -> f64 {
		self.weight.unwrap_or(f64::INFINITY)
	}
}

/// Selector for a single element, written `n<index>` or `e<index>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
	Vertex(usize),
	Edge(EdgeId),
}

impl fmt::Display for ElementId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ElementId::Vertex(i) => write!(f, "n{i}"),
			ElementId::Edge(i) => write!(f, "e{i}"),
		}
	}
}

impl FromStr for ElementId {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim_start_matches('#');
		let invalid = || format!("invalid element id {s:?}");
		if let Some(index) = s.strip_prefix('n') {
			index.parse().map(ElementId::Vertex).map_err(|_| invalid())
		} else if let Some(index) = s.strip_prefix('e') {
			index.parse().map(ElementId::Edge).map_err(|_| invalid())
		} else {
			Err(invalid())
		}
	}
}

/// A selected element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Element<'a> {
	Vertex(&'a Vertex),
	Edge(&'a MaterializedEdge),
}

/// Vertices and edges materialized by a build. Vertices are created in
/// index order, so `vertices[i].index == i` always holds.
#[derive(Clone, Debug, Default)]
pub struct VisualGraph {
	vertices: Vec<Vertex>,
	edges: Vec<MaterializedEdge>,
}

impl VisualGraph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Materialize the next vertex. Indices must arrive in order.
	pub fn add_vertex(&mut self, index: usize) -> Result<&Vertex, ModelError> {
		if index < self.vertices.len() {
			return Err(ModelError::DuplicateVertex(index));
		}
		if index > self.vertices.len() {
			return Err(ModelError::VertexOutOfOrder {
				expected: self.vertices.len(),
				got: index,
			});
		}
		self.vertices.push(Vertex {
			index,
			label: index.to_string(),
		});
		Ok(&self.vertices[index])
	}

	/// Materialize an unweighted edge between two existing vertices.
	pub fn add_edge(
		&mut self,
		id: EdgeId,
		source: usize,
		target: usize,
	) -> Result<&MaterializedEdge, ModelError> {
		for vertex in [source, target] {
			if !self.contains_vertex(vertex) {
				return Err(ModelError::DanglingEdge { edge: id, vertex });
			}
		}
		self.edges.push(MaterializedEdge {
			id,
			source,
			target,
			weight: None,
		});
		Ok(&self.edges[self.edges.len() - 1])
	}

	pub fn set_weight(&mut self, id: EdgeId, weight: f64) -> Option<&MaterializedEdge> {
		let edge = self.edges.iter_mut().find(|e| e.id == id)?;
		edge.weight = Some(weight);
		Some(edge)
	}

	pub fn contains_vertex(&self, index: usize) -> bool {
		index < self.vertices.len()
	}

	pub fn edge(&self, id: EdgeId) -> Option<&MaterializedEdge> {
		self.edges.iter().find(|e| e.id == id)
	}

	pub fn select(&self, id: ElementId) -> Option<Element<'_>> {
		match id {
			ElementId::Vertex(i) => self.vertices.get(i).map(Element::Vertex),
			ElementId::Edge(i) => self.edge(i).map(Element::Edge),
		}
	}

	pub fn vertices(&self) -> &[Vertex] {
		&self.vertices
	}

	pub fn edges(&self) -> &[MaterializedEdge] {
		&self.edges
	}

	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty()
	}

	pub fn clear(&mut self) {
		self.vertices.clear();
		self.edges.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn triangle() -> VisualGraph {
		let mut graph = VisualGraph::new();
		for i in 0..3 {
			graph.add_vertex(i).unwrap();
		}
		graph.add_edge(0, 0, 1).unwrap();
		graph.add_edge(1, 1, 2).unwrap();
		graph
	}

	#[test]
	fn vertices_are_labelled_by_index() {
		let graph = triangle();
		let labels: Vec<_> = graph.vertices().iter().map(|v| v.label.as_str()).collect();
		assert_eq!(labels, ["0", "1", "2"]);
	}

	#[test]
	fn duplicate_and_out_of_order_vertices_are_rejected() {
		let mut graph = triangle();
		assert_eq!(graph.add_vertex(1), Err(ModelError::DuplicateVertex(1)));
		assert_eq!(
			graph.add_vertex(5),
			Err(ModelError::VertexOutOfOrder { expected: 3, got: 5 })
		);
		assert_eq!(graph.vertex_count(), 3);
	}

	#[test]
	fn dangling_edges_are_rejected() {
		let mut graph = triangle();
		assert_eq!(
			graph.add_edge(2, 1, 3),
			Err(ModelError::DanglingEdge { edge: 2, vertex: 3 })
		);
		assert_eq!(graph.edges().len(), 2);
	}

	#[test]
	fn unweighted_edges_cost_infinity() {
		let mut graph = triangle();
		assert_eq!(graph.edge(0).map(MaterializedEdge::cost), Some(f64::INFINITY));
		graph.set_weight(0, 4.0);
		assert_eq!(graph.edge(0).map(MaterializedEdge::cost), Some(4.0));
		assert!(graph.set_weight(9, 1.0).is_none());
	}

	#[test]
	fn element_ids_round_trip_through_selection() {
		let graph = triangle();
		assert_eq!("n2".parse::<ElementId>(), Ok(ElementId::Vertex(2)));
		assert_eq!("#e1".parse::<ElementId>(), Ok(ElementId::Edge(1)));
		assert!("x1".parse::<ElementId>().is_err());
		assert!("n".parse::<ElementId>().is_err());
		for multi_byte in ["é1", "n١", "€", "#ñ2"] {
			assert!(multi_byte.parse::<ElementId>().is_err(), "{multi_byte}");
		}
		assert_eq!(ElementId::Edge(1).to_string(), "e1");

		match graph.select(ElementId::Edge(1)) {
			Some(Element::Edge(edge)) => assert_eq!((edge.source, edge.target), (1, 2)),
			other => panic!("unexpected selection {other:?}"),
		}
		assert!(graph.select(ElementId::Vertex(3)).is_none());
	}
}
