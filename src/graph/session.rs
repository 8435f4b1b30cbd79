//! Everything one browser tab knows about the graph it is editing.

use log::{debug, info, warn};

use super::InputError;
use super::builder::{BuildOp, Generation, GraphBuilder, GraphSurface, Tick};
use super::edge_list::{EdgeList, PendingEdgeId};
use super::model::{EdgeId, Element, ElementId, VisualGraph};
use super::path::{Direction, ShortestPath, shortest_path};
use super::validate::{self, EdgeRule};

/// Pending edges, the drawn graph and the build in flight.
///
/// UI code never keeps graph state of its own; every action goes through a
/// method here, and the canvas is passed in as a [`GraphSurface`] whenever
/// an action has something to draw.
#[derive(Debug, Default)]
pub struct Session {
	rule: EdgeRule,
	direction: Direction,
	vertex_count: usize,
	edges: EdgeList,
	graph: VisualGraph,
	build: Option<GraphBuilder>,
	generation: Generation,
}

impl Session {
	pub fn new(rule: EdgeRule, direction: Direction) -> Self {
		Self {
			rule,
			direction,
			..Self::default()
		}
	}

	pub fn vertex_count(&self) -> usize {
		self.vertex_count
	}

	pub fn edges(&self) -> &EdgeList {
		&self.edges
	}

	pub fn graph(&self) -> &VisualGraph {
		&self.graph
	}

	pub fn rule(&self) -> EdgeRule {
		self.rule
	}

	pub fn generation(&self) -> Generation {
		self.generation
	}

	pub fn is_building(&self) -> bool {
		self.build.is_some()
	}

	/// Change the vertex universe. Pending edges are dropped since their
	/// endpoints may no longer exist.
	pub fn set_vertex_count(&mut self, count: usize) {
		self.vertex_count = count;
		self.edges.reset();
		debug!("vertex count set to {count}, pending edges cleared");
	}

	/// Parse and apply the vertex count field. Invalid text changes nothing.
	pub fn set_vertex_count_text(&mut self, raw: &str) -> Result<usize, InputError> {
		let count = validate::parse_vertex_count(raw)?;
		self.set_vertex_count(count);
		Ok(count)
	}

	/// Edge entry is only offered once there is at least one vertex.
	pub fn edge_entry_enabled(&self) -> bool {
		self.vertex_count > 0
	}

	pub fn can_add_edge(&self, text: &str) -> bool {
		validate::validate_edge_text(text, self.vertex_count, self.rule).is_some()
	}

	/// Add the edge typed in `text` if it passes validation.
	pub fn add_edge(&mut self, text: &str) -> Option<PendingEdgeId> {
		let (start, end) = validate::validate_edge_text(text, self.vertex_count, self.rule)?;
		let id = self.edges.add(start, end);
		debug!("pending edge {start} → {end} added");
		Some(id)
	}

	pub fn remove_edge(&mut self, id: PendingEdgeId) -> bool {
		self.edges.remove(id)
	}

	/// Start a new build, superseding any build still in flight.
	///
	/// Returns the generation ticks must carry, or `None` when there is
	/// nothing to draw.
	pub fn begin_draw(&mut self, surface: &mut impl GraphSurface) -> Option<Generation> {
		if self.vertex_count == 0 || self.edges.is_empty() {
			debug!("draw ignored: {} vertices, {} edges", self.vertex_count, self.edges.len());
			return None;
		}
		self.generation = self.generation.next();
		if self.build.take().is_some() {
			info!("superseding unfinished build");
		}
		self.graph.clear();
		surface.clear();
		self.build = Some(GraphBuilder::new(self.generation, self.vertex_count));
		info!(
			"build {:?} started: {} vertices, {} edges",
			self.generation,
			self.vertex_count,
			self.edges.len()
		);
		Some(self.generation)
	}

	/// Advance the build started as `generation` by one operation.
	pub fn tick(&mut self, generation: Generation, surface: &mut impl GraphSurface) -> Tick {
		if generation != self.generation {
			debug!("dropping tick from stale build {generation:?}");
			return Tick::Stale;
		}
		let Some(builder) = self.build.as_mut() else {
			return Tick::Finished;
		};

		loop {
			let Some(op) = builder.next_op(&self.edges) else {
				self.build = None;
				info!(
					"build {generation:?} finished: {} vertices, {} edges",
					self.graph.vertex_count(),
					self.graph.edges().len()
				);
				return Tick::Finished;
			};

			let applied = match op {
				BuildOp::AddVertex(index) => {
					self.graph.add_vertex(index).map(|v| surface.add_vertex(v))
				}
				BuildOp::AddEdge { id, source, target } => {
					self.graph.add_edge(id, source, target).map(|e| surface.add_edge(e))
				}
			};
			match applied {
				Ok(()) => {
					surface.relayout();
					return Tick::Applied(op);
				}
				Err(err) => warn!("skipping build step {op:?}: {err}"),
			}
		}
	}

	/// Attach a weight to a drawn edge. `raw` is `None` when the user
	/// dismissed the prompt, which leaves the edge untouched.
	pub fn assign_weight(
		&mut self,
		edge: EdgeId,
		raw: Option<&str>,
		surface: &mut impl GraphSurface,
	) -> Result<Option<f64>, InputError> {
		let Some(raw) = raw else {
			return Ok(None);
		};
		if !matches!(self.graph.select(ElementId::Edge(edge)), Some(Element::Edge(_))) {
			return Err(InputError::UnknownEdge(edge));
		}
		let weight = validate::parse_weight(raw)?;
		self.graph.set_weight(edge, weight);
		surface.set_edge_weight(edge, weight);
		debug!("edge {edge} weighted {weight}");
		Ok(Some(weight))
	}

	/// Shortest path between two typed vertices (`3` or `n3`), using edge
	/// weights with unweighted edges treated as impassable.
	pub fn shortest_path(&self, origin: &str, destination: &str) -> Result<ShortestPath, InputError> {
		let origin = validate::parse_vertex_id(origin)?;
		let destination = validate::parse_vertex_id(destination)?;
		for vertex in [origin, destination] {
			if !matches!(self.graph.select(ElementId::Vertex(vertex)), Some(Element::Vertex(_))) {
				return Err(InputError::UnknownVertex(vertex));
			}
		}
		let path = shortest_path(
			&self.graph,
			origin,
			destination,
			self.direction,
			|edge| edge.cost(),
		);
		info!(
			"shortest path {origin} → {destination}: distance {}, route {}",
			path.distance_label(),
			path.route_label()
		);
		Ok(path)
	}
}
