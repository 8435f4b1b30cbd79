//! Tick-by-tick construction of the visual graph.
//!
//! A build first materializes every vertex, one per tick, and only then the
//! pending edges, so no edge ever points at a vertex that does not exist yet.
//! Each build carries a [`Generation`]; ticks from an older build are
//! recognised as stale by the [`Session`](super::Session) and dropped.

use std::collections::VecDeque;
use std::ops::Range;

use super::edge_list::{EdgeList, PendingEdge};
use super::model::{EdgeId, MaterializedEdge, Vertex};

/// Build counter. Bumped by every draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
	pub fn next(self) -> Self {
		Generation(self.0 + 1)
	}
}

/// One unit of work performed per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildOp {
	AddVertex(usize),
	AddEdge {
		id: EdgeId,
		source: usize,
		target: usize,
	},
}

/// Result of driving a build by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
	/// The operation was applied to the model and the surface.
	Applied(BuildOp),
	/// Nothing left to do; the driver should stop.
	Finished,
	/// The tick belongs to a superseded build and was ignored.
	Stale,
}

/// The visual graph engine the builder draws into.
pub trait GraphSurface {
	/// Drop every element.
	fn clear(&mut self);
	fn add_vertex(&mut self, vertex: &Vertex);
	fn add_edge(&mut self, edge: &MaterializedEdge);
	fn set_edge_weight(&mut self, edge: EdgeId, weight: f64);
	/// Reposition all elements after a mutation.
	fn relayout(&mut self);
}

#[derive(Debug)]
enum Phase {
	Vertices(Range<usize>),
	Edges(VecDeque<(EdgeId, PendingEdge)>),
	Done,
}

/// Produces the operations of one build in order.
#[derive(Debug)]
pub struct GraphBuilder {
	generation: Generation,
	phase: Phase,
}

impl GraphBuilder {
	pub fn new(generation: Generation, vertex_count: usize) -> Self {
		Self {
			generation,
			phase: Phase::Vertices(0..vertex_count),
		}
	}

	pub fn generation(&self) -> Generation {
		self.generation
	}

	pub fn is_finished(&self) -> bool {
		matches!(self.phase, Phase::Done)
	}

	/// Next operation, or `None` once both phases are exhausted.
	///
	/// `pending` is snapshotted when the vertex phase runs out; edits made to
	/// it afterwards do not affect this build.
	pub fn next_op(&mut self, pending: &EdgeList) -> Option<BuildOp> {
		loop {
			let next_phase = match &mut self.phase {
				Phase::Vertices(queue) => match queue.next() {
					Some(index) => return Some(BuildOp::AddVertex(index)),
					None => Phase::Edges(pending.snapshot().into_iter().enumerate().collect()),
				},
				Phase::Edges(queue) => match queue.pop_front() {
					Some((id, edge)) => {
						return Some(BuildOp::AddEdge {
							id,
							source: edge.start,
							target: edge.end,
						});
					}
					None => Phase::Done,
				},
				Phase::Done => return None,
			};
			self.phase = next_phase;
		}
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;

	/// Surface that records what it was asked to do.
	#[derive(Debug, Default)]
	pub(crate) struct RecordingSurface {
		pub ops: Vec<BuildOp>,
		pub weights: Vec<(EdgeId, f64)>,
		pub layouts: usize,
		pub clears: usize,
	}

	impl GraphSurface for RecordingSurface {
		fn clear(&mut self) {
			self.clears += 1;
			self.ops.clear();
			self.weights.clear();
		}

		fn add_vertex(&mut self, vertex: &Vertex) {
			self.ops.push(BuildOp::AddVertex(vertex.index));
		}

		fn add_edge(&mut self, edge: &MaterializedEdge) {
			self.ops.push(BuildOp::AddEdge {
				id: edge.id,
				source: edge.source,
				target: edge.target,
			});
		}

		fn set_edge_weight(&mut self, edge: EdgeId, weight: f64) {
			self.weights.push((edge, weight));
		}

		fn relayout(&mut self) {
			self.layouts += 1;
		}
	}

	fn drain(builder: &mut GraphBuilder, pending: &EdgeList) -> Vec<BuildOp> {
		std::iter::from_fn(|| builder.next_op(pending)).collect()
	}

	#[test]
	fn vertices_come_before_edges() {
		let mut pending = EdgeList::new();
		pending.add(2, 0);
		pending.add(1, 1);
		let mut builder = GraphBuilder::new(Generation::default(), 3);

		assert_eq!(
			drain(&mut builder, &pending),
			vec![
				BuildOp::AddVertex(0),
				BuildOp::AddVertex(1),
				BuildOp::AddVertex(2),
				BuildOp::AddEdge { id: 0, source: 2, target: 0 },
				BuildOp::AddEdge { id: 1, source: 1, target: 1 },
			]
		);
		assert!(builder.is_finished());
		assert_eq!(builder.next_op(&pending), None);
	}

	#[test]
	fn edge_snapshot_is_taken_when_the_vertex_phase_ends() {
		let mut pending = EdgeList::new();
		pending.add(0, 1);
		let mut builder = GraphBuilder::new(Generation::default(), 2);

		assert_eq!(builder.next_op(&pending), Some(BuildOp::AddVertex(0)));
		pending.add(1, 0);
		assert_eq!(builder.next_op(&pending), Some(BuildOp::AddVertex(1)));
		assert_eq!(
			builder.next_op(&pending),
			Some(BuildOp::AddEdge { id: 0, source: 0, target: 1 })
		);

		// Edits after the snapshot are invisible to this build.
		pending.reset();
		assert_eq!(
			builder.next_op(&pending),
			Some(BuildOp::AddEdge { id: 1, source: 1, target: 0 })
		);
		assert_eq!(builder.next_op(&pending), None);
	}

	#[test]
	fn counts_match_the_request() {
		for (n, m) in [(1, 1), (4, 0), (5, 7)] {
			let mut pending = EdgeList::new();
			for i in 0..m {
				pending.add(i % n, (i + 1) % n);
			}
			let ops = drain(&mut GraphBuilder::new(Generation::default(), n), &pending);
			let split = ops
				.iter()
				.position(|op| matches!(op, BuildOp::AddEdge { .. }))
				.unwrap_or(ops.len());
			assert_eq!(split, n);
			assert_eq!(ops.len() - split, m);
			assert!(ops[split..].iter().all(|op| matches!(op, BuildOp::AddEdge { .. })));
		}
	}

	#[test]
	fn generations_increase() {
		let first = Generation::default();
		assert!(first.next() > first);
		assert_ne!(first.next(), first.next().next());
	}
}
