//! DOM-free graph logic: pending edges, input validation, the materialized
//! graph, the incremental builder and shortest-path queries.
//!
//! Everything in here runs natively, so the whole module is unit tested
//! without a browser. The canvas and forms in [`crate::components`] drive it
//! through a [`Session`].

use thiserror::Error;

pub mod builder;
pub mod edge_list;
pub mod model;
pub mod path;
pub mod session;
pub mod validate;

pub use builder::{BuildOp, Generation, GraphBuilder, GraphSurface, Tick};
pub use edge_list::{EdgeList, PendingEdge, PendingEdgeId};
pub use model::{EdgeId, ElementId, MaterializedEdge, Vertex, VisualGraph};
pub use path::{Direction, PathStep, ShortestPath, shortest_path};
pub use session::Session;
pub use validate::EdgeRule;

/// Rejected user input. Each variant maps to a notice shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
	#[error("Not a number: {0:?}")]
	NotANumber(String),

	#[error("Edge weight must not be negative, got {0}")]
	NegativeWeight(f64),

	#[error("Edge weight must be at most {max}, got {0}", max = validate::MAX_WEIGHT)]
	WeightTooLarge(f64),

	#[error("Vertex {0} is not part of the drawn graph")]
	UnknownVertex(usize),

	#[error("Edge {0} is not part of the drawn graph")]
	UnknownEdge(usize),
}

/// Structural violations caught by [`VisualGraph`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
	#[error("edge {edge} references vertex {vertex}, which is not materialized")]
	DanglingEdge { edge: EdgeId, vertex: usize },

	#[error("vertex {0} is already materialized")]
	DuplicateVertex(usize),

	#[error("expected vertex {expected} next, got {got}")]
	VertexOutOfOrder { expected: usize, got: usize },
}
