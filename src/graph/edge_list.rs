//! Ordered list of edges the user has asked for but that are not drawn yet.

use std::fmt;

/// Identity of a pending edge. Two entries with the same endpoints still get
/// distinct ids, so removing one never removes its twin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PendingEdgeId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingEdge {
	pub id: PendingEdgeId,
	pub start: usize,
	pub end: usize,
}

impl fmt::Display for PendingEdge {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} → {}", self.start, self.end)
	}
}

/// Insertion-ordered pending edges. Order decides materialization order and
/// nothing else; duplicates are allowed.
#[derive(Clone, Debug, Default)]
pub struct EdgeList {
	edges: Vec<PendingEdge>,
	next_id: u64,
}

impl EdgeList {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append an edge. Bounds are checked by the caller.
	pub fn add(&mut self, start: usize, end: usize) -> PendingEdgeId {
		let id = PendingEdgeId(self.next_id);
		self.next_id += 1;
		self.edges.push(PendingEdge { id, start, end });
		id
	}

	/// Remove the entry with this identity. Returns `false` if it is gone
	/// already.
	pub fn remove(&mut self, id: PendingEdgeId) -> bool {
		match self.edges.iter().position(|e| e.id == id) {
			Some(pos) => {
				self.edges.remove(pos);
				true
			}
			None => false,
		}
	}

	pub fn reset(&mut self) {
		self.edges.clear();
	}

	/// Copy of the current entries; later edits to the list do not affect it.
	pub fn snapshot(&self) -> Vec<PendingEdge> {
		self.edges.clone()
	}

	pub fn iter(&self) -> impl Iterator<Item = &PendingEdge> {
		self.edges.iter()
	}

	pub fn len(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.edges.is_empty()
	}
}
