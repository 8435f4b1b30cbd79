//! Parsing and gating of everything the user types.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::InputError;
use super::model::ElementId;

/// Largest accepted edge weight. Keeps every path sum over a bounded graph
/// far below `f64::MAX`, so finite distances stay finite.
pub const MAX_WEIGHT: f64 = 1e12;

/// Largest accepted vertex count.
pub const MAX_VERTEX_COUNT: usize = u32::MAX as usize;

/// `start/end` with optional whitespace around the separator.
static EDGE_SHAPE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s*\d+\s*/\s*\d+\s*$").expect("edge shape regex"));
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("digit regex"));

/// Which endpoint pairs may be added for a given vertex count.
///
/// Both rules bound endpoints by `count - 1`, the highest vertex index that
/// will actually be created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeRule {
	/// Any in-range pair, self-loops included.
	#[default]
	Permissive,
	/// In-range pairs with distinct endpoints.
	Strict,
}

impl EdgeRule {
	/// Whether `(start, end)` is acceptable for `count` vertices.
	pub fn admits(self, start: usize, end: usize, count: usize) -> bool {
		let Some(last) = count.checked_sub(1) else {
			return false;
		};
		let in_range = start <= last && end <= last;
		match self {
			EdgeRule::Permissive => in_range,
			EdgeRule::Strict => in_range && start != end,
		}
	}
}

/// Whether the text has the `int/int` shape, independent of the values.
pub fn matches_edge_shape(text: &str) -> bool {
	EDGE_SHAPE.is_match(text)
}

/// First two digit runs of `text`. Missing or oversized runs yield `None`
/// so any later bounds check fails closed.
pub fn parse_endpoints(text: &str) -> Option<(usize, usize)> {
	let mut runs = DIGIT_RUN.find_iter(text).map(|m| m.as_str().parse::<usize>());
	match (runs.next(), runs.next()) {
		(Some(Ok(start)), Some(Ok(end))) => Some((start, end)),
		_ => None,
	}
}

/// Gate for the add-edge action: shape and endpoint rule must both pass.
pub fn validate_edge_text(text: &str, count: usize, rule: EdgeRule) -> Option<(usize, usize)> {
	if !matches_edge_shape(text) {
		return None;
	}
	parse_endpoints(text).filter(|&(start, end)| rule.admits(start, end, count))
}

/// Vertex count field. Empty text means zero vertices.
///
/// Integral numbers written in float form (`3.0`, `1e3`) are accepted, as a
/// number input reports them that way.
pub fn parse_vertex_count(raw: &str) -> Result<usize, InputError> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return Ok(0);
	}
	let not_a_count = || InputError::NotANumber(raw.to_string());
	let count = match trimmed.parse::<usize>() {
		Ok(count) => count,
		Err(_) => {
			let value: f64 = trimmed.parse().map_err(|_| not_a_count())?;
			if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
				return Err(not_a_count());
			}
			if value > MAX_VERTEX_COUNT as f64 {
				return Err(not_a_count());
			}
			value as usize
		}
	};
	if count > MAX_VERTEX_COUNT {
		return Err(not_a_count());
	}
	Ok(count)
}

/// Edge weight: a finite, non-negative number no larger than [`MAX_WEIGHT`].
pub fn parse_weight(raw: &str) -> Result<f64, InputError> {
	let weight: f64 = raw
		.trim()
		.parse()
		.map_err(|_| InputError::NotANumber(raw.to_string()))?;
	if !weight.is_finite() {
		return Err(InputError::NotANumber(raw.to_string()));
	}
	if weight < 0.0 {
		return Err(InputError::NegativeWeight(weight));
	}
	if weight > MAX_WEIGHT {
		return Err(InputError::WeightTooLarge(weight));
	}
	Ok(weight)
}

/// Vertex typed for a path query, either a bare index or a vertex element id
/// such as `n3`.
pub fn parse_vertex_id(raw: &str) -> Result<usize, InputError> {
	let trimmed = raw.trim();
	if let Ok(index) = trimmed.parse() {
		return Ok(index);
	}
	match trimmed.parse::<ElementId>() {
		Ok(ElementId::Vertex(index)) => Ok(index),
		_ => Err(InputError::NotANumber(raw.to_string())),
	}
}
