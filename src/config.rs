//! Runtime configuration, read once at startup.
//!
//! The page may embed overrides as JSON:
//!
//! ```html
//! <script id="app-config" type="application/json">
//!   { "tick_interval_ms": 120, "edge_rule": "strict", "layout": "force" }
//! </script>
//! ```
//!
//! Missing keys fall back to [`AppConfig::default`].

use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::graph::{Direction, EdgeRule};

/// Id of the optional config script element.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

/// How the canvas arranges vertices after each build step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
	/// Evenly spaced on a circle, pinned in place.
	#[default]
	Circle,
	/// Seeded on the circle, then left to the force simulation.
	Force,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Delay between two build steps.
	pub tick_interval_ms: u32,
	pub layout: LayoutKind,
	pub edge_rule: EdgeRule,
	pub direction: Direction,
	pub export_file_name: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			tick_interval_ms: 50,
			layout: LayoutKind::Circle,
			edge_rule: EdgeRule::Permissive,
			direction: Direction::Undirected,
			export_file_name: "graph.png".into(),
		}
	}
}

impl AppConfig {
	pub fn tick_interval(&self) -> Duration {
		Duration::from_millis(u64::from(self.tick_interval_ms.max(1)))
	}

	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Read the config element from the document, falling back to defaults.
	pub fn load() -> Self {
		let Some(text) = config_script_text() else {
			return Self::default();
		};
		match Self::from_json(&text) {
			Ok(config) => {
				info!("graph-sketch: loaded config {config:?}");
				config
			}
			Err(e) => {
				warn!("graph-sketch: ignoring invalid config: {e}");
				Self::default()
			}
		}
	}
}

fn config_script_text() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_the_classic_tool() {
		let config = AppConfig::default();
		assert_eq!(config.tick_interval(), Duration::from_millis(50));
		assert_eq!(config.export_file_name, "graph.png");
		assert_eq!(config.edge_rule, EdgeRule::Permissive);
		assert_eq!(config.direction, Direction::Undirected);
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config =
			AppConfig::from_json(r#"{ "edge_rule": "strict", "layout": "force" }"#).unwrap();
		assert_eq!(config.edge_rule, EdgeRule::Strict);
		assert_eq!(config.layout, LayoutKind::Force);
		assert_eq!(config.tick_interval_ms, 50);
	}

	#[test]
	fn zero_interval_is_clamped() {
		let config = AppConfig::from_json(r#"{ "tick_interval_ms": 0 }"#).unwrap();
		assert_eq!(config.tick_interval(), Duration::from_millis(1));
	}

	#[test]
	fn unknown_variants_are_rejected() {
		assert!(AppConfig::from_json(r#"{ "direction": "sideways" }"#).is_err());
	}
}
