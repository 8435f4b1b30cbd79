//! PNG export of the whole graph.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement};

use super::render;
use super::state::CanvasState;

/// Margin around the graph in the exported image, in pixels.
pub const EXPORT_PADDING: f64 = 30.0;

const PNG_PREFIX: &str = "data:image/png;base64,";

#[derive(Error, Debug)]
pub enum ExportError {
	#[error("there is no graph to export yet")]
	EmptyGraph,

	#[error("document is not available")]
	NoDocument,

	#[error("browser refused the export: {0}")]
	Js(String),
}

impl From<JsValue> for ExportError {
	fn from(value: JsValue) -> Self {
		ExportError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// An encoded image ready to be offered for download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
	pub file_name: String,
	pub data_url: String,
}

impl ExportArtifact {
	/// Base64 PNG payload without the data URL prefix.
	pub fn payload(&self) -> &str {
		self.data_url.strip_prefix(PNG_PREFIX).unwrap_or("")
	}

	pub fn is_empty(&self) -> bool {
		self.payload().is_empty()
	}
}

/// Render the full graph, not just the visible viewport, into an offscreen
/// canvas and encode it as PNG. Leaves `state` untouched.
pub fn snapshot_png(state: &CanvasState, file_name: &str) -> Result<ExportArtifact> {
	let (width, height, transform) = state
		.fitted_view(EXPORT_PADDING)
		.ok_or(ExportError::EmptyGraph)?;
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(ExportError::NoDocument)?;

	let canvas: HtmlCanvasElement = document
		.create_element("canvas")?
		.dyn_into()
		.map_err(|_| ExportError::Js("created element is not a canvas".into()))?;
	canvas.set_width(width as u32);
	canvas.set_height(height as u32);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or_else(|| ExportError::Js("2d context unavailable".into()))?
		.dyn_into()
		.map_err(|_| ExportError::Js("unexpected context type".into()))?;
	render::render_view(state, &ctx, &transform, width, height);

	let data_url = canvas.to_data_url_with_type("image/png")?;
	let artifact = ExportArtifact {
		file_name: file_name.to_string(),
		data_url,
	};
	if artifact.is_empty() {
		return Err(ExportError::Js("canvas produced an empty image".into()));
	}
	Ok(artifact)
}

/// Click a transient download link for `artifact`.
pub fn offer_download(artifact: &ExportArtifact) -> Result<()> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(ExportError::NoDocument)?;
	let link: HtmlAnchorElement = document
		.create_element("a")?
		.dyn_into()
		.map_err(|_| ExportError::Js("created element is not a link".into()))?;
	link.set_href(&artifact.data_url);
	link.set_target("_blank");
	link.set_download(&artifact.file_name);
	link.click();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn payload_strips_the_png_prefix() {
		let artifact = ExportArtifact {
			file_name: "graph.png".into(),
			data_url: format!("{PNG_PREFIX}iVBORw0KGgo="),
		};
		assert_eq!(artifact.payload(), "iVBORw0KGgo=");
		assert!(!artifact.is_empty());
	}

	#[test]
	fn blank_or_foreign_data_urls_are_empty() {
		for data_url in ["data:,", PNG_PREFIX, "data:image/jpeg;base64,AAAA"] {
			let artifact = ExportArtifact {
				file_name: "graph.png".into(),
				data_url: data_url.into(),
			};
			assert!(artifact.is_empty(), "{data_url}");
		}
	}
}
