//! Canvas rendering of the graph being built.
//!
//! [`CanvasState`] is the visual graph engine: it implements
//! [`GraphSurface`](crate::graph::GraphSurface), runs the circle or force
//! layout, and answers hit tests. [`GraphCanvas`] paints it every animation
//! frame and turns pointer input into pan, zoom, drag and edge clicks.

use std::cell::RefCell;
use std::rc::Rc;

mod component;
pub mod export;
mod render;
mod state;

pub use component::GraphCanvas;
pub use export::{ExportArtifact, ExportError};
pub use state::{CanvasEdge, CanvasState, EdgeShape, ViewTransform};

/// Canvas state shared between the component, the build driver and the
/// handlers that assign weights or highlight paths.
pub type SharedSurface = Rc<RefCell<CanvasState>>;
