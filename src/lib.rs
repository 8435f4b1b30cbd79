//! graph-sketch: draw a small weighted graph by hand, watch it build one
//! element at a time, and ask for shortest paths between its vertices.
//!
//! The graph logic lives in [`graph`] and has no DOM dependency; the Leptos
//! app in [`components`] and `pages` wires it to a canvas, a few forms and a
//! non-blocking prompt dialog.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod components;
pub mod config;
pub mod graph;
mod pages;

pub use config::AppConfig;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graph-sketch: logging initialized");
}

/// An app router which renders the editor and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(AppConfig::load());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		<Title text="Graph Sketch" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
