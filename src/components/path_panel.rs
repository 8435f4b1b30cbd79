//! Shortest-path request and its result.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use super::graph_canvas::SharedSurface;
use super::prompt::PromptService;
use crate::graph::{Generation, Session, ShortestPath, validate};

/// A query result together with the build it was computed on.
#[derive(Clone, Debug, PartialEq)]
struct PathReport {
	generation: Generation,
	path: ShortestPath,
}

impl PathReport {
	/// The path, unless a newer draw has replaced the graph it describes.
	fn current(self, session: &Session) -> Option<ShortestPath> {
		(self.generation == session.generation()).then_some(self.path)
	}
}

#[component]
pub fn PathPanel(session: RwSignal<Session>, surface: SharedSurface) -> impl IntoView {
	let prompts = PromptService::expect();
	let result = RwSignal::new(None::<PathReport>);

	let run_query = move |_| {
		let surface = surface.clone();
		spawn_local(async move {
			let Some(origin) = prompts.ask("Origin vertex").await else {
				return;
			};
			if let Err(e) = validate::parse_vertex_id(&origin) {
				prompts.notify(e.to_string());
				return;
			}
			let Some(target) = prompts.ask("Target vertex").await else {
				return;
			};
			let query = session.with_untracked(|s| {
				s.shortest_path(&origin, &target).map(|path| PathReport {
					generation: s.generation(),
					path,
				})
			});
			match query {
				Ok(report) => {
					surface.borrow_mut().highlight_path(&report.path);
					result.set(Some(report));
				}
				Err(e) => {
					warn!("graph-sketch: path query rejected: {e}");
					prompts.notify(e.to_string());
				}
			}
		});
	};

	view! {
		<section class="path-panel">
			<button type="button" on:click=run_query>"Shortest path"</button>
			{move || {
				result
					.get()
					.and_then(|report| session.with(|s| report.current(s)))
					.map(|path| {
						view! {
							<p class="path-distance">
								{format!(
									"The shortest distance from vertex {} to vertex {} is: {}.",
									path.origin,
									path.destination,
									path.distance_label(),
								)}
							</p>
							<p class="path-route">
								{format!(
									"The shortest path from vertex {} to vertex {} is: {}.",
									path.origin,
									path.destination,
									path.route_label(),
								)}
							</p>
						}
					})
			}}
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::builder::tests::RecordingSurface;
	use crate::graph::{Direction, EdgeRule, Tick};

	fn drawn_session(surface: &mut RecordingSurface) -> Session {
		let mut session = Session::new(EdgeRule::Permissive, Direction::Undirected);
		session.set_vertex_count(2);
		session.add_edge("0/1").unwrap();
		let generation = session.begin_draw(surface).unwrap();
		while let Tick::Applied(_) = session.tick(generation, surface) {}
		session
	}

	#[test]
	fn result_is_dropped_once_the_graph_is_redrawn() {
		let mut surface = RecordingSurface::default();
		let mut session = drawn_session(&mut surface);
		let report = PathReport {
			generation: session.generation(),
			path: session.shortest_path("0", "1").unwrap(),
		};
		assert_eq!(
			report.clone().current(&session).map(|p| p.destination),
			Some(1)
		);

		session.begin_draw(&mut surface).unwrap();
		assert_eq!(report.current(&session), None);
	}
}
