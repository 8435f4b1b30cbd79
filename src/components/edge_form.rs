//! Vertex count, edge entry and the list of pending edges.

use leptos::prelude::*;
use log::warn;

use super::prompt::PromptService;
use crate::graph::{PendingEdge, Session};

#[component]
pub fn EdgeForm(session: RwSignal<Session>) -> impl IntoView {
	let prompts = PromptService::expect();
	let edge_text = RwSignal::new(String::new());
	let edge_input = NodeRef::<leptos::html::Input>::new();

	let can_add = move || edge_text.with(|text| session.with(|s| s.can_add_edge(text)));
	let add_edge = move || {
		let added = session
			.try_update(|s| s.add_edge(&edge_text.get_untracked()))
			.flatten();
		if added.is_some() {
			edge_text.set(String::new());
		}
	};

	let on_count_input = move |ev: leptos::ev::Event| {
		let raw = event_target_value(&ev);
		if let Some(Err(e)) = session.try_update(|s| s.set_vertex_count_text(&raw)) {
			warn!("graph-sketch: rejected vertex count: {e}");
			prompts.notify(e.to_string());
		}
	};
	let on_count_key = move |ev: leptos::ev::KeyboardEvent| {
		if ev.key() == "Enter" {
			if let Some(input) = edge_input.get() {
				let _ = input.focus();
			}
		}
	};
	let on_edge_key = move |ev: leptos::ev::KeyboardEvent| {
		if ev.key() == "Enter" && can_add() {
			add_edge();
		}
	};

	view! {
		<section class="edge-form">
			<label for="vertices-control">"Vertices"</label>
			<input
				id="vertices-control"
				type="number"
				min="0"
				step="1"
				prop:value=move || session.with(|s| s.vertex_count().to_string())
				on:input=on_count_input
				on:keydown=on_count_key
			/>

			<Show when=move || session.with(Session::edge_entry_enabled)>
				<div class="with-vertices">
					<label for="new-edge-control">"New edge (start/end)"</label>
					<input
						id="new-edge-control"
						type="text"
						placeholder="0/1"
						pattern=r"\s*\d+\s*/\s*\d+\s*"
						node_ref=edge_input
						prop:value=move || edge_text.get()
						on:input=move |ev| edge_text.set(event_target_value(&ev))
						on:keydown=on_edge_key
					/>
					<button type="button" disabled=move || !can_add() on:click=move |_| add_edge()>
						"Add edge"
					</button>

					<ul class="edges-list">
						<For
							each=move || session.with(|s| s.edges().snapshot())
							key=|edge| edge.id
							children=move |edge: PendingEdge| {
								view! {
									<li
										title="Click to remove"
										on:click=move |_| {
											session.update(|s| {
												s.remove_edge(edge.id);
											});
										}
									>
										{edge.to_string()}
									</li>
								}
							}
						/>
					</ul>
				</div>
			</Show>
		</section>
	}
}
