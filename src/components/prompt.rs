//! Non-blocking replacements for `prompt()` and `alert()`.
//!
//! [`PromptService::ask`] returns a future that resolves when the user
//! answers the dialog rendered by [`PromptHost`]; callers await it inside
//! `spawn_local`, so nothing blocks while the question is open.

use futures::channel::oneshot;
use leptos::prelude::*;

struct PromptRequest {
	question: String,
	reply: oneshot::Sender<Option<String>>,
}

/// Handle to the page's dialog. Cheap to copy into event handlers.
#[derive(Clone, Copy)]
pub struct PromptService {
	request: RwSignal<Option<PromptRequest>>,
	notice: RwSignal<Option<String>>,
}

impl PromptService {
	/// Create the service and make it available to child components.
	pub fn provide() -> Self {
		let service = Self::new();
		provide_context(service);
		service
	}

	fn new() -> Self {
		Self {
			request: RwSignal::new(None),
			notice: RwSignal::new(None),
		}
	}

	pub fn expect() -> Self {
		expect_context::<Self>()
	}

	/// Ask for one line of text. Resolves to `None` if the user cancels or
	/// another question replaces this one.
	pub async fn ask(self, question: impl Into<String>) -> Option<String> {
		let (reply, response) = oneshot::channel();
		self.request.set(Some(PromptRequest {
			question: question.into(),
			reply,
		}));
		response.await.ok().flatten()
	}

	/// Show a message until the user dismisses it.
	pub fn notify(self, message: impl Into<String>) {
		self.notice.set(Some(message.into()));
	}

	fn answer(self, value: Option<String>) {
		if let Some(request) = self.request.try_update(Option::take).flatten() {
			// The asker may have gone away; nothing to do then.
			let _ = request.reply.send(value);
		}
	}
}

/// Renders the pending question and the latest notice.
#[component]
pub fn PromptHost() -> impl IntoView {
	let prompts = PromptService::expect();
	let draft = RwSignal::new(String::new());

	let question = move || {
		prompts
			.request
			.with(|r| r.as_ref().map(|r| r.question.clone()).unwrap_or_default())
	};
	let submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		prompts.answer(Some(draft.get_untracked()));
		draft.set(String::new());
	};
	let cancel = move |_| {
		prompts.answer(None);
		draft.set(String::new());
	};

	view! {
		<Show when=move || prompts.request.with(Option::is_some)>
			<div class="modal-backdrop">
				<form class="modal" on:submit=submit>
					<label for="prompt-input">{question}</label>
					<input
						id="prompt-input"
						type="text"
						autofocus
						prop:value=move || draft.get()
						on:input=move |ev| draft.set(event_target_value(&ev))
					/>
					<div class="modal-actions">
						<button type="submit">"OK"</button>
						<button type="button" on:click=cancel>"Cancel"</button>
					</div>
				</form>
			</div>
		</Show>
		<Show when=move || prompts.notice.with(Option::is_some)>
			<div class="notice" role="alert">
				<span>{move || prompts.notice.get().unwrap_or_default()}</span>
				<button type="button" on:click=move |_| prompts.notice.set(None)>"OK"</button>
			</div>
		</Show>
	}
}

#[cfg(test)]
mod tests {
	use futures::FutureExt;

	use super::*;

	fn open_question(prompts: PromptService) -> Option<String> {
		prompts
			.request
			.with_untracked(|r| r.as_ref().map(|r| r.question.clone()))
	}

	#[test]
	fn answered_question_resolves_with_the_text() {
		Owner::new().with(|| {
			let prompts = PromptService::new();
			let mut origin = Box::pin(prompts.ask("Origin vertex"));
			assert_eq!(origin.as_mut().now_or_never(), None);
			assert_eq!(open_question(prompts).as_deref(), Some("Origin vertex"));

			prompts.answer(Some("7".to_string()));
			assert_eq!(origin.as_mut().now_or_never(), Some(Some("7".to_string())));
			assert_eq!(open_question(prompts), None);
		});
	}

	#[test]
	fn cancelled_question_resolves_to_none() {
		Owner::new().with(|| {
			let prompts = PromptService::new();
			let mut weight = Box::pin(prompts.ask("Edge weight (e0)"));
			assert_eq!(weight.as_mut().now_or_never(), None);

			prompts.answer(None);
			assert_eq!(weight.as_mut().now_or_never(), Some(None));
		});
	}

	#[test]
	fn newer_question_replaces_the_open_one() {
		Owner::new().with(|| {
			let prompts = PromptService::new();
			let mut first = Box::pin(prompts.ask("Origin vertex"));
			assert_eq!(first.as_mut().now_or_never(), None);

			let mut second = Box::pin(prompts.ask("Edge weight (e1)"));
			assert_eq!(second.as_mut().now_or_never(), None);
			assert_eq!(first.as_mut().now_or_never(), Some(None));
			assert_eq!(open_question(prompts).as_deref(), Some("Edge weight (e1)"));

			prompts.answer(Some("7".to_string()));
			assert_eq!(second.as_mut().now_or_never(), Some(Some("7".to_string())));
		});
	}

	#[test]
	fn answering_with_nothing_open_is_ignored() {
		Owner::new().with(|| {
			let prompts = PromptService::new();
			prompts.answer(Some("7".to_string()));
			assert_eq!(open_question(prompts), None);

			prompts.notify("Vertex 9 is not part of the drawn graph");
			assert_eq!(
				prompts.notice.get_untracked().as_deref(),
				Some("Vertex 9 is not part of the drawn graph")
			);
		});
	}
}
