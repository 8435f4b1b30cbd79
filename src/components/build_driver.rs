//! Paces a build on a fixed interval.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use leptos::leptos_dom::helpers::{IntervalHandle, set_interval_with_handle};
use leptos::prelude::*;
use log::{debug, error};

use super::graph_canvas::SharedSurface;
use crate::graph::{Session, Tick};

/// Start a new build and tick it every `interval` until it finishes or a
/// newer build supersedes it.
///
/// `timer` holds the interval of the latest build; it is cleared before the
/// new one starts. A tick that still fires afterwards is rejected by the
/// session as stale and stops its own interval.
pub fn start_build(
	session: RwSignal<Session>,
	surface: &SharedSurface,
	timer: StoredValue<Option<IntervalHandle>>,
	interval: Duration,
) {
	let started = session
		.try_update(|s| s.begin_draw(&mut *surface.borrow_mut()))
		.flatten();
	let Some(generation) = started else {
		return;
	};
	if let Some(previous) = timer.get_value() {
		previous.clear();
	}

	let own: Rc<Cell<Option<IntervalHandle>>> = Rc::default();
	let (surface_tick, own_tick) = (surface.clone(), own.clone());
	let handle = set_interval_with_handle(
		move || {
			let tick = session
				.try_update(|s| s.tick(generation, &mut *surface_tick.borrow_mut()))
				.unwrap_or(Tick::Stale);
			if matches!(tick, Tick::Finished | Tick::Stale) {
				debug!("build {generation:?} timer stopped: {tick:?}");
				if let Some(handle) = own_tick.take() {
					handle.clear();
				}
			}
		},
		interval,
	);

	match handle {
		Ok(handle) => {
			own.set(Some(handle));
			timer.set_value(Some(handle));
		}
		Err(e) => error!("graph-sketch: could not start build timer: {e:?}"),
	}
}
