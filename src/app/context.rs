//! Client context shared by every component.
//!
//! Owns the single [`Controller`] and the signals it publishes into.
//! Components read `state` and `now` and send everything else through
//! [`ClientContext::dispatch`].

use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use futures::StreamExt;

use crate::client::{AppState, Controller, Services, UiEvent};

use super::browser;

/// Global client state shared via context
#[derive(Clone, Copy)]
pub struct ClientContext {
    state: Signal<AppState>,
    /// Advanced by the countdown ticker
    now: Signal<DateTime<Utc>>,
    events: Coroutine<UiEvent>,
}

impl ClientContext {
    pub fn state(&self) -> Signal<AppState> {
        self.state
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.now)()
    }

    /// Queue an event. Events run one at a time in the order dispatched,
    /// and keep running after the dispatching component unmounts.
    pub fn dispatch(&self, event: UiEvent) {
        self.events.send(event);
    }
}

/// Initialize client context provider - call once at app root
pub fn use_client_provider() -> ClientContext {
    let ctx = use_client_provider_with(browser::services);

    // Client-side only: restore the session and check backend health
    #[cfg(target_arch = "wasm32")]
    {
        use_effect(move || ctx.dispatch(UiEvent::Start));
    }

    ctx
}

/// Same as [`use_client_provider`] with caller-supplied services. The
/// controller's event loop lives in the calling scope, so call it from the
/// root.
pub fn use_client_provider_with(
    mut make_services: impl FnMut(Signal<DateTime<Utc>>) -> Services + 'static,
) -> ClientContext {
    let state = use_signal(AppState::default);
    let now = use_signal(Utc::now);

    let events = use_coroutine(move |mut rx: UnboundedReceiver<UiEvent>| {
        let mut controller = Controller::new(make_services(now));
        controller.set_observer(move |published: &AppState| {
            let mut state = state;
            state.set(published.clone());
        });
        async move {
            while let Some(event) = rx.next().await {
                controller.dispatch(event).await;
            }
        }
    });

    let ctx = ClientContext { state, now, events };
    use_context_provider(|| ctx);
    ctx
}

/// Get client context - use in any component
pub fn use_client() -> ClientContext {
    use_context::<ClientContext>()
}
