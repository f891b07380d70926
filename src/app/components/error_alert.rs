//! Dismissable alerts for action notices and the backend banner.

use dioxus::prelude::*;

use crate::client::state::{Notice, NoticeKind};

/// Outcome of a button action (check-in, SOS, contact delete).
#[component]
pub fn NoticeAlert(notice: Notice, on_dismiss: EventHandler<()>) -> Element {
    let class = match notice.kind {
        NoticeKind::Success => "alert alert-success",
        NoticeKind::Error => "alert alert-error",
    };

    rsx! {
        div { class: "{class}", role: "status",
            span { "{notice.message}" }
            button {
                class: "btn btn-ghost btn-sm",
                r#type: "button",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}

/// Shown when the startup health check fails.
#[component]
pub fn BackendBanner(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div { class: "backend-banner", role: "alert",
            strong { "⚠️ Backend Connection Error:" }
            " {message}"
            button {
                class: "btn btn-ghost btn-sm",
                r#type: "button",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}
