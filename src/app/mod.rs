//! Dioxus web client.
//!
//! A single page with two screens: auth when no session exists, otherwise
//! the trip/contacts home screen. All behavior lives in
//! [`crate::client::Controller`]; components render its published state.

use dioxus::prelude::*;

pub mod api;
pub mod browser;
pub mod components;
pub mod context;
pub mod pages;

use crate::client::UiEvent;
use components::{BackendBanner, Layout, NoticeAlert};
use context::use_client_provider;
use pages::{AuthPage, HomePage};

/// Root app component
#[component]
pub fn App() -> Element {
    // Initialize client context at app root (single controller for all screens)
    let client = use_client_provider();
    let state = client.state();

    let (ready, signed_in, user_name, banner, notice) = {
        let s = state.read();
        (
            s.is_ready(),
            s.is_signed_in(),
            s.user().map(|u| u.name.clone()),
            s.backend_banner().map(str::to_string),
            s.notice().cloned(),
        )
    };
    let title = if signed_in { "Home" } else { "Sign In" };

    rsx! {
        Layout {
            title: title.to_string(),
            user_name,
            on_logout: move |_| client.dispatch(UiEvent::Logout),

            if let Some(message) = banner {
                BackendBanner {
                    message,
                    on_dismiss: move |_| client.dispatch(UiEvent::DismissBanner),
                }
            }
            if let Some(notice) = notice {
                NoticeAlert {
                    notice,
                    on_dismiss: move |_| client.dispatch(UiEvent::DismissNotice),
                }
            }

            if !ready {
                article { aria_busy: "true", "Loading..." }
            } else if signed_in {
                HomePage {}
            } else {
                AuthPage {}
            }
        }
    }
}
