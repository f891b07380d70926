//! Layout component wrapping both screens.

use dioxus::prelude::*;

use super::nav::Nav;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    pub user_name: Option<String>,
    pub on_logout: EventHandler<()>,
    /// Page content
    pub children: Element,
}

/// Main layout component.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("ECHOCHECK_VERSION");
    let git_sha = env!("ECHOCHECK_GIT_SHA");
    let full_title = format!("{} - EchoCheck", props.title);

    rsx! {
        // Head elements - Dioxus hoists these to the real <head>
        document::Title { "{full_title}" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Link {
            rel: "stylesheet",
            href: asset!("/public/echocheck.css")
        }

        Nav {
            user_name: props.user_name.clone(),
            on_logout: props.on_logout,
        }
        main { class: "container",
            {props.children}
        }
        footer { class: "container footer",
            small { class: "text-muted", "EchoCheck v{version} ({git_sha})" }
        }
    }
}
