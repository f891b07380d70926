//! Navigation bar component for the web UI.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// Signed-in user's display name; `None` on the auth screen
    pub user_name: Option<String>,
    /// Called when "Logout" is clicked
    pub on_logout: EventHandler<()>,
}

/// Navigation bar: brand on the left, user and logout on the right.
#[component]
pub fn Nav(props: NavProps) -> Element {
    let on_logout = props.on_logout;

    rsx! {
        nav {
            ul {
                li {
                    strong { "🛡️ EchoCheck" }
                }
            }
            if let Some(name) = props.user_name.clone() {
                ul {
                    li { span { class: "user-name", "{name}" } }
                    li {
                        button {
                            class: "btn btn-secondary btn-sm",
                            r#type: "button",
                            onclick: move |_| on_logout.call(()),
                            "Logout"
                        }
                    }
                }
            }
        }
    }
}
