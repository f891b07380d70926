//! Login / signup screen.

use dioxus::prelude::*;

use crate::app::components::form_inputs::{FieldError, TextInput};
use crate::app::context::use_client;
use crate::client::state::AuthTab;
use crate::client::UiEvent;

#[component]
pub fn AuthPage() -> Element {
    let client = use_client();
    let state = client.state();
    let tab = state.read().auth_tab();

    let tab_class = move |t: AuthTab| if tab == t { "tab-btn active" } else { "tab-btn" };

    rsx! {
        section { class: "card auth-card",
            div { class: "tabs",
                button {
                    class: tab_class(AuthTab::Login),
                    r#type: "button",
                    onclick: move |_| client.dispatch(UiEvent::SelectAuthTab(AuthTab::Login)),
                    "Login"
                }
                button {
                    class: tab_class(AuthTab::Signup),
                    r#type: "button",
                    onclick: move |_| client.dispatch(UiEvent::SelectAuthTab(AuthTab::Signup)),
                    "Sign Up"
                }
            }
            match tab {
                AuthTab::Login => rsx! { LoginForm {} },
                AuthTab::Signup => rsx! { SignupForm {} },
            }
        }
    }
}

#[component]
fn LoginForm() -> Element {
    let client = use_client();
    let state = client.state();
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let error = state.read().forms().login_error.clone();

    rsx! {
        div { class: "auth-form",
            TextInput { label: "Email", input_type: "email", value: email }
            TextInput { label: "Password", input_type: "password", value: password }
            FieldError { message: error }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| {
                    client.dispatch(UiEvent::Login {
                        email: email(),
                        password: password(),
                    })
                },
                "Login"
            }
        }
    }
}

#[component]
fn SignupForm() -> Element {
    let client = use_client();
    let state = client.state();
    let name = use_signal(String::new);
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let error = state.read().forms().signup_error.clone();

    rsx! {
        div { class: "auth-form",
            TextInput { label: "Name", placeholder: "Letters and spaces only", value: name }
            TextInput { label: "Email", input_type: "email", value: email }
            TextInput {
                label: "Password",
                input_type: "password",
                placeholder: "8+ chars, upper, lower, number, special",
                value: password,
            }
            FieldError { message: error }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| {
                    client.dispatch(UiEvent::Signup {
                        name: name(),
                        email: email(),
                        password: password(),
                    })
                },
                "Sign Up"
            }
        }
    }
}
