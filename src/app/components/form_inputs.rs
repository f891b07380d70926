//! Reusable form input components.

use dioxus::prelude::*;

/// A labeled text input bound to a string signal.
#[component]
pub fn TextInput(
    /// Input label
    label: &'static str,
    /// HTML input type ("text", "email", "password", "tel", "number")
    #[props(default = "text")]
    input_type: &'static str,
    #[props(default = "")] placeholder: &'static str,
    /// Bound value
    value: Signal<String>,
) -> Element {
    let mut value = value;

    rsx! {
        label { class: "field",
            span { class: "field-label", "{label}" }
            input {
                class: "input",
                r#type: input_type,
                placeholder: placeholder,
                value: "{value}",
                oninput: move |e| value.set(e.value()),
            }
        }
    }
}

/// Inline validation or request error under a form.
#[component]
pub fn FieldError(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            p { class: "form-error", "{message}" }
        }
    }
}
