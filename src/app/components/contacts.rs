//! Trusted contacts: add form and list.

use dioxus::prelude::*;

use crate::app::context::use_client;
use crate::client::models::Contact;
use crate::client::UiEvent;

use super::form_inputs::{FieldError, TextInput};

#[component]
pub fn ContactsPanel() -> Element {
    let client = use_client();
    let state = client.state();
    let name = use_signal(String::new);
    let phone = use_signal(String::new);
    let email = use_signal(String::new);

    // Clear inputs after a contact is added
    let epoch = use_memo(move || state.read().forms().contact_epoch);
    use_effect(move || {
        let _ = epoch();
        for mut field in [name, phone, email] {
            field.set(String::new());
        }
    });

    let (contacts, error) = {
        let s = state.read();
        (s.contacts().to_vec(), s.forms().contact_error.clone())
    };

    rsx! {
        section { class: "card", id: "contacts",
            h2 { "Trusted Contacts" }
            div { class: "contact-form",
                TextInput { label: "Name", placeholder: "Contact name", value: name }
                TextInput {
                    label: "Phone (+91)",
                    input_type: "tel",
                    placeholder: "10-digit number",
                    value: phone,
                }
                TextInput {
                    label: "Email (optional)",
                    input_type: "email",
                    value: email,
                }
                FieldError { message: error }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        client.dispatch(UiEvent::AddContact {
                            name: name(),
                            phone: phone(),
                            email: email(),
                        })
                    },
                    "Add Contact"
                }
            }

            div { class: "contacts-list",
                if contacts.is_empty() {
                    p { class: "empty-state", "No contacts yet. Add your trusted contacts above." }
                } else {
                    for contact in contacts {
                        ContactRow { key: "{contact.id}", contact }
                    }
                }
            }
        }
    }
}

#[component]
fn ContactRow(contact: Contact) -> Element {
    let client = use_client();
    let id = contact.id.clone();
    let email = contact.display_email().map(str::to_string);

    rsx! {
        div { class: "contact-item",
            div { class: "contact-info",
                strong { "{contact.name}" }
                span { "{contact.phone}" }
                if let Some(email) = email {
                    span { class: "email", "{email}" }
                }
            }
            button {
                class: "btn btn-small btn-danger",
                r#type: "button",
                onclick: move |_| client.dispatch(UiEvent::DeleteContact { id: id.clone() }),
                "Delete"
            }
        }
    }
}
