//! Active trip panel: start form when idle, countdown and actions when a
//! trip is running.

use dioxus::prelude::*;

use crate::app::context::use_client;
use crate::client::countdown::local_date_time;
use crate::client::models::Trip;
use crate::client::UiEvent;

use super::form_inputs::{FieldError, TextInput};

#[component]
pub fn TripPanel() -> Element {
    let client = use_client();
    let state = client.state();
    let trip = state.read().active_trip().cloned();

    rsx! {
        section { class: "card", id: "trip",
            h2 { "Current Trip" }
            match trip {
                Some(trip) => rsx! { ActiveTrip { trip } },
                None => rsx! { StartTripForm {} },
            }
        }
    }
}

#[component]
fn ActiveTrip(trip: Trip) -> Element {
    let client = use_client();
    let state = client.state();

    // Re-rendered by the ticker through `now`
    let countdown = state.read().countdown_at(client.now());
    let (countdown_text, overdue) = match countdown {
        Some(c) => (c.to_string(), c.is_overdue()),
        None => (String::new(), false),
    };
    let due = local_date_time(trip.next_check_due);

    rsx! {
        div { class: "active-trip",
            p { strong { "Destination:" } " {trip.destination}" }
            p { strong { "Next check-in due:" } " {due}" }
            div {
                class: if overdue { "countdown overdue" } else { "countdown" },
                "{countdown_text}"
            }
            div { class: "actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| client.dispatch(UiEvent::CheckIn),
                    "✓ Check In"
                }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    onclick: move |_| client.dispatch(UiEvent::TriggerSos),
                    "🚨 SOS"
                }
            }
        }
    }
}

#[component]
fn StartTripForm() -> Element {
    let client = use_client();
    let state = client.state();
    let destination = use_signal(String::new);
    let interval = use_signal(String::new);

    // Clear inputs after a trip starts
    let epoch = use_memo(move || state.read().forms().trip_epoch);
    use_effect(move || {
        let _ = epoch();
        let mut destination = destination;
        let mut interval = interval;
        destination.set(String::new());
        interval.set(String::new());
    });

    let error = state.read().forms().trip_error.clone();

    rsx! {
        div { class: "no-trip",
            p { class: "text-muted", "No active trip. Start one to begin timed check-ins." }
            TextInput {
                label: "Destination",
                placeholder: "Where are you going?",
                value: destination,
            }
            TextInput {
                label: "Check-in interval (minutes)",
                input_type: "number",
                placeholder: "15",
                value: interval,
            }
            FieldError { message: error }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| {
                    client.dispatch(UiEvent::StartTrip {
                        destination: destination(),
                        interval_minutes: interval(),
                    })
                },
                "Start Trip"
            }
        }
    }
}
