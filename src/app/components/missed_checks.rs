//! On-demand scan for trips whose check-in deadline has passed.

use dioxus::prelude::*;

use crate::app::context::use_client;
use crate::client::countdown::local_date_time;
use crate::client::state::MissedScan;
use crate::client::UiEvent;

#[component]
pub fn MissedChecksPanel() -> Element {
    let client = use_client();
    let state = client.state();
    let scan = state.read().missed().clone();

    let result = match scan {
        MissedScan::Idle => rsx! {},
        MissedScan::Scanning => rsx! {
            p { aria_busy: "true", "Scanning..." }
        },
        MissedScan::Clear => rsx! {
            p { class: "success", "✓ No missed check-ins found." }
        },
        MissedScan::Failed => rsx! {
            p { class: "error", "Error scanning for missed check-ins." }
        },
        MissedScan::Found(trips) => {
            let count = trips.len();
            rsx! {
                div { class: "missed-trips",
                    h3 { "⚠️ Missed Check-ins Found: {count}" }
                    for trip in trips {
                        div { class: "missed-trip-item",
                            p { strong { "Destination:" } " {trip.destination}" }
                            p { strong { "Overdue:" } " {trip.overdue_display()} minutes" }
                            p { strong { "Next Check Due:" } " {local_date_time(trip.next_check_due)}" }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        section { class: "card", id: "missed-checks",
            h2 { "Missed Check-ins" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| client.dispatch(UiEvent::ScanMissedChecks),
                "Scan for Missed Check-ins"
            }
            {result}
        }
    }
}
