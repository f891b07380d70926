//! Signed-in screen: trip, contacts and missed check-in scan.

use dioxus::prelude::*;

use crate::app::components::{ContactsPanel, MissedChecksPanel, SosReportModal, TripPanel};
use crate::app::context::use_client;

#[component]
pub fn HomePage() -> Element {
    let client = use_client();
    let state = client.state();
    let report = state.read().sos_report().cloned();

    rsx! {
        TripPanel {}
        ContactsPanel {}
        MissedChecksPanel {}
        if let Some(report) = report {
            SosReportModal { report }
        }
    }
}
