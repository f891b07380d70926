//! Shared UI components for the Dioxus web client.

pub mod contacts;
pub mod error_alert;
pub mod form_inputs;
pub mod layout;
pub mod missed_checks;
pub mod nav;
pub mod sos;
pub mod trip_panel;

pub use contacts::ContactsPanel;
pub use error_alert::{BackendBanner, NoticeAlert};
pub use layout::Layout;
pub use missed_checks::MissedChecksPanel;
pub use nav::Nav;
pub use sos::SosReportModal;
pub use trip_panel::TripPanel;
