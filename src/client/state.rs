//! Everything the UI renders, owned by the controller.
//!
//! Fields are only mutated by [`Controller`](super::controller::Controller);
//! components read a published copy through the accessors.

use chrono::{DateTime, Utc};

use super::countdown::Countdown;
use super::models::{Contact, MissedTrip, Session, Trip, User};
use super::sos::SosReport;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthTab {
    #[default]
    Login,
    Signup,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Result of a button action (check-in, SOS, delete) shown above the page.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum MissedScan {
    #[default]
    Idle,
    Scanning,
    /// Scan finished with nothing overdue
    Clear,
    Found(Vec<MissedTrip>),
    Failed,
}

/// Inline form errors plus reset counters. A form clears its inputs
/// whenever its epoch changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub login_error: Option<String>,
    pub signup_error: Option<String>,
    pub trip_error: Option<String>,
    pub contact_error: Option<String>,
    pub trip_epoch: u32,
    pub contact_epoch: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub(crate) ready: bool,
    pub(crate) auth_tab: AuthTab,
    pub(crate) session: Option<Session>,
    pub(crate) active_trip: Option<Trip>,
    pub(crate) contacts: Vec<Contact>,
    pub(crate) contacts_loaded: bool,
    pub(crate) missed: MissedScan,
    pub(crate) sos_report: Option<SosReport>,
    pub(crate) backend_banner: Option<String>,
    pub(crate) forms: FormState,
    pub(crate) notice: Option<Notice>,
}

impl AppState {
    /// False until the stored session has been looked at.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn auth_tab(&self) -> AuthTab {
        self.auth_tab
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_trip(&self) -> Option<&Trip> {
        self.active_trip.as_ref()
    }

    /// Countdown for the active trip at `now`.
    pub fn countdown_at(&self, now: DateTime<Utc>) -> Option<Countdown> {
        self.active_trip
            .as_ref()
            .map(|trip| Countdown::between(trip.next_check_due, now))
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn contacts_loaded(&self) -> bool {
        self.contacts_loaded
    }

    pub fn missed(&self) -> &MissedScan {
        &self.missed
    }

    pub fn sos_report(&self) -> Option<&SosReport> {
        self.sos_report.as_ref()
    }

    pub fn backend_banner(&self) -> Option<&str> {
        self.backend_banner.as_deref()
    }

    pub fn forms(&self) -> &FormState {
        &self.forms
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Drops everything tied to the signed-in user. The backend banner and
    /// readiness survive; the auth forms start clean on the login tab.
    pub(crate) fn reset_for_logout(&mut self) {
        *self = AppState {
            ready: self.ready,
            backend_banner: self.backend_banner.take(),
            ..AppState::default()
        };
    }
}
