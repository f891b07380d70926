//! Event-driven controller behind the web UI.
//!
//! The UI never talks to the backend directly: it dispatches a [`UiEvent`]
//! and re-renders from the [`AppState`] the controller publishes through
//! its observer. Events are handled one at a time; the caller serializes
//! them (see `app::context`).

use super::backend::ApiClient;
use super::error::{ClientError, ErrorKind};
use super::models::{CheckInRequest, Session, SosRequest};
use super::services::{Geolocator, Prompt, Ticker, TickerHandle};
use super::settings::{
    BACKEND_UNHEALTHY, CHECKIN_PERMISSION_DENIED, CHECKIN_SUCCESS, DELETE_CONTACT_CONFIRMATION,
    SOS_CONFIRMATION, SOS_PERMISSION_DENIED, SOS_REASON,
};
use super::sos::SosReport;
use super::state::{AppState, AuthTab, MissedScan, Notice};
use super::storage::{KeyValueStore, SessionStore};
use super::transport::Transport;
use super::validation;

/// Platform capabilities handed to the controller.
pub struct Services {
    pub transport: Box<dyn Transport>,
    pub storage: Box<dyn KeyValueStore>,
    pub geolocator: Box<dyn Geolocator>,
    pub prompt: Box<dyn Prompt>,
    pub ticker: Box<dyn Ticker>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// Page load: restore the cached session and check backend health.
    Start,
    SelectAuthTab(AuthTab),
    Login {
        email: String,
        password: String,
    },
    Signup {
        name: String,
        email: String,
        password: String,
    },
    Logout,
    RefreshTrip,
    StartTrip {
        destination: String,
        interval_minutes: String,
    },
    CheckIn,
    TriggerSos,
    CloseSosReport,
    AddContact {
        name: String,
        phone: String,
        email: String,
    },
    DeleteContact {
        id: String,
    },
    ScanMissedChecks,
    DismissNotice,
    DismissBanner,
}

impl UiEvent {
    /// Event name for logs; payloads may hold credentials.
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Start => "start",
            UiEvent::SelectAuthTab(_) => "select_auth_tab",
            UiEvent::Login { .. } => "login",
            UiEvent::Signup { .. } => "signup",
            UiEvent::Logout => "logout",
            UiEvent::RefreshTrip => "refresh_trip",
            UiEvent::StartTrip { .. } => "start_trip",
            UiEvent::CheckIn => "check_in",
            UiEvent::TriggerSos => "trigger_sos",
            UiEvent::CloseSosReport => "close_sos_report",
            UiEvent::AddContact { .. } => "add_contact",
            UiEvent::DeleteContact { .. } => "delete_contact",
            UiEvent::ScanMissedChecks => "scan_missed_checks",
            UiEvent::DismissNotice => "dismiss_notice",
            UiEvent::DismissBanner => "dismiss_banner",
        }
    }
}

type Observer = Box<dyn Fn(&AppState)>;

pub struct Controller {
    api: ApiClient,
    sessions: SessionStore,
    geolocator: Box<dyn Geolocator>,
    prompt: Box<dyn Prompt>,
    ticker: Box<dyn Ticker>,
    /// At most one running countdown
    countdown: Option<Box<dyn TickerHandle>>,
    state: AppState,
    observer: Option<Observer>,
}

impl Controller {
    pub fn new(services: Services) -> Self {
        Self {
            api: ApiClient::new(services.transport),
            sessions: SessionStore::new(services.storage),
            geolocator: services.geolocator,
            prompt: services.prompt,
            ticker: services.ticker,
            countdown: None,
            state: AppState::default(),
            observer: None,
        }
    }

    /// Called with the new state after every event (and at intermediate
    /// steps such as "Scanning...").
    pub fn set_observer(&mut self, observer: impl Fn(&AppState) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.is_some()
    }

    pub async fn dispatch(&mut self, event: UiEvent) {
        tracing::debug!(event = event.name(), "dispatch");

        match event {
            UiEvent::Start => self.start().await,
            UiEvent::SelectAuthTab(tab) => {
                self.state.auth_tab = tab;
                self.state.forms.login_error = None;
                self.state.forms.signup_error = None;
            }
            UiEvent::Login { email, password } => self.login(&email, &password).await,
            UiEvent::Signup {
                name,
                email,
                password,
            } => self.signup(&name, &email, &password).await,
            UiEvent::Logout => self.logout(),
            UiEvent::RefreshTrip => self.refresh_trip().await,
            UiEvent::StartTrip {
                destination,
                interval_minutes,
            } => self.start_trip(&destination, &interval_minutes).await,
            UiEvent::CheckIn => self.check_in().await,
            UiEvent::TriggerSos => self.trigger_sos().await,
            UiEvent::CloseSosReport => self.state.sos_report = None,
            UiEvent::AddContact { name, phone, email } => {
                self.add_contact(&name, &phone, &email).await
            }
            UiEvent::DeleteContact { id } => self.delete_contact(&id).await,
            UiEvent::ScanMissedChecks => self.scan_missed_checks().await,
            UiEvent::DismissNotice => self.state.notice = None,
            UiEvent::DismissBanner => self.state.backend_banner = None,
        }

        self.publish();
    }

    fn publish(&self) {
        if let Some(observer) = &self.observer {
            observer(&self.state);
        }
    }

    fn token(&self) -> Option<String> {
        self.state.session.as_ref().map(|s| s.token.clone())
    }

    // =========================================================================
    // Session
    // =========================================================================

    async fn start(&mut self) {
        self.state.session = self.sessions.restore();
        self.state.ready = true;
        if let Some(session) = &self.state.session {
            tracing::info!("Restored session for {}", session.user.email);
        }
        self.publish();

        self.check_backend().await;
        if self.state.session.is_some() {
            self.load_contacts().await;
            self.refresh_trip().await;
        }
    }

    async fn check_backend(&mut self) {
        if let Err(e) = self.api.health().await {
            tracing::warn!("Backend health check failed: {}", e);
            let message = match e.kind() {
                ErrorKind::Server => BACKEND_UNHEALTHY.to_string(),
                _ => e.to_string(),
            };
            self.state.backend_banner = Some(message);
        }
    }

    async fn login(&mut self, email: &str, password: &str) {
        self.state.forms.login_error = None;
        let request = match validation::login_form(email, password) {
            Ok(request) => request,
            Err(e) => {
                self.state.forms.login_error = Some(e.to_string());
                return;
            }
        };

        match self.api.login(&request).await {
            Ok(auth) => self.signed_in(auth.into()).await,
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.state.forms.login_error = Some(e.user_message("Login failed"));
            }
        }
    }

    async fn signup(&mut self, name: &str, email: &str, password: &str) {
        self.state.forms.signup_error = None;
        let request = match validation::signup_form(name, email, password) {
            Ok(request) => request,
            Err(e) => {
                self.state.forms.signup_error = Some(e.to_string());
                return;
            }
        };

        match self.api.register(&request).await {
            Ok(auth) => self.signed_in(auth.into()).await,
            Err(e) => {
                tracing::warn!("Signup failed: {}", e);
                self.state.forms.signup_error = Some(e.user_message("Signup failed"));
            }
        }
    }

    async fn signed_in(&mut self, session: Session) {
        tracing::info!("Signed in as {}", session.user.email);
        self.sessions.save(&session);
        self.state.session = Some(session);
        self.state.forms.login_error = None;
        self.state.forms.signup_error = None;
        self.publish();

        self.refresh_trip().await;
        self.load_contacts().await;
    }

    fn logout(&mut self) {
        self.sessions.clear();
        self.stop_countdown();
        self.state.reset_for_logout();
    }

    // =========================================================================
    // Trips
    // =========================================================================

    async fn refresh_trip(&mut self) {
        let Some(token) = self.token() else {
            return;
        };

        match self.api.active_trip(&token).await {
            Ok(Some(trip)) => {
                self.state.active_trip = Some(trip);
                self.start_countdown();
            }
            Ok(None) => {
                self.state.active_trip = None;
                self.stop_countdown();
            }
            Err(e) => {
                tracing::warn!("Failed to load active trip: {}", e);
                self.state.active_trip = None;
                self.stop_countdown();
            }
        }
    }

    async fn start_trip(&mut self, destination: &str, interval_minutes: &str) {
        let Some(token) = self.token() else {
            return;
        };
        self.state.forms.trip_error = None;

        let request = match validation::trip_form(destination, interval_minutes) {
            Ok(request) => request,
            Err(e) => {
                self.state.forms.trip_error = Some(e.to_string());
                return;
            }
        };

        match self.api.start_trip(&token, &request).await {
            Ok(trip) => {
                tracing::info!("Trip to {} started", trip.destination);
                self.state.active_trip = Some(trip);
                self.state.forms.trip_epoch = self.state.forms.trip_epoch.wrapping_add(1);
                self.start_countdown();
            }
            Err(e) => {
                tracing::warn!("Failed to start trip: {}", e);
                self.state.forms.trip_error = Some(e.user_message("Failed to start trip"));
            }
        }
    }

    async fn check_in(&mut self) {
        let Some(token) = self.token() else {
            return;
        };
        let Some(trip_id) = self.state.active_trip.as_ref().map(|t| t.id.clone()) else {
            return;
        };

        let result = async {
            let position = self.geolocator.current_position().await?;
            let request = CheckInRequest {
                trip_id,
                lat: position.latitude,
                lng: position.longitude,
            };
            self.api.check_in(&token, &request).await
        }
        .await;

        match result {
            Ok(response) => {
                if let Some(trip) = self.state.active_trip.as_mut() {
                    trip.next_check_due = response.next_check_due;
                }
                self.state.notice = Some(Notice::success(CHECKIN_SUCCESS));
            }
            Err(e) => {
                tracing::warn!("Check-in failed: {}", e);
                self.state.notice = Some(Notice::error(
                    e.notice_message("Failed to record check-in", CHECKIN_PERMISSION_DENIED),
                ));
            }
        }
    }

    /// Replaces any running countdown.
    fn start_countdown(&mut self) {
        self.stop_countdown();
        self.countdown = Some(self.ticker.start());
    }

    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.cancel();
        }
    }

    // =========================================================================
    // SOS
    // =========================================================================

    async fn trigger_sos(&mut self) {
        let Some(token) = self.token() else {
            return;
        };
        if !self.prompt.confirm(SOS_CONFIRMATION) {
            return;
        }

        let result: Result<_, ClientError> = async {
            let position = self.geolocator.current_position().await?;
            let request = SosRequest {
                lat: position.latitude,
                lng: position.longitude,
                reason: SOS_REASON.to_string(),
            };
            self.api.send_sos(&token, &request).await
        }
        .await;

        match result {
            Ok(data) => {
                tracing::info!("SOS alert sent");
                self.state.sos_report = Some(SosReport::from_json(&data));
            }
            Err(e) => {
                tracing::warn!("SOS failed: {}", e);
                self.state.notice = Some(Notice::error(
                    e.notice_message("Failed to send SOS alert", SOS_PERMISSION_DENIED),
                ));
            }
        }
    }

    // =========================================================================
    // Contacts
    // =========================================================================

    async fn load_contacts(&mut self) {
        let Some(token) = self.token() else {
            return;
        };

        match self.api.contacts(&token).await {
            Ok(contacts) => {
                self.state.contacts = contacts;
                self.state.contacts_loaded = true;
            }
            Err(e) => tracing::warn!("Failed to load contacts: {}", e),
        }
    }

    async fn add_contact(&mut self, name: &str, phone: &str, email: &str) {
        let Some(token) = self.token() else {
            return;
        };
        self.state.forms.contact_error = None;

        let contact = match validation::contact_form(name, phone, email) {
            Ok(contact) => contact,
            Err(e) => {
                self.state.forms.contact_error = Some(e.to_string());
                return;
            }
        };

        match self.api.add_contact(&token, &contact).await {
            Ok(()) => {
                self.state.forms.contact_epoch = self.state.forms.contact_epoch.wrapping_add(1);
                self.load_contacts().await;
            }
            Err(e) => {
                tracing::warn!("Failed to add contact: {}", e);
                self.state.forms.contact_error = Some(e.user_message("Failed to add contact"));
            }
        }
    }

    async fn delete_contact(&mut self, id: &str) {
        let Some(token) = self.token() else {
            return;
        };
        if !self.prompt.confirm(DELETE_CONTACT_CONFIRMATION) {
            return;
        }

        match self.api.delete_contact(&token, id).await {
            Ok(()) => self.load_contacts().await,
            Err(e) => {
                tracing::warn!("Failed to delete contact {}: {}", id, e);
                self.state.notice = Some(Notice::error(e.action_message("Failed to delete contact")));
            }
        }
    }

    // =========================================================================
    // Missed check-ins
    // =========================================================================

    async fn scan_missed_checks(&mut self) {
        let Some(token) = self.token() else {
            return;
        };
        self.state.missed = MissedScan::Scanning;
        self.publish();

        self.state.missed = match self.api.missed_checks(&token).await {
            Ok(trips) if trips.is_empty() => MissedScan::Clear,
            Ok(trips) => MissedScan::Found(trips),
            Err(e) => {
                tracing::warn!("Missed check-in scan failed: {}", e);
                MissedScan::Failed
            }
        };
    }
}
