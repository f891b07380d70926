//! Controller flows against in-memory browser services.
//!
//! Each test drives the controller with `UiEvent`s exactly as the UI does and
//! asserts on the published state, the requests the backend saw, and the
//! side effects on storage, geolocation, prompts and the countdown ticker.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod support;

use std::cell::RefCell;
use std::rc::Rc;

use echocheck::client::models::Session;
use echocheck::client::services::Position;
use echocheck::client::settings::{
    BACKEND_UNHEALTHY, CHECKIN_PERMISSION_DENIED, CHECKIN_SUCCESS, DELETE_CONTACT_CONFIRMATION,
    SOS_CONFIRMATION, SOS_PERMISSION_DENIED, SOS_REASON, TOKEN_KEY, USER_KEY,
};
use echocheck::client::sos::{ChannelBody, MapLink};
use echocheck::client::state::{AuthTab, MissedScan, NoticeKind};
use echocheck::client::storage::KeyValueStore;
use echocheck::client::transport::Method;
use echocheck::client::{ClientError, UiEvent, ValidationError};
use serde_json::json;
use support::{trip_json, user, Harness, TOKEN};

// =============================================================================
// Startup
// =============================================================================

#[test]
fn start_without_session_shows_auth() {
    let mut h = Harness::new();
    h.dispatch(UiEvent::Start);

    let state = h.controller.state();
    assert!(state.is_ready());
    assert!(!state.is_signed_in());
    assert_eq!(state.backend_banner(), None);
    assert_eq!(h.backend.calls(), vec!["GET /api/health"]);
}

#[test]
fn start_restores_cached_session_and_loads_data() {
    let h = Harness::signed_in();

    let state = h.controller.state();
    assert_eq!(
        state.session(),
        Some(&Session {
            token: TOKEN.into(),
            user: user()
        })
    );
    assert!(state.contacts_loaded());
    assert!(state.active_trip().is_none());
    assert_eq!(
        h.backend.calls(),
        vec!["GET /api/health", "GET /api/contacts", "GET /api/trip/active"]
    );
    let contacts = h.backend.last(Method::Get, "/api/contacts").unwrap();
    assert_eq!(contacts.bearer.as_deref(), Some(TOKEN));
}

#[test]
fn unreachable_backend_sets_banner() {
    let mut h = Harness::new();
    h.backend
        .fail(Method::Get, "/api/health", ClientError::Unreachable);
    h.dispatch(UiEvent::Start);

    let banner = h.controller.state().backend_banner().unwrap();
    assert!(banner.starts_with("Cannot connect to backend server"));
}

#[test]
fn unhealthy_backend_sets_generic_banner() {
    let mut h = Harness::new();
    h.backend
        .respond(Method::Get, "/api/health", 500, serde_json::Value::Null);
    h.dispatch(UiEvent::Start);

    assert_eq!(h.controller.state().backend_banner(), Some(BACKEND_UNHEALTHY));

    h.dispatch(UiEvent::DismissBanner);
    assert_eq!(h.controller.state().backend_banner(), None);
}

#[test]
fn observer_sees_ready_before_health_check_finishes() {
    let mut h = Harness::new();
    h.cache_session();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    h.controller
        .set_observer(move |state| sink.borrow_mut().push((state.is_ready(), state.contacts_loaded())));

    h.dispatch(UiEvent::Start);

    let seen = seen.borrow();
    assert_eq!(seen.first(), Some(&(true, false)));
    assert_eq!(seen.last(), Some(&(true, true)));
}

// =============================================================================
// Auth
// =============================================================================

#[test]
fn signup_validation_blocks_request() {
    let mut h = Harness::new();
    h.dispatch(UiEvent::Start);
    h.backend.clear_log();

    h.dispatch(UiEvent::Signup {
        name: "Asha99".into(),
        email: "asha@example.com".into(),
        password: "Passw0rd!".into(),
    });

    assert_eq!(
        h.controller.state().forms().signup_error.as_deref(),
        Some(ValidationError::InvalidUsername.to_string().as_str())
    );
    assert!(h.backend.calls().is_empty());

    h.dispatch(UiEvent::Signup {
        name: "Asha".into(),
        email: "asha@example.com".into(),
        password: "password".into(),
    });
    assert_eq!(
        h.controller.state().forms().signup_error.as_deref(),
        Some("Invalid password: Must be at least 8 characters with uppercase, lowercase, number, and special character.")
    );
    assert!(h.backend.calls().is_empty());
}

#[test]
fn signup_success_persists_session_and_loads_home() {
    let mut h = Harness::new();
    h.dispatch(UiEvent::Start);
    h.backend.clear_log();
    h.backend.respond(
        Method::Post,
        "/api/register",
        201,
        json!({ "token": "fresh", "user": { "id": "u1", "name": "Asha", "email": "asha@example.com" } }),
    );

    h.dispatch(UiEvent::Signup {
        name: " Asha ".into(),
        email: "asha@example.com".into(),
        password: "Passw0rd!".into(),
    });

    let state = h.controller.state();
    assert!(state.is_signed_in());
    assert_eq!(state.forms().signup_error, None);
    assert_eq!(h.store.get(TOKEN_KEY).as_deref(), Some("fresh"));
    assert!(h.store.get(USER_KEY).unwrap().contains("asha@example.com"));
    assert_eq!(
        h.backend.calls(),
        vec!["POST /api/register", "GET /api/trip/active", "GET /api/contacts"]
    );

    let register = h.backend.last(Method::Post, "/api/register").unwrap();
    assert_eq!(register.bearer, None);
    assert_eq!(
        register.body,
        Some(json!({ "name": "Asha", "email": "asha@example.com", "password": "Passw0rd!" }))
    );
}

#[test]
fn login_shows_server_error_text() {
    let mut h = Harness::new();
    h.backend.respond(
        Method::Post,
        "/api/login",
        401,
        json!({ "error": "Invalid credentials" }),
    );

    h.dispatch(UiEvent::Login {
        email: "asha@example.com".into(),
        password: "wrong".into(),
    });

    let state = h.controller.state();
    assert!(!state.is_signed_in());
    assert_eq!(state.forms().login_error.as_deref(), Some("Invalid credentials"));
    assert_eq!(h.store.get(TOKEN_KEY), None);
}

#[test]
fn login_without_error_body_uses_fallback() {
    let mut h = Harness::new();
    h.backend
        .respond(Method::Post, "/api/login", 500, serde_json::Value::Null);

    h.dispatch(UiEvent::Login {
        email: "asha@example.com".into(),
        password: "whatever".into(),
    });

    assert_eq!(
        h.controller.state().forms().login_error.as_deref(),
        Some("Login failed")
    );
}

#[test]
fn login_while_backend_is_down_explains_connection() {
    let mut h = Harness::new();
    h.backend
        .fail(Method::Post, "/api/login", ClientError::Unreachable);

    h.dispatch(UiEvent::Login {
        email: "asha@example.com".into(),
        password: "whatever".into(),
    });

    let error = h.controller.state().forms().login_error.clone().unwrap();
    assert!(error.starts_with("Cannot connect to backend server"));
}

#[test]
fn switching_tabs_clears_auth_errors() {
    let mut h = Harness::new();
    h.dispatch(UiEvent::Login {
        email: "not-an-email".into(),
        password: "x".into(),
    });
    assert!(h.controller.state().forms().login_error.is_some());

    h.dispatch(UiEvent::SelectAuthTab(AuthTab::Signup));
    let state = h.controller.state();
    assert_eq!(state.auth_tab(), AuthTab::Signup);
    assert_eq!(state.forms().login_error, None);
}

#[test]
fn logout_clears_storage_and_stops_countdown() {
    let mut h = Harness::on_trip();
    assert_eq!(h.ticker.running(), 1);

    h.dispatch(UiEvent::Logout);

    let state = h.controller.state();
    assert!(!state.is_signed_in());
    assert!(state.active_trip().is_none());
    assert!(state.contacts().is_empty());
    assert_eq!(h.ticker.running(), 0);
    assert!(!h.controller.countdown_running());
    assert_eq!(h.store.get(TOKEN_KEY), None);
    assert_eq!(h.store.get(USER_KEY), None);
}

// =============================================================================
// Trips
// =============================================================================

#[test]
fn active_trip_starts_countdown() {
    let h = Harness::on_trip();

    let trip = h.controller.state().active_trip().unwrap();
    assert_eq!(trip.id, "trip-1");
    assert_eq!(trip.destination, "Home");
    assert_eq!(h.ticker.running(), 1);
    assert!(h.controller.countdown_running());
}

#[test]
fn starting_a_trip_replaces_running_countdown() {
    let mut h = Harness::on_trip();
    h.backend.respond(
        Method::Post,
        "/api/trip",
        201,
        json!({ "trip": trip_json("trip-2", "Office", "2026-10-16T13:00:00") }),
    );
    let epoch = h.controller.state().forms().trip_epoch;

    h.dispatch(UiEvent::StartTrip {
        destination: "Office".into(),
        interval_minutes: "30".into(),
    });

    let state = h.controller.state();
    assert_eq!(state.active_trip().unwrap().id, "trip-2");
    assert_eq!(state.forms().trip_epoch, epoch + 1);
    assert_eq!(h.ticker.started(), 2);
    assert_eq!(h.ticker.running(), 1);

    let request = h.backend.last(Method::Post, "/api/trip").unwrap();
    assert_eq!(
        request.body,
        Some(json!({ "destination": "Office", "interval_minutes": 30 }))
    );
    assert_eq!(request.bearer.as_deref(), Some(TOKEN));
}

#[test]
fn invalid_trip_form_makes_no_request() {
    let mut h = Harness::signed_in();
    h.backend.clear_log();

    h.dispatch(UiEvent::StartTrip {
        destination: "Office".into(),
        interval_minutes: "0".into(),
    });

    assert_eq!(
        h.controller.state().forms().trip_error.as_deref(),
        Some(ValidationError::InvalidInterval.to_string().as_str())
    );
    assert!(h.backend.calls().is_empty());
    assert_eq!(h.ticker.started(), 0);
}

#[test]
fn failed_trip_start_shows_server_message() {
    let mut h = Harness::signed_in();
    h.backend.respond(
        Method::Post,
        "/api/trip",
        400,
        json!({ "error": "You already have an active trip" }),
    );

    h.dispatch(UiEvent::StartTrip {
        destination: "Office".into(),
        interval_minutes: "15".into(),
    });

    let state = h.controller.state();
    assert_eq!(
        state.forms().trip_error.as_deref(),
        Some("You already have an active trip")
    );
    assert!(state.active_trip().is_none());
    assert_eq!(h.ticker.running(), 0);
}

#[test]
fn refresh_without_trip_stops_countdown() {
    let mut h = Harness::on_trip();
    h.backend
        .respond(Method::Get, "/api/trip/active", 200, json!({ "trip": null }));

    h.dispatch(UiEvent::RefreshTrip);

    assert!(h.controller.state().active_trip().is_none());
    assert_eq!(h.ticker.running(), 0);
}

// =============================================================================
// Check-in
// =============================================================================

#[test]
fn check_in_sends_position_and_moves_deadline() {
    let mut h = Harness::on_trip();
    h.backend.respond(
        Method::Post,
        "/api/checkin",
        200,
        json!({ "message": "Check-in recorded", "next_check_due": "2026-10-16T12:30:00" }),
    );

    h.dispatch(UiEvent::CheckIn);

    let state = h.controller.state();
    let notice = state.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, CHECKIN_SUCCESS);
    assert_eq!(
        state.active_trip().unwrap().next_check_due.to_rfc3339(),
        "2026-10-16T12:30:00+00:00"
    );

    let request = h.backend.last(Method::Post, "/api/checkin").unwrap();
    assert_eq!(
        request.body,
        Some(json!({ "trip_id": "trip-1", "lat": 12.9716, "lng": 77.5946 }))
    );
}

#[test]
fn check_in_permission_denied_makes_no_request() {
    let mut h = Harness::on_trip();
    h.geo.set(Err(ClientError::PermissionDenied));
    h.backend.clear_log();

    h.dispatch(UiEvent::CheckIn);

    let notice = h.controller.state().notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, CHECKIN_PERMISSION_DENIED);
    assert!(h.backend.calls().is_empty());
}

#[test]
fn check_in_server_error_is_prefixed() {
    let mut h = Harness::on_trip();
    h.backend.respond(
        Method::Post,
        "/api/checkin",
        404,
        json!({ "error": "Trip not found" }),
    );

    h.dispatch(UiEvent::CheckIn);

    assert_eq!(
        h.controller.state().notice().unwrap().message,
        "Error: Trip not found"
    );

    h.dispatch(UiEvent::DismissNotice);
    assert!(h.controller.state().notice().is_none());
}

#[test]
fn check_in_without_trip_does_nothing() {
    let mut h = Harness::signed_in();
    h.backend.clear_log();

    h.dispatch(UiEvent::CheckIn);

    assert_eq!(h.geo.requests(), 0);
    assert!(h.backend.calls().is_empty());
    assert!(h.controller.state().notice().is_none());
}

// =============================================================================
// SOS
// =============================================================================

#[test]
fn declined_sos_sends_nothing() {
    let mut h = Harness::signed_in();
    h.prompt.answer(false);
    h.backend.clear_log();

    h.dispatch(UiEvent::TriggerSos);

    assert_eq!(h.prompt.asked(), vec![SOS_CONFIRMATION.to_string()]);
    assert_eq!(h.geo.requests(), 0);
    assert!(h.backend.calls().is_empty());
    assert!(h.controller.state().sos_report().is_none());
}

#[test]
fn sos_report_lists_each_delivery() {
    let mut h = Harness::signed_in();
    h.backend.respond(
        Method::Post,
        "/api/sos",
        200,
        json!({
            "message": "SOS alert processed",
            "contact_count": 2,
            "google_maps_link": "https://www.google.com/maps?q=12.9716,77.5946",
            "whatsapp_enabled": true,
            "whatsapp_results": [
                { "name": "Ravi", "phone": "+919876543210", "status": "sent" },
                { "name": "Meena", "phone": "+919812345678", "status": "failed", "error": "invalid number" }
            ],
            "sms_enabled": false,
            "sms_warning": "SMS service not configured"
        }),
    );

    h.dispatch(UiEvent::TriggerSos);

    let request = h.backend.last(Method::Post, "/api/sos").unwrap();
    assert_eq!(
        request.body,
        Some(json!({ "lat": 12.9716, "lng": 77.5946, "reason": SOS_REASON }))
    );

    let report = h.controller.state().sos_report().unwrap();
    assert_eq!(report.channels.len(), 2);
    match &report.channels[0].body {
        ChannelBody::Delivery { sent, failed, lines } => {
            assert_eq!((*sent, *failed), (1, 1));
            assert_eq!(
                lines[1].text(report.channels[0].channel),
                "❌ Meena (+919812345678) - Failed: invalid number"
            );
        }
        other => panic!("expected deliveries, got {other:?}"),
    }
    assert_eq!(
        report.channels[1].body,
        ChannelBody::NotConfigured("SMS service not configured".into())
    );
    assert_eq!(
        report.map,
        Some(MapLink::Url(
            "https://www.google.com/maps?q=12.9716,77.5946".into()
        ))
    );
    assert!(!report.no_contacts);

    h.dispatch(UiEvent::CloseSosReport);
    assert!(h.controller.state().sos_report().is_none());
}

#[test]
fn sos_with_no_contacts_reports_it() {
    let mut h = Harness::signed_in();
    h.backend.respond(
        Method::Post,
        "/api/sos",
        200,
        json!({ "message": "SOS alert processed", "contact_count": 0 }),
    );

    h.dispatch(UiEvent::TriggerSos);

    let report = h.controller.state().sos_report().unwrap();
    assert!(report.no_contacts);
    assert!(report.channels.is_empty());
}

#[test]
fn sos_location_denied_uses_sos_message() {
    let mut h = Harness::signed_in();
    h.geo.set(Err(ClientError::PermissionDenied));

    h.dispatch(UiEvent::TriggerSos);

    assert_eq!(
        h.controller.state().notice().unwrap().message,
        SOS_PERMISSION_DENIED
    );
    assert!(h.backend.last(Method::Post, "/api/sos").is_none());
}

#[test]
fn sos_location_error_is_reported_raw() {
    let mut h = Harness::signed_in();
    h.geo
        .set(Err(ClientError::Location("Timeout expired".into())));

    h.dispatch(UiEvent::TriggerSos);

    assert_eq!(
        h.controller.state().notice().unwrap().message,
        "Error getting location: Timeout expired"
    );
}

#[test]
fn sos_server_failure_uses_fallback() {
    let mut h = Harness::signed_in();
    h.geo.set(Ok(Position {
        latitude: 0.0,
        longitude: 0.0,
    }));
    h.backend
        .respond(Method::Post, "/api/sos", 500, serde_json::Value::Null);

    h.dispatch(UiEvent::TriggerSos);

    assert_eq!(
        h.controller.state().notice().unwrap().message,
        "Error: Failed to send SOS alert"
    );
}

// =============================================================================
// Contacts
// =============================================================================

#[test]
fn empty_contact_list_is_loaded_not_failed() {
    let h = Harness::signed_in();

    let state = h.controller.state();
    assert!(state.contacts_loaded());
    assert!(state.contacts().is_empty());
}

#[test]
fn adding_contact_prefixes_country_code_and_reloads() {
    let mut h = Harness::signed_in();
    h.backend.respond(
        Method::Post,
        "/api/contacts",
        201,
        json!({ "message": "Contact added" }),
    );
    h.backend.respond(
        Method::Get,
        "/api/contacts",
        200,
        json!({ "contacts": [
            { "_id": "c1", "name": "Ravi", "phone": "+919876543210", "email": "" }
        ] }),
    );
    h.backend.clear_log();

    h.dispatch(UiEvent::AddContact {
        name: "Ravi".into(),
        phone: "9876543210".into(),
        email: "".into(),
    });

    assert_eq!(h.backend.calls(), vec!["POST /api/contacts", "GET /api/contacts"]);
    assert_eq!(
        h.backend.last(Method::Post, "/api/contacts").unwrap().body,
        Some(json!({ "name": "Ravi", "phone": "+919876543210", "email": "" }))
    );

    let state = h.controller.state();
    assert_eq!(state.forms().contact_epoch, 1);
    assert_eq!(state.contacts().len(), 1);
    assert_eq!(state.contacts()[0].display_email(), None);
}

#[test]
fn invalid_contact_phone_makes_no_request() {
    let mut h = Harness::signed_in();
    h.backend.clear_log();

    h.dispatch(UiEvent::AddContact {
        name: "Ravi".into(),
        phone: "98765".into(),
        email: "".into(),
    });

    assert_eq!(
        h.controller.state().forms().contact_error.as_deref(),
        Some("Invalid phone number: Must be exactly 10 digits.")
    );
    assert!(h.backend.calls().is_empty());
}

#[test]
fn declined_delete_makes_no_request() {
    let mut h = Harness::signed_in();
    h.prompt.answer(false);
    h.backend.clear_log();

    h.dispatch(UiEvent::DeleteContact { id: "c1".into() });

    assert_eq!(h.prompt.asked(), vec![DELETE_CONTACT_CONFIRMATION.to_string()]);
    assert!(h.backend.calls().is_empty());
}

#[test]
fn confirmed_delete_reloads_contacts() {
    let mut h = Harness::signed_in();
    h.backend.respond(
        Method::Delete,
        "/api/contacts/c1",
        200,
        json!({ "message": "Contact deleted" }),
    );
    h.backend.clear_log();

    h.dispatch(UiEvent::DeleteContact { id: "c1".into() });

    assert_eq!(
        h.backend.calls(),
        vec!["DELETE /api/contacts/c1", "GET /api/contacts"]
    );
    assert!(h.controller.state().notice().is_none());
}

#[test]
fn failed_delete_raises_notice() {
    let mut h = Harness::signed_in();
    h.backend.respond(
        Method::Delete,
        "/api/contacts/c1",
        404,
        json!({ "error": "Contact not found" }),
    );

    h.dispatch(UiEvent::DeleteContact { id: "c1".into() });

    let notice = h.controller.state().notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "Error: Contact not found");
}

// =============================================================================
// Missed check-ins
// =============================================================================

#[test]
fn scan_publishes_scanning_then_result() {
    let mut h = Harness::signed_in();
    h.backend.respond(
        Method::Get,
        "/api/scan_missed_checks",
        200,
        json!({ "missed_trips": [] }),
    );
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    h.controller
        .set_observer(move |state| sink.borrow_mut().push(state.missed().clone()));

    h.dispatch(UiEvent::ScanMissedChecks);

    assert_eq!(*seen.borrow(), vec![MissedScan::Scanning, MissedScan::Clear]);
}

#[test]
fn scan_lists_overdue_trips() {
    let mut h = Harness::signed_in();
    h.backend.respond(
        Method::Get,
        "/api/scan_missed_checks",
        200,
        json!({ "missed_trips": [{
            "_id": "t9",
            "destination": "Airport",
            "overdue_minutes": 42.26,
            "next_check_due": "2026-10-16T11:00:00"
        }] }),
    );

    h.dispatch(UiEvent::ScanMissedChecks);

    match h.controller.state().missed() {
        MissedScan::Found(trips) => {
            assert_eq!(trips.len(), 1);
            assert_eq!(trips[0].destination, "Airport");
            assert_eq!(trips[0].overdue_display(), "42.3");
        }
        other => panic!("expected found trips, got {other:?}"),
    }
}

#[test]
fn scan_failure_is_reported() {
    let mut h = Harness::signed_in();
    h.backend.fail(
        Method::Get,
        "/api/scan_missed_checks",
        ClientError::Network("connection reset".into()),
    );

    h.dispatch(UiEvent::ScanMissedChecks);

    assert_eq!(h.controller.state().missed(), &MissedScan::Failed);
}
