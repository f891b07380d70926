//! In-memory stand-ins for the browser services, shared by the controller
//! integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use echocheck::client::models::User;
use echocheck::client::services::{Geolocator, Position, Prompt, Ticker, TickerHandle};
use echocheck::client::settings::{TOKEN_KEY, USER_KEY};
use echocheck::client::storage::{KeyValueStore, MemoryStore};
use echocheck::client::transport::{ApiRequest, ApiResponse, Method, Transport};
use echocheck::client::{ClientError, Controller, Services, UiEvent};
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";

// =============================================================================
// Backend
// =============================================================================

/// Canned responses keyed by `"METHOD /api/path"`. Unknown routes answer
/// 404. Clones share the same routes and request log.
#[derive(Clone, Default)]
pub struct FakeBackend {
    routes: Rc<RefCell<HashMap<String, Result<ApiResponse, ClientError>>>>,
    log: Rc<RefCell<Vec<ApiRequest>>>,
}

impl FakeBackend {
    pub fn respond(&self, method: Method, url: &str, status: u16, body: Value) {
        let body = if body.is_null() { None } else { Some(body) };
        self.routes.borrow_mut().insert(
            route_key(method, url),
            Ok(ApiResponse { status, body }),
        );
    }

    pub fn fail(&self, method: Method, url: &str, error: ClientError) {
        self.routes
            .borrow_mut()
            .insert(route_key(method, url), Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.borrow().clone()
    }

    /// `"METHOD url"` for every request so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .map(|r| route_key(r.method, &r.url))
            .collect()
    }

    pub fn last(&self, method: Method, url: &str) -> Option<ApiRequest> {
        self.log
            .borrow()
            .iter()
            .rev()
            .find(|r| r.method == method && r.url == url)
            .cloned()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

fn route_key(method: Method, url: &str) -> String {
    format!("{} {}", method.as_str(), url)
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let key = route_key(request.method, &request.url);
        self.log.borrow_mut().push(request);
        self.routes
            .borrow()
            .get(&key)
            .cloned()
            .unwrap_or(Ok(ApiResponse {
                status: 404,
                body: Some(json!({ "error": "Not found" })),
            }))
    }
}

// =============================================================================
// Browser services
// =============================================================================

#[derive(Clone)]
pub struct FakeGeolocator {
    fix: Rc<RefCell<Result<Position, ClientError>>>,
    requests: Rc<Cell<usize>>,
}

impl Default for FakeGeolocator {
    fn default() -> Self {
        Self {
            fix: Rc::new(RefCell::new(Ok(Position {
                latitude: 12.9716,
                longitude: 77.5946,
            }))),
            requests: Rc::default(),
        }
    }
}

impl FakeGeolocator {
    pub fn set(&self, fix: Result<Position, ClientError>) {
        *self.fix.borrow_mut() = fix;
    }

    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

#[async_trait(?Send)]
impl Geolocator for FakeGeolocator {
    async fn current_position(&self) -> Result<Position, ClientError> {
        self.requests.set(self.requests.get() + 1);
        self.fix.borrow().clone()
    }
}

#[derive(Clone)]
pub struct FakePrompt {
    answer: Rc<Cell<bool>>,
    asked: Rc<RefCell<Vec<String>>>,
}

impl Default for FakePrompt {
    fn default() -> Self {
        Self {
            answer: Rc::new(Cell::new(true)),
            asked: Rc::default(),
        }
    }
}

impl FakePrompt {
    pub fn answer(&self, yes: bool) {
        self.answer.set(yes);
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompt for FakePrompt {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answer.get()
    }
}

/// Counts started and still-running tickers.
#[derive(Clone, Default)]
pub struct CountingTicker {
    started: Rc<Cell<usize>>,
    running: Rc<Cell<usize>>,
}

impl CountingTicker {
    pub fn started(&self) -> usize {
        self.started.get()
    }

    pub fn running(&self) -> usize {
        self.running.get()
    }
}

struct CountingHandle {
    running: Rc<Cell<usize>>,
}

impl Ticker for CountingTicker {
    fn start(&self) -> Box<dyn TickerHandle> {
        self.started.set(self.started.get() + 1);
        self.running.set(self.running.get() + 1);
        Box::new(CountingHandle {
            running: self.running.clone(),
        })
    }
}

impl TickerHandle for CountingHandle {
    fn cancel(self: Box<Self>) {
        self.running.set(self.running.get().saturating_sub(1));
    }
}

// =============================================================================
// Harness
// =============================================================================

pub struct Harness {
    pub controller: Controller,
    pub backend: FakeBackend,
    pub store: MemoryStore,
    pub geo: FakeGeolocator,
    pub prompt: FakePrompt,
    pub ticker: CountingTicker,
}

impl Harness {
    /// Fresh browser: nothing stored, healthy backend with no trip and no
    /// contacts.
    pub fn new() -> Self {
        let backend = FakeBackend::default();
        let store = MemoryStore::new();
        let geo = FakeGeolocator::default();
        let prompt = FakePrompt::default();
        let ticker = CountingTicker::default();

        backend.respond(Method::Get, "/api/health", 200, json!({ "status": "ok" }));
        backend.respond(Method::Get, "/api/trip/active", 200, json!({ "trip": null }));
        backend.respond(Method::Get, "/api/contacts", 200, json!({ "contacts": [] }));

        let controller = Controller::new(Services {
            transport: Box::new(backend.clone()),
            storage: Box::new(store.clone()),
            geolocator: Box::new(geo.clone()),
            prompt: Box::new(prompt.clone()),
            ticker: Box::new(ticker.clone()),
        });

        Self {
            controller,
            backend,
            store,
            geo,
            prompt,
            ticker,
        }
    }

    /// A browser with a cached session, already started.
    pub fn signed_in() -> Self {
        let mut harness = Self::new();
        harness.cache_session();
        harness.dispatch(UiEvent::Start);
        harness
    }

    /// Signed in with an active trip loaded and its countdown running.
    pub fn on_trip() -> Self {
        let mut harness = Self::new();
        harness.backend.respond(
            Method::Get,
            "/api/trip/active",
            200,
            json!({ "trip": trip_json("trip-1", "Home", "2026-10-16T12:15:00") }),
        );
        harness.cache_session();
        harness.dispatch(UiEvent::Start);
        harness
    }

    pub fn cache_session(&self) {
        self.store.set(TOKEN_KEY, TOKEN);
        self.store.set(
            USER_KEY,
            &serde_json::to_string(&user()).unwrap_or_default(),
        );
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        tokio_test::block_on(self.controller.dispatch(event));
    }
}

pub fn trip_json(id: &str, destination: &str, due: &str) -> Value {
    json!({
        "_id": id,
        "user_id": "u1",
        "destination": destination,
        "interval_minutes": 15,
        "started_at": "2026-10-16T12:00:00",
        "next_check_due": due,
        "status": "active"
    })
}

pub fn user() -> User {
    User {
        id: "u1".into(),
        name: "Asha".into(),
        email: "asha@example.com".into(),
    }
}
