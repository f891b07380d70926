//! Browser implementations of the controller's service traits.
//!
//! Each binding has an SSR fallback so the component tree still renders on
//! the server; nothing is dispatched there.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dioxus::dioxus_core::{spawn_forever, Task};
use dioxus::prelude::*;

use crate::client::controller::Services;
use crate::client::error::ClientError;
use crate::client::services::{Geolocator, Position, Prompt, Ticker, TickerHandle};
#[cfg(not(target_arch = "wasm32"))]
use crate::client::storage::MemoryStore;
#[cfg(target_arch = "wasm32")]
use crate::client::storage::KeyValueStore;

use super::api::FetchTransport;

/// Wire up the browser services. `now` is the clock signal the ticker drives.
pub fn services(now: Signal<DateTime<Utc>>) -> Services {
    #[cfg(target_arch = "wasm32")]
    let storage = Box::new(LocalStorage);
    #[cfg(not(target_arch = "wasm32"))]
    let storage = Box::new(MemoryStore::new());

    Services {
        transport: Box::new(FetchTransport),
        storage,
        geolocator: Box::new(BrowserGeolocator),
        prompt: Box::new(BrowserPrompt),
        ticker: Box::new(SignalTicker::new(now)),
    }
}

// =============================================================================
// Storage
// =============================================================================

/// `window.localStorage`
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!("localStorage write failed for {}", key);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(key).is_err() {
                tracing::warn!("localStorage remove failed for {}", key);
            }
        }
    }
}

// =============================================================================
// Geolocation
// =============================================================================

/// `navigator.geolocation.getCurrentPosition`, high accuracy.
pub struct BrowserGeolocator;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Geolocator for BrowserGeolocator {
    async fn current_position(&self) -> Result<Position, ClientError> {
        use crate::client::settings::{GEO_MAXIMUM_AGE_MS, GEO_TIMEOUT_MS};
        use futures::channel::oneshot;
        use js_sys::Reflect;
        use std::cell::RefCell;
        use std::rc::Rc;
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;

        fn number(target: &JsValue, key: &str) -> Option<f64> {
            Reflect::get(target, &JsValue::from_str(key)).ok()?.as_f64()
        }

        let geolocation = web_sys::window()
            .and_then(|w| w.navigator().geolocation().ok())
            .ok_or_else(|| {
                ClientError::Location("Geolocation is not supported by this browser.".into())
            })?;

        let (tx, rx) = oneshot::channel::<Result<Position, ClientError>>();
        let tx = Rc::new(RefCell::new(Some(tx)));

        let on_success = {
            let tx = tx.clone();
            Closure::once(move |position: JsValue| {
                let result = Reflect::get(&position, &JsValue::from_str("coords"))
                    .ok()
                    .and_then(|coords| {
                        Some(Position {
                            latitude: number(&coords, "latitude")?,
                            longitude: number(&coords, "longitude")?,
                        })
                    })
                    .ok_or_else(|| ClientError::Location("Position unavailable".into()));
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(result);
                }
            })
        };

        let on_error = {
            let tx = tx.clone();
            Closure::once(move |error: JsValue| {
                // GeolocationPositionError.PERMISSION_DENIED
                let result = if number(&error, "code") == Some(1.0) {
                    Err(ClientError::PermissionDenied)
                } else {
                    let message = Reflect::get(&error, &JsValue::from_str("message"))
                        .ok()
                        .and_then(|m| m.as_string())
                        .unwrap_or_else(|| "Unknown error".into());
                    Err(ClientError::Location(message))
                };
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(result);
                }
            })
        };

        let options = web_sys::PositionOptions::new();
        options.set_enable_high_accuracy(true);
        options.set_timeout(GEO_TIMEOUT_MS);
        options.set_maximum_age(GEO_MAXIMUM_AGE_MS);

        geolocation
            .get_current_position_with_error_callback_and_options(
                on_success.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &options,
            )
            .map_err(|e| ClientError::Location(format!("{:?}", e)))?;

        // Both closures must outlive the callback
        let result = rx
            .await
            .unwrap_or_else(|_| Err(ClientError::Location("Geolocation request dropped".into())));
        drop(on_success);
        drop(on_error);
        result
    }
}

/// SSR stub
#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Geolocator for BrowserGeolocator {
    async fn current_position(&self) -> Result<Position, ClientError> {
        Err(ClientError::Location(
            "Geolocation is only available in browser".into(),
        ))
    }
}

// =============================================================================
// Confirmation
// =============================================================================

/// `window.confirm`
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
    #[cfg(target_arch = "wasm32")]
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn confirm(&self, _message: &str) -> bool {
        false
    }
}

// =============================================================================
// Countdown ticker
// =============================================================================

/// Advances the `now` signal once per tick; the countdown display derives
/// from it. Never touches the controller.
///
/// The tick task is spawned at the root scope so it keeps running after the
/// component that started the trip unmounts.
pub struct SignalTicker {
    now: Signal<DateTime<Utc>>,
}

impl SignalTicker {
    pub fn new(now: Signal<DateTime<Utc>>) -> Self {
        Self { now }
    }
}

pub struct SignalTickerHandle {
    task: Option<Task>,
}

impl Ticker for SignalTicker {
    fn start(&self) -> Box<dyn TickerHandle> {
        let mut now = self.now;
        now.set(Utc::now());

        #[cfg(any(target_arch = "wasm32", feature = "server"))]
        let task = Some(spawn_forever(async move {
            loop {
                tick_sleep().await;
                now.set(Utc::now());
            }
        }));
        #[cfg(not(any(target_arch = "wasm32", feature = "server")))]
        let task = None;

        Box::new(SignalTickerHandle { task })
    }
}

#[cfg(target_arch = "wasm32")]
async fn tick_sleep() {
    use crate::client::settings::TICK_INTERVAL_MS;
    gloo_timers::future::sleep(std::time::Duration::from_millis(TICK_INTERVAL_MS)).await;
}

#[cfg(all(not(target_arch = "wasm32"), feature = "server"))]
async fn tick_sleep() {
    use crate::client::settings::TICK_INTERVAL_MS;
    tokio::time::sleep(std::time::Duration::from_millis(TICK_INTERVAL_MS)).await;
}

impl TickerHandle for SignalTickerHandle {
    fn cancel(self: Box<Self>) {
        if let Some(task) = self.task {
            task.cancel();
        }
    }
}
