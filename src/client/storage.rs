//! Session persistence over a string key/value store (localStorage in the
//! browser, a map in tests).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::models::{Session, User};
use super::settings::{TOKEN_KEY, USER_KEY};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Reads and writes the cached session under `authToken` / `user`.
pub struct SessionStore {
    store: Box<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// A session is restored only when both keys are present and the user
    /// record parses. The token is not verified with the backend.
    pub fn restore(&self) -> Option<Session> {
        let token = self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let raw_user = self.store.get(USER_KEY)?;
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(Session { token, user }),
            Err(e) => {
                tracing::warn!("Ignoring unreadable cached user: {}", e);
                None
            }
        }
    }

    pub fn save(&self, session: &Session) {
        match serde_json::to_string(&session.user) {
            Ok(user) => {
                self.store.set(TOKEN_KEY, &session.token);
                self.store.set(USER_KEY, &user);
            }
            Err(e) => tracing::error!("Failed to encode session user: {}", e),
        }
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }
}
