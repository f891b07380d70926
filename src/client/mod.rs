//! Platform-independent client core.
//!
//! Everything here compiles for both the browser and the host so the
//! controller flows can be exercised with plain `cargo test`. Browser
//! bindings for the service traits live in `app::browser`.

pub mod backend;
pub mod controller;
pub mod countdown;
pub mod error;
pub mod models;
pub mod services;
pub mod settings;
pub mod sos;
pub mod state;
pub mod storage;
pub mod transport;
pub mod validation;

pub use controller::{Controller, Services, UiEvent};
pub use error::{ClientError, ErrorKind, ValidationError};
pub use state::AppState;
