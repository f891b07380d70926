//! Typed failures produced by validation, the HTTP transport and geolocation.

use thiserror::Error;

/// Coarse classification used to decide how a failure is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Permission,
    Location,
    Server,
}

/// A form rule that was violated before any request was made.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid username: Only letters and spaces allowed.")]
    InvalidUsername,
    #[error("Invalid name: Only letters and spaces allowed.")]
    InvalidContactName,
    #[error("Invalid email: Please enter a valid email address.")]
    InvalidEmail,
    #[error("Invalid password: Must be at least 8 characters with uppercase, lowercase, number, and special character.")]
    WeakPassword,
    #[error("Please enter your password.")]
    MissingPassword,
    #[error("Invalid phone number: Must be exactly 10 digits.")]
    InvalidPhone,
    #[error("Please enter a destination.")]
    MissingDestination,
    #[error("Check-in interval must be a whole number of minutes greater than zero.")]
    InvalidInterval,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request never reached the backend (browser "Failed to fetch").
    #[error("Cannot connect to backend server. Please ensure the backend is running and reachable, and that this page is served over http(s), not file://.")]
    Unreachable,

    #[error("Network error: {0}. Please check if the backend is running.")]
    Network(String),

    /// Non-2xx response; `message` is the body's `error` field when present.
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("Location permission denied. Please enable location access.")]
    PermissionDenied,

    #[error("Error getting location: {0}")]
    Location(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::Unreachable | ClientError::Network(_) => ErrorKind::Network,
            ClientError::Server { .. } | ClientError::Decode(_) => ErrorKind::Server,
            ClientError::PermissionDenied => ErrorKind::Permission,
            ClientError::Location(_) => ErrorKind::Location,
        }
    }

    /// Message for an inline form error: the server's `error` text when it
    /// sent one, `fallback` for other server failures, otherwise the
    /// failure's own description.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Server { message: None, .. } | ClientError::Decode(_) => {
                fallback.to_string()
            }
            other => other.to_string(),
        }
    }

    /// Message for a notice raised by a button action. Server failures are
    /// prefixed with "Error: ".
    pub fn action_message(&self, fallback: &str) -> String {
        match self.kind() {
            ErrorKind::Server => format!("Error: {}", self.user_message(fallback)),
            _ => self.to_string(),
        }
    }

    /// Like [`action_message`](Self::action_message) for actions that need a
    /// location fix; a denied permission uses `permission_message`.
    pub fn notice_message(&self, fallback: &str, permission_message: &str) -> String {
        match self.kind() {
            ErrorKind::Permission => permission_message.to_string(),
            _ => self.action_message(fallback),
        }
    }
}
