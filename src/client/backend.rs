//! Typed client for the safety backend's JSON API.
//!
//! Every call goes through [`ApiClient::call`], which turns non-2xx
//! responses into `ClientError::Server` carrying the body's `error` field.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::ClientError;
use super::models::{
    ActiveTripResponse, AuthResponse, CheckInRequest, CheckInResponse, Contact, ContactsResponse,
    LoginRequest, MissedChecksResponse, MissedTrip, NewContact, RegisterRequest, SosRequest,
    StartTripRequest, Trip, TripResponse,
};
use super::settings::API_BASE;
use super::transport::{ApiRequest, Method, Transport};

pub struct ApiClient {
    transport: Box<dyn Transport>,
    base: String,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            base: API_BASE.trim_end_matches('/').to_string(),
        }
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base, path),
            bearer: bearer.map(str::to_string),
            body,
        };
        tracing::debug!(method = method.as_str(), url = %request.url, "api request");

        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response.body.unwrap_or(Value::Null));
        }

        let message = response.error_message();
        tracing::warn!(status = response.status, error = ?message, "api error response");
        Err(ClientError::Server {
            status: response.status,
            message,
        })
    }

    // =========================================================================
    // Health / Auth
    // =========================================================================

    pub async fn health(&self) -> Result<(), ClientError> {
        self.call(Method::Get, "/health", None, None).await.map(|_| ())
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let value = self.call(Method::Post, "/login", None, Some(encode(request)?)).await?;
        decode(value)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let value = self.call(Method::Post, "/register", None, Some(encode(request)?)).await?;
        decode(value)
    }

    // =========================================================================
    // Trips
    // =========================================================================

    pub async fn active_trip(&self, token: &str) -> Result<Option<Trip>, ClientError> {
        let value = self.call(Method::Get, "/trip/active", Some(token), None).await?;
        decode::<ActiveTripResponse>(value).map(|r| r.trip)
    }

    pub async fn start_trip(&self, token: &str, request: &StartTripRequest) -> Result<Trip, ClientError> {
        let value = self.call(Method::Post, "/trip", Some(token), Some(encode(request)?)).await?;
        decode::<TripResponse>(value).map(|r| r.trip)
    }

    pub async fn check_in(&self, token: &str, request: &CheckInRequest) -> Result<CheckInResponse, ClientError> {
        let value = self.call(Method::Post, "/checkin", Some(token), Some(encode(request)?)).await?;
        decode(value)
    }

    /// The SOS report is returned raw: every field is optional and the
    /// report builder reads whatever is present.
    pub async fn send_sos(&self, token: &str, request: &SosRequest) -> Result<Value, ClientError> {
        self.call(Method::Post, "/sos", Some(token), Some(encode(request)?)).await
    }

    // =========================================================================
    // Contacts
    // =========================================================================

    pub async fn contacts(&self, token: &str) -> Result<Vec<Contact>, ClientError> {
        let value = self.call(Method::Get, "/contacts", Some(token), None).await?;
        decode::<ContactsResponse>(value).map(|r| r.contacts)
    }

    pub async fn add_contact(&self, token: &str, contact: &NewContact) -> Result<(), ClientError> {
        self.call(Method::Post, "/contacts", Some(token), Some(encode(contact)?)).await.map(|_| ())
    }

    pub async fn delete_contact(&self, token: &str, id: &str) -> Result<(), ClientError> {
        let path = format!("/contacts/{}", urlencoding::encode(id));
        self.call(Method::Delete, &path, Some(token), None).await.map(|_| ())
    }

    // =========================================================================
    // Missed check-ins
    // =========================================================================

    pub async fn missed_checks(&self, token: &str) -> Result<Vec<MissedTrip>, ClientError> {
        let value = self.call(Method::Get, "/scan_missed_checks", Some(token), None).await?;
        decode::<MissedChecksResponse>(value).map(|r| r.missed_trips)
    }
}

fn encode<T: Serialize>(body: &T) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}
