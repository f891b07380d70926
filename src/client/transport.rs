//! The seam between the API client and whatever actually moves bytes.
//!
//! In the browser this is `fetch` (see `app::api`); tests substitute an
//! in-memory fake.

use async_trait::async_trait;
use serde_json::Value;

use super::error::ClientError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Full request path including the API base, e.g. `/api/contacts`
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body; `None` when the body was empty or not JSON
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field of a JSON error body
    pub fn error_message(&self) -> Option<String> {
        self.body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Sends one request. Transport-level failures (nothing came back) are
/// reported as `ClientError::Unreachable` or `ClientError::Network`; any
/// HTTP status, including errors, is a successful send.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}
