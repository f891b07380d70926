//! `/api/*` forwarding for the dev server.
//!
//! The web client calls a same-origin `/api` base. When this binary serves
//! the client, every request under it is passed to the configured safety
//! backend and the backend's status and body are returned unchanged.

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use url::Url;

use crate::config::Config;

/// Headers copied from the browser request to the backend.
const FORWARDED_HEADERS: [header::HeaderName; 2] = [header::AUTHORIZATION, header::CONTENT_TYPE];

/// Shared forwarding state
#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    backend: Arc<Url>,
}

impl ProxyState {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            backend: Arc::new(config.backend_base()?),
        })
    }

    pub fn backend(&self) -> &Url {
        &self.backend
    }

    /// Backend URL for the part of the path after `/api/`.
    pub fn target_url(&self, path: &str, query: Option<&str>) -> Result<Url> {
        let mut url = self.backend.join(path.trim_start_matches('/'))?;
        url.set_query(query);
        Ok(url)
    }
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/{*path}", any(forward_handler))
        .with_state(state)
}

/// Forward one request to the backend.
pub async fn forward_handler(
    State(state): State<ProxyState>,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let target = match state.target_url(&path, uri.query()) {
        Ok(url) => url,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, format!("Invalid API path: {}", e));
        }
    };

    let mut request = state.client.request(method.clone(), target.clone());
    for name in FORWARDED_HEADERS.iter() {
        if let Some(value) = headers.get(name) {
            request = request.header(name.clone(), value.clone());
        }
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!("Backend request {} {} failed: {}", method, target, e);
            return error_response(
                StatusCode::BAD_GATEWAY,
                format!("Backend unreachable at {}", state.backend()),
            );
        }
    };

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to read backend response for {}: {}", target, e);
            return error_response(StatusCode::BAD_GATEWAY, format!("Backend response error: {}", e));
        }
    };

    tracing::debug!("{} {} -> {}", method, target, status);

    let mut response = (status, bytes).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        content_type.unwrap_or_else(|| HeaderValue::from_static("application/json")),
    );
    response
}
