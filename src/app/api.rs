//! Browser `fetch` transport for the API client.
//!
//! Bodies are read as text and parsed with serde_json so that empty or
//! non-JSON error bodies still yield a status instead of a decode failure.

use async_trait::async_trait;

use crate::client::error::ClientError;
use crate::client::transport::{ApiRequest, ApiResponse, Transport};

/// Sends requests with `window.fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

/// Rejection messages browsers use when the request never got a response.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const UNREACHABLE_MARKERS: [&str; 3] = ["Failed to fetch", "NetworkError", "Load failed"];

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn classify_rejection(message: &str) -> ClientError {
    if UNREACHABLE_MARKERS.iter().any(|m| message.contains(m)) {
        ClientError::Unreachable
    } else {
        ClientError::Network(message.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        use wasm_bindgen::{JsCast, JsValue};
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Headers, Request, RequestInit, Response};

        fn js_message(value: &JsValue) -> String {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
                .or_else(|| value.as_string())
                .unwrap_or_else(|| format!("{:?}", value))
        }

        let window = web_sys::window().ok_or_else(|| ClientError::Network("No window".into()))?;

        let headers = Headers::new().map_err(|e| ClientError::Network(js_message(&e)))?;
        if let Some(token) = &request.bearer {
            headers
                .set("Authorization", &format!("Bearer {}", token))
                .map_err(|e| ClientError::Network(js_message(&e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(request.method.as_str());
        if let Some(body) = &request.body {
            headers
                .set("Content-Type", "application/json")
                .map_err(|e| ClientError::Network(js_message(&e)))?;
            opts.set_body(&JsValue::from_str(&body.to_string()));
        }
        opts.set_headers(&headers);

        let js_request = Request::new_with_str_and_init(&request.url, &opts)
            .map_err(|e| ClientError::Network(js_message(&e)))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(|e| classify_rejection(&js_message(&e)))?;

        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ClientError::Network("Not a Response".into()))?;
        let status = resp.status();

        let text = JsFuture::from(resp.text().map_err(|e| ClientError::Network(js_message(&e)))?)
            .await
            .map_err(|e| classify_rejection(&js_message(&e)))?
            .as_string()
            .unwrap_or_default();

        let body = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };

        Ok(ApiResponse { status, body })
    }
}

/// SSR stub - requests are only made from the browser
#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, ClientError> {
        Err(ClientError::Network(
            "fetch is only available in browser".to_string(),
        ))
    }
}
