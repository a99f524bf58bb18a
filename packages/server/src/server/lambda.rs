//! Serverless event adapter.
//!
//! Turns a function-URL style event into an HTTP request, runs it through the
//! same router the persistent server uses, and folds the response back into an
//! event reply. Multi-valued response headers keep their first value.

use std::collections::HashMap;

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tower::ServiceExt;
use tracing::{debug, error};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionUrlRequest {
    pub raw_path: String,
    pub raw_query_string: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
    pub request_context: RequestContext,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestContext {
    pub http: HttpContext,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpContext {
    pub method: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionUrlResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl FunctionUrlResponse {
    fn error(status: StatusCode, message: &str) -> Self {
        Self {
            status_code: status.as_u16(),
            headers: HashMap::from([("content-type".to_string(), "application/json".to_string())]),
            body: serde_json::json!({ "error": message }).to_string(),
            is_base64_encoded: false,
        }
    }
}

fn build_request(event: FunctionUrlRequest) -> anyhow::Result<Request<Body>> {
    let method = Method::from_bytes(event.request_context.http.method.as_bytes())?;

    let path = if !event.raw_path.is_empty() {
        event.raw_path
    } else if !event.request_context.http.path.is_empty() {
        event.request_context.http.path
    } else {
        "/".to_string()
    };
    let uri = if event.raw_query_string.is_empty() {
        path
    } else {
        format!("{}?{}", path, event.raw_query_string)
    };

    let body = match event.body {
        Some(body) if event.is_base64_encoded => Body::from(BASE64.decode(body)?),
        Some(body) => Body::from(body),
        None => Body::empty(),
    };

    let mut request = Request::builder().method(method).uri(uri).body(body)?;
    for (name, value) in &event.headers {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                request.headers_mut().insert(name, value);
            }
            _ => debug!(header = %name, "Dropping unrepresentable event header"),
        }
    }
    Ok(request)
}

/// Dispatch one event through `router` and collect the reply.
pub async fn handle_event(router: Router, event: FunctionUrlRequest) -> FunctionUrlResponse {
    let request = match build_request(event) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Failed to build request from event");
            return FunctionUrlResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "Error creating request");
        }
    };

    let response = match router.oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    };

    let status_code = response.status().as_u16();
    let mut headers = HashMap::new();
    for (name, value) in response.headers() {
        if let Ok(value) = value.to_str() {
            headers
                .entry(name.as_str().to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    let bytes = match axum::body::to_bytes(response.into_body(), usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "Failed to read response body");
            return FunctionUrlResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "Error reading response");
        }
    };

    let (body, is_base64_encoded) = match String::from_utf8(bytes.to_vec()) {
        Ok(text) => (text, false),
        Err(_) => (BASE64.encode(&bytes), true),
    };

    FunctionUrlResponse {
        status_code,
        headers,
        body,
        is_base64_encoded,
    }
}
