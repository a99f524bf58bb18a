use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::kernel::BlogDeps;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store: StoreHealth,
}

#[derive(Serialize)]
pub struct StoreHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Pings the post store. Returns 200 OK when it answers within five seconds,
/// 503 Service Unavailable otherwise.
pub async fn health_handler(Extension(deps): Extension<BlogDeps>) -> (StatusCode, Json<HealthResponse>) {
    let store_health = match tokio::time::timeout(std::time::Duration::from_secs(5), deps.store.ping()).await {
        Ok(Ok(())) => StoreHealth {
            status: "ok".to_string(),
            error: None,
        },
        Ok(Err(e)) => StoreHealth {
            status: "error".to_string(),
            error: Some(format!("Ping failed: {}", e)),
        },
        Err(_) => StoreHealth {
            status: "error".to_string(),
            error: Some("Ping timeout (>5s)".to_string()),
        },
    };

    let is_healthy = store_health.status == "ok";
    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
            store: store_health,
        }),
    )
}
