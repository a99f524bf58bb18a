//! HTTP mapping for domain errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::common::BlogError;

impl BlogError {
    /// Returns the HTTP status code for this error.
    ///
    /// - NotFound: 404
    /// - Validation: 400
    /// - Unauthorized: 401
    /// - Store, Write, Config, Token: 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Store { .. } | Self::Write(_) | Self::Config(_) | Self::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Server-side failures are logged in full but answered generically.
        let message = if status.is_server_error() {
            error!(error = ?self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(BlogError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            BlogError::Validation("bad body".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(BlogError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            BlogError::Config("no secret".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            BlogError::Write("no id".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            BlogError::store("scanning", anyhow::anyhow!("timeout")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_server_errors_do_not_leak_details() {
        let response = BlogError::store("scanning", anyhow::anyhow!("password=hunter2")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("hunter2"));
        assert!(text.contains("Internal server error"));
    }
}
