use crate::common::BlogError;
use crate::domains::auth::{TokenService, BEARER_PREFIX};
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// Bearer token gate for write routes
///
/// Requests without an `Authorization: Bearer <token>` header, or with a token
/// the service does not accept, are answered with 401 and never reach the
/// wrapped handler.
pub async fn require_bearer_token(
    tokens: Arc<TokenService>,
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if !is_authorized(&request, &tokens) {
        return BlogError::Unauthorized.into_response();
    }

    next.run(request).await
}

/// Check the request's Authorization header against the token service
fn is_authorized(request: &axum::http::Request<axum::body::Body>, tokens: &TokenService) -> bool {
    let Some(auth_str) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    else {
        debug!("No authorization header");
        return false;
    };

    if !auth_str.starts_with(BEARER_PREFIX) {
        debug!("Authorization header is not a bearer token");
        return false;
    }

    tokens.is_valid(auth_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenConfig;

    fn service() -> TokenService {
        TokenService::new(&TokenConfig::new("test_secret", "test_audience", "test_issuer"))
    }

    fn request_with(header: Option<&str>) -> axum::http::Request<axum::body::Body> {
        let mut builder = axum::http::Request::builder();
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        builder.body(axum::body::Body::empty()).unwrap()
    }

    #[test]
    fn test_valid_bearer_token() {
        let tokens = service();
        let token = tokens.issue("test_secret").unwrap();
        assert!(is_authorized(&request_with(Some(&format!("Bearer {}", token))), &tokens));
    }

    #[test]
    fn test_raw_token_is_rejected() {
        let tokens = service();
        let token = tokens.issue("test_secret").unwrap();
        assert!(!is_authorized(&request_with(Some(&token)), &tokens));
    }

    #[test]
    fn test_no_auth_header() {
        assert!(!is_authorized(&request_with(None), &service()));
    }

    #[test]
    fn test_invalid_token() {
        assert!(!is_authorized(&request_with(Some("Bearer invalid_token")), &service()));
    }
}
