//! In-process HTTP client that drives the full router with `oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use blog_core::config::{PostOptions, TokenConfig};
use blog_core::kernel::{BlogDeps, InMemoryPostStore, Record};
use blog_core::server::build_app;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret_key";
pub const TEST_AUDIENCE: &str = "test_audience";
pub const TEST_ISSUER: &str = "test_issuer";

pub fn test_token_config() -> TokenConfig {
    TokenConfig::new(TEST_SECRET, TEST_AUDIENCE, TEST_ISSUER)
}

/// Router over an in-memory store, plus a handle on that store
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryPostStore>,
}

impl TestApp {
    pub fn new(records: Vec<Record>) -> Self {
        Self::with_options(records, test_token_config(), PostOptions::default())
    }

    pub fn with_options(records: Vec<Record>, token_config: TokenConfig, options: PostOptions) -> Self {
        let store = Arc::new(InMemoryPostStore::with_records(records));
        let deps = BlogDeps::in_memory(store.clone(), &token_config).with_post_options(options);
        Self {
            router: build_app(deps, &[]),
            store,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, None, None).await
    }

    /// Obtain a bearer header value through `POST /token`
    pub async fn bearer(&self) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/token",
                Some(serde_json::json!({ "secretKey": TEST_SECRET })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "token issuance failed: {}", body);
        format!("Bearer {}", body["token"].as_str().unwrap())
    }
}
