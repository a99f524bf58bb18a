//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::BlogDeps;
use crate::server::middleware::require_bearer_token;
use crate::server::routes::{
    create_post_handler, get_post_handler, health_handler, issue_token_handler,
    list_drafts_handler, list_posts_handler, list_tags_handler, posts_by_tag_handler,
    update_post_handler,
};

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
///
/// Reads are public. Creating and updating posts and listing drafts require a
/// bearer token issued by `POST /token`.
pub fn build_app(deps: BlogDeps, allowed_origins: &[String]) -> Router {
    // Clone token service for middleware closure
    let tokens = deps.tokens.clone();

    let gated = Router::new()
        .route("/posts", post(create_post_handler))
        .route("/posts/:id", put(update_post_handler))
        .route("/drafts", get(list_drafts_handler))
        .route_layer(middleware::from_fn(move |req, next| {
            require_bearer_token(tokens.clone(), req, next)
        }));

    Router::new()
        .route("/posts", get(list_posts_handler))
        .route("/posts/:id", get(get_post_handler))
        .route("/tags", get(list_tags_handler))
        .route("/tags/:tag", get(posts_by_tag_handler))
        .route("/token", post(issue_token_handler))
        .route("/health", get(health_handler))
        .merge(gated)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(deps))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
