use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::common::{BlogError, Result};
use crate::domains::posts::{self, Card, Post};
use crate::kernel::BlogDeps;

/// Response for create and update
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub id: String,
    pub ok: bool,
}

fn body_or_bad_request(body: std::result::Result<Json<Post>, JsonRejection>) -> Result<Post> {
    body.map(|Json(post)| post)
        .map_err(|rejection| BlogError::Validation(format!("invalid request body: {}", rejection.body_text())))
}

/// GET /posts
pub async fn list_posts_handler(Extension(deps): Extension<BlogDeps>) -> Result<Json<Vec<Card>>> {
    posts::list_published(&deps).await.map(Json)
}

/// GET /posts/:id
pub async fn get_post_handler(
    Extension(deps): Extension<BlogDeps>,
    Path(id): Path<String>,
) -> Result<Json<Post>> {
    posts::get_by_id(&deps, &id).await.map(Json)
}

/// GET /drafts (gated)
pub async fn list_drafts_handler(Extension(deps): Extension<BlogDeps>) -> Result<Json<Vec<Card>>> {
    posts::list_drafts(&deps).await.map(Json)
}

/// POST /posts (gated)
pub async fn create_post_handler(
    Extension(deps): Extension<BlogDeps>,
    body: std::result::Result<Json<Post>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveResponse>)> {
    let mut post = body_or_bad_request(body)?;
    let ok = posts::save_post(&deps, &mut post, true).await?;

    Ok((
        StatusCode::CREATED,
        Json(SaveResponse {
            id: post.card.id,
            ok,
        }),
    ))
}

/// PUT /posts/:id (gated)
pub async fn update_post_handler(
    Extension(deps): Extension<BlogDeps>,
    Path(id): Path<String>,
    body: std::result::Result<Json<Post>, JsonRejection>,
) -> Result<Json<SaveResponse>> {
    if id.trim().is_empty() {
        return Err(BlogError::Validation("post ID is required in URL".to_string()));
    }
    let mut post = body_or_bad_request(body)?;
    post.card.id = id;

    let ok = posts::save_post(&deps, &mut post, false).await?;
    Ok(Json(SaveResponse {
        id: post.card.id,
        ok,
    }))
}
