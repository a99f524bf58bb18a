use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::common::{BlogError, Result};
use crate::kernel::BlogDeps;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub secret_key: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /token
pub async fn issue_token_handler(
    Extension(deps): Extension<BlogDeps>,
    body: std::result::Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>> {
    let Json(request) = body
        .map_err(|rejection| BlogError::Validation(format!("invalid request body: {}", rejection.body_text())))?;

    let token = deps.tokens.issue(&request.secret_key)?;
    Ok(Json(TokenResponse { token }))
}
