use axum::extract::{Extension, Path};
use axum::Json;

use crate::common::Result;
use crate::domains::posts::{self, Card};
use crate::domains::tag::{self, Tags};
use crate::kernel::BlogDeps;

/// GET /tags
pub async fn list_tags_handler(Extension(deps): Extension<BlogDeps>) -> Result<Json<Tags>> {
    tag::aggregate_tags(&deps).await.map(Json)
}

/// GET /tags/:tag
pub async fn posts_by_tag_handler(
    Extension(deps): Extension<BlogDeps>,
    Path(tag): Path<String>,
) -> Result<Json<Vec<Card>>> {
    posts::list_by_tag(&deps, &tag).await.map(Json)
}
