use tracing::debug;

use crate::common::Result;
use crate::domains::posts::actions::queries::{published_filter, scan_posts};
use crate::domains::posts::Post;
use crate::domains::tag::Tags;
use crate::kernel::BlogDeps;

/// Count tag occurrences across every published post.
pub async fn aggregate_tags(deps: &BlogDeps) -> Result<Tags> {
    let posts = scan_posts(deps, &published_filter(), "aggregating tags").await?;
    let tags = count_tags(&posts);

    debug!(posts = posts.len(), distinct_tags = tags.len(), "Aggregated tags");
    Ok(tags)
}

/// Case-insensitive frequency count. Empty tags are skipped.
pub fn count_tags(posts: &[Post]) -> Tags {
    let mut counts = Tags::new();
    for tag in posts.iter().flat_map(|post| &post.card.tags) {
        if tag.is_empty() {
            continue;
        }
        *counts.entry(tag.to_lowercase()).or_insert(0) += 1;
    }
    counts
}
