//! Read paths: published cards, tag listings, drafts and single posts with
//! their neighbors.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::common::{BlogError, Result};
use crate::config::NeighborOrder;
use crate::domains::posts::models::{Card, Post};
use crate::kernel::{BlogDeps, Filter, Record};

pub const DRAFT_ATTRIBUTE: &str = "isDraft";
pub const TAGS_ATTRIBUTE: &str = "tags";

/// Every non-draft post.
pub fn published_filter() -> Filter {
    Filter::eq(DRAFT_ATTRIBUTE, false)
}

/// Non-draft posts carrying `tag` exactly.
pub fn published_with_tag_filter(tag: &str) -> Filter {
    published_filter().and(Filter::contains(TAGS_ATTRIBUTE, tag))
}

pub fn drafts_filter() -> Filter {
    Filter::eq(DRAFT_ATTRIBUTE, true)
}

pub(crate) async fn scan_records(
    deps: &BlogDeps,
    filter: &Filter,
    operation: &'static str,
) -> Result<Vec<Record>> {
    deps.store
        .scan(filter)
        .await
        .map_err(|e| BlogError::store(operation, e))
}

/// Scan and unmarshal full posts, preserving store order.
pub(crate) async fn scan_posts(
    deps: &BlogDeps,
    filter: &Filter,
    operation: &'static str,
) -> Result<Vec<Post>> {
    scan_records(deps, filter, operation)
        .await?
        .into_iter()
        .map(|record| Post::from_record(record).map_err(|e| BlogError::store(operation, e.into())))
        .collect()
}

async fn scan_cards(deps: &BlogDeps, filter: &Filter, operation: &'static str) -> Result<Vec<Card>> {
    let cards = scan_records(deps, filter, operation)
        .await?
        .into_iter()
        .map(|record| Card::from_record(record).map_err(|e| BlogError::store(operation, e.into())))
        .collect::<Result<Vec<_>>>()?;

    debug!(count = cards.len(), operation, "Scanned post cards");
    Ok(cards)
}

/// Cards for every published post, in store order.
pub async fn list_published(deps: &BlogDeps) -> Result<Vec<Card>> {
    scan_cards(deps, &published_filter(), "listing published posts").await
}

/// Cards for every published post tagged `tag`. Stored tags are lowercase, so
/// callers should pass lowercase tags.
pub async fn list_by_tag(deps: &BlogDeps, tag: &str) -> Result<Vec<Card>> {
    scan_cards(deps, &published_with_tag_filter(tag), "listing posts by tag").await
}

/// Cards for every draft post.
pub async fn list_drafts(deps: &BlogDeps) -> Result<Vec<Card>> {
    scan_cards(deps, &drafts_filter(), "listing drafts").await
}

/// A published post with its previous/next neighbors filled in.
pub async fn get_by_id(deps: &BlogDeps, id: &str) -> Result<Post> {
    let posts = scan_posts(deps, &published_filter(), "fetching post").await?;
    debug!(post_id = %id, published = posts.len(), "Locating post among published set");

    with_neighbors(posts, id, deps.posts.neighbor_order)
        .ok_or_else(|| BlogError::NotFound(id.to_string()))
}

/// Find `id` in `posts` and attach the adjacent posts as neighbors.
///
/// With [`NeighborOrder::Scan`] adjacency is the given order. With
/// [`NeighborOrder::Chronological`] the posts are first stably sorted by
/// `createDate`, oldest first, with unparsable dates at the end.
pub fn with_neighbors(mut posts: Vec<Post>, id: &str, order: NeighborOrder) -> Option<Post> {
    if order == NeighborOrder::Chronological {
        posts.sort_by_key(|post| {
            let created = DateTime::parse_from_rfc3339(&post.card.create_date)
                .ok()
                .map(|date| date.with_timezone(&Utc));
            (created.is_none(), created)
        });
    }

    let index = posts.iter().position(|post| post.id() == id)?;

    let previous = index
        .checked_sub(1)
        .map(|i| posts[i].info())
        .unwrap_or_default();
    let next = posts.get(index + 1).map(Post::info).unwrap_or_default();

    let mut post = posts.swap_remove(index);
    post.previous = previous;
    post.next = next;
    Some(post)
}
