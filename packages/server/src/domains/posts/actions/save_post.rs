//! Write path: identity, timestamps and tag normalization before the upsert.

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};

use crate::common::{generate_post_id, BlogError, Result};
use crate::config::UpdatePolicy;
use crate::domains::posts::models::Post;
use crate::kernel::traits::{record_id, ID_ATTRIBUTE};
use crate::kernel::{BlogDeps, Filter};

const CREATE_DATE_ATTRIBUTE: &str = "createDate";

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Create (`is_new`) or update a post.
///
/// Creation assigns a fresh id and `createDate` and clears `modifiedDate`.
/// Updates keep the caller's id, refresh `modifiedDate` and carry over the
/// stored `createDate`. Whether an update of an unknown id fails or creates
/// the post is decided by [`UpdatePolicy`]. Tags are lowercased either way.
///
/// Returns `true` once the store accepted the record.
pub async fn save_post(deps: &BlogDeps, post: &mut Post, is_new: bool) -> Result<bool> {
    let now = now_rfc3339();

    if is_new {
        post.card.id = generate_post_id();
        post.card.create_date = now;
        post.modified_date = None;
    } else {
        let stored = deps
            .store
            .scan(&Filter::eq(ID_ATTRIBUTE, post.id()))
            .await
            .map_err(|e| BlogError::store("looking up post for update", e))?;

        match stored.first() {
            Some(existing) => {
                if let Some(created) = existing.get(CREATE_DATE_ATTRIBUTE).and_then(|v| v.as_str()) {
                    post.card.create_date = created.to_string();
                }
            }
            None if deps.posts.update_policy == UpdatePolicy::RequireExisting => {
                return Err(BlogError::NotFound(post.id().to_string()));
            }
            None => debug!(post_id = %post.id(), "Update of unknown post creates it"),
        }
        post.modified_date = Some(now);
    }

    post.normalize_tags();

    let record = post
        .to_record()
        .map_err(|e| BlogError::Write(format!("failed to marshal post: {}", e)))?;
    if record_id(&record).is_none() {
        let mut keys: Vec<_> = record.keys().cloned().collect();
        keys.sort();
        return Err(BlogError::Write(format!(
            "marshaled post is missing '{}'. Available keys: {:?}",
            ID_ATTRIBUTE, keys
        )));
    }

    info!(post_id = %post.id(), is_new, tag_count = post.card.tags.len(), "Saving post");

    deps.store
        .put(record)
        .await
        .map_err(|e| BlogError::store("saving post", e))?;

    Ok(true)
}
