// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Mapping records to posts, neighbors and tag counts live in the domains.

use anyhow::Result;
use async_trait::async_trait;

use super::Filter;

/// A raw record as the backing store holds it: attribute name to JSON value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Attribute every record is keyed by.
pub const ID_ATTRIBUTE: &str = "id";

// =============================================================================
// Post Store Trait (Infrastructure - scan + upsert)
// =============================================================================

#[async_trait]
pub trait BasePostStore: Send + Sync {
    /// Return every record matching `filter`, in whatever order the store
    /// delivers them. No sorting is applied.
    async fn scan(&self, filter: &Filter) -> Result<Vec<Record>>;

    /// Insert or replace the record keyed by its `id` attribute.
    async fn put(&self, record: Record) -> Result<()>;

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Pull the non-empty `id` out of a record, if it has one.
pub fn record_id(record: &Record) -> Option<&str> {
    record
        .get(ID_ATTRIBUTE)
        .and_then(|v| v.as_str())
        .filter(|id| !id.is_empty())
}
