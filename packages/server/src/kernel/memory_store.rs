//! In-process post store.
//!
//! Keeps records in insertion order so scans are deterministic, which makes it
//! the store of choice for tests and for running without a database.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use super::traits::record_id;
use super::{BasePostStore, Filter, Record};

#[derive(Default)]
pub struct InMemoryPostStore {
    records: RwLock<Vec<Record>>,
    unavailable: AtomicBool,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with records, kept in the given order.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: RwLock::new(records),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail, simulating a store outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of everything stored, in scan order.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .read()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            bail!("in-memory store is unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl BasePostStore for InMemoryPostStore {
    async fn scan(&self, filter: &Filter) -> Result<Vec<Record>> {
        self.check_available()?;
        let records = self
            .records
            .read()
            .map_err(|_| anyhow::anyhow!("in-memory store lock poisoned"))?;

        Ok(records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn put(&self, record: Record) -> Result<()> {
        self.check_available()?;
        let Some(id) = record_id(&record).map(str::to_owned) else {
            bail!("record is missing a non-empty 'id' attribute");
        };

        let mut records = self
            .records
            .write()
            .map_err(|_| anyhow::anyhow!("in-memory store lock poisoned"))?;

        match records.iter_mut().find(|existing| record_id(existing) == Some(id.as_str())) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_scan_keeps_insertion_order() {
        let store = InMemoryPostStore::with_records(vec![
            record(json!({"id": "c", "isDraft": false})),
            record(json!({"id": "a", "isDraft": true})),
            record(json!({"id": "b", "isDraft": false})),
        ]);

        let found = tokio_test::block_on(store.scan(&Filter::eq("isDraft", false))).unwrap();
        let ids: Vec<_> = found.iter().filter_map(record_id).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_put_replaces_in_place() {
        let store = InMemoryPostStore::new();
        store.put(record(json!({"id": "a", "title": "one"}))).await.unwrap();
        store.put(record(json!({"id": "b", "title": "two"}))).await.unwrap();
        store.put(record(json!({"id": "a", "title": "uno"}))).await.unwrap();

        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["title"], "uno");
        assert_eq!(records[1]["id"], "b");
    }

    #[tokio::test]
    async fn test_put_rejects_missing_id() {
        let store = InMemoryPostStore::new();
        assert!(store.put(record(json!({"title": "orphan"}))).await.is_err());
        assert!(store.put(record(json!({"id": "", "title": "blank"}))).await.is_err());
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = InMemoryPostStore::new();
        store.set_unavailable(true);
        assert!(store.scan(&Filter::all()).await.is_err());
        assert!(store.ping().await.is_err());

        store.set_unavailable(false);
        assert!(store.scan(&Filter::all()).await.is_ok());
    }
}
