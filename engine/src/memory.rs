//! In-memory store adapter.
//!
//! Backs tests and the server's database-less mode. Records live in a
//! `BTreeMap`, so enumeration order is ascending key order like the remote
//! store.

use crate::{error::Result, Error, Record, StoreAdapter};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::RwLock;

/// A [`StoreAdapter`] holding records in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, Record>>,
    latency: Option<Duration>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a network round trip of `latency` before every call.
    ///
    /// The delay happens before the call touches the map, so two callers
    /// started together both observe the state from before either wrote.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Insert a record directly, bypassing latency.
    pub async fn seed(&self, key: impl Into<String>, record: Record) {
        self.records.write().await.insert(key.into(), record);
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Check if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn round_trip(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl StoreAdapter for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<Record>> {
        self.round_trip().await;
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn list_items(&self) -> Result<Vec<(String, Record)>> {
        self.round_trip().await;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect())
    }

    async fn put_item(&self, key: &str, record: &Record, merge: bool) -> Result<()> {
        self.round_trip().await;
        let mut records = self.records.write().await;
        if merge {
            if let Some(existing) = records.get_mut(key) {
                existing.merge(record);
                return Ok(());
            }
        }
        records.insert(key.to_string(), record.clone());
        Ok(())
    }

    async fn delete_item(&self, key: &str) -> Result<()> {
        self.round_trip().await;
        self.records
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| Error::not_found(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn put_and_get() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("apple").await.unwrap(), None);

        store.put_item("apple", &Record::new(3), false).await.unwrap();
        assert_eq!(store.get_item("apple").await.unwrap(), Some(Record::new(3)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn keys_are_case_sensitive() {
        let store = MemoryStore::new();
        store.put_item("Apple", &Record::new(1), false).await.unwrap();
        assert_eq!(store.get_item("apple").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_in_key_order() {
        let store = MemoryStore::new();
        store.seed("mango", Record::new(2)).await;
        store.seed("apple", Record::new(1)).await;
        store.seed("banana", Record::new(5)).await;

        let keys: Vec<String> = store
            .list_items()
            .await
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["apple", "banana", "mango"]);
    }

    #[tokio::test]
    async fn replace_drops_extra_fields() {
        let store = MemoryStore::new();
        let stored: Record =
            serde_json::from_value(json!({"quantity": 3, "location": "shelf-2"})).unwrap();
        store.seed("apple", stored).await;

        store.put_item("apple", &Record::new(4), false).await.unwrap();
        let record = store.get_item("apple").await.unwrap().unwrap();
        assert_eq!(record, Record::new(4));
    }

    #[tokio::test]
    async fn merge_keeps_extra_fields() {
        let store = MemoryStore::new();
        let stored: Record =
            serde_json::from_value(json!({"quantity": 3, "location": "shelf-2"})).unwrap();
        store.seed("apple", stored).await;

        store.put_item("apple", &Record::new(4), true).await.unwrap();
        let record = store.get_item("apple").await.unwrap().unwrap();
        assert_eq!(record.quantity, 4);
        assert_eq!(record.extra["location"], "shelf-2");
    }

    #[tokio::test]
    async fn merge_creates_absent_key() {
        let store = MemoryStore::new();
        store.put_item("kiwi", &Record::new(7), true).await.unwrap();
        assert_eq!(store.get_item("kiwi").await.unwrap(), Some(Record::new(7)));
    }

    #[tokio::test]
    async fn delete_missing_fails() {
        let store = MemoryStore::new();
        let err = store.delete_item("ghost").await.unwrap_err();
        assert!(err.is_store());
        assert_eq!(err.message(), "document not found: ghost");
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = MemoryStore::new();
        store.seed("apple", Record::new(1)).await;
        store.delete_item("apple").await.unwrap();
        assert!(store.is_empty().await);
    }
}
