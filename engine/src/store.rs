//! Store adapter - the boundary to the remote document store.
//!
//! The engine depends on exactly four calls against the store. Nothing is
//! assumed about ordering or atomicity across calls; each call either
//! succeeds or fails on its own.

use crate::{error::Result, Record};
use async_trait::async_trait;
use std::sync::Arc;

/// Access to one collection of keyed [`Record`]s.
///
/// Implementations must enumerate `list_items` in ascending key order and
/// must fail `delete_item` for a key that does not exist.
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// Read one record, `None` if the key is absent.
    async fn get_item(&self, key: &str) -> Result<Option<Record>>;

    /// Read every record in the collection.
    async fn list_items(&self) -> Result<Vec<(String, Record)>>;

    /// Write one record.
    ///
    /// With `merge == false` the stored record is replaced. With
    /// `merge == true` the fields of `record` are merged into the stored
    /// record (see [`Record::merge`]); an absent key is created either way.
    async fn put_item(&self, key: &str, record: &Record, merge: bool) -> Result<()>;

    /// Delete one record.
    async fn delete_item(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<T: StoreAdapter + ?Sized> StoreAdapter for Arc<T> {
    async fn get_item(&self, key: &str) -> Result<Option<Record>> {
        (**self).get_item(key).await
    }

    async fn list_items(&self) -> Result<Vec<(String, Record)>> {
        (**self).list_items().await
    }

    async fn put_item(&self, key: &str, record: &Record, merge: bool) -> Result<()> {
        (**self).put_item(key, record, merge).await
    }

    async fn delete_item(&self, key: &str) -> Result<()> {
        (**self).delete_item(key).await
    }
}

#[async_trait]
impl<T: StoreAdapter + ?Sized> StoreAdapter for Box<T> {
    async fn get_item(&self, key: &str) -> Result<Option<Record>> {
        (**self).get_item(key).await
    }

    async fn list_items(&self) -> Result<Vec<(String, Record)>> {
        (**self).list_items().await
    }

    async fn put_item(&self, key: &str, record: &Record, merge: bool) -> Result<()> {
        (**self).put_item(key, record, merge).await
    }

    async fn delete_item(&self, key: &str) -> Result<()> {
        (**self).delete_item(key).await
    }
}
