//! Inventory counter engine.
//!
//! Each operation is a sequence of store adapter calls followed by a full
//! re-fetch of the collection. The engine keeps no state between calls
//! beyond its adapter and configuration.
//!
//! # Concurrency
//!
//! `increment` and `decrement_or_delete` read the stored record and then
//! write a value computed from it, with no compare-and-swap in between.
//! Two callers touching the same item concurrently can both read the same
//! quantity and both write back a value derived from it, so one update is
//! lost. Callers that need stronger guarantees must serialize their calls.

use crate::record::{check_quantity, parse_quantity, validate_name};
use crate::{error::Result, Error, Quantity, Record, Snapshot, StoreAdapter};
use std::future::Future;
use std::time::Duration;

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Upper bound on every individual store call. `None` waits forever.
    pub call_timeout: Option<Duration>,
}

impl InventoryConfig {
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }
}

/// Result of [`Inventory::remove_one`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// Fresh snapshot taken after the removal.
    pub snapshot: Snapshot,
    /// Stored quantity before the call, `None` if the item was absent.
    pub previous: Option<Quantity>,
}

impl Removal {
    /// Check if the item was stored when the removal ran.
    pub fn existed(&self) -> bool {
        self.previous.is_some()
    }

    /// Check if the removal deleted the record.
    pub fn deleted(&self) -> bool {
        matches!(self.previous, Some(quantity) if quantity <= 1)
    }
}

/// Read-modify-write counter operations over a [`StoreAdapter`].
#[derive(Debug)]
pub struct Inventory<S> {
    store: S,
    config: InventoryConfig,
}

impl<S: StoreAdapter> Inventory<S> {
    /// Create an engine with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, InventoryConfig::default())
    }

    pub fn with_config(store: S, config: InventoryConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Add one unit of `name`, creating the record at 1 if it is absent.
    pub async fn increment(&self, name: &str) -> Result<Snapshot> {
        let name = validate_name(name)?;
        let result = self.try_increment(name).await;
        Ok(self.finish("increment", name, result).await?.1)
    }

    async fn try_increment(&self, name: &str) -> Result<()> {
        let quantity = match self.get(name).await? {
            Some(record) => record.quantity.checked_add(1).ok_or_else(|| {
                Error::store(format!("quantity of {name} cannot be incremented"))
            })?,
            None => 1,
        };
        self.put(name, &Record::new(quantity), false).await
    }

    /// Remove one unit of `name`, deleting the record instead of writing 0.
    ///
    /// An absent record is not an error: nothing is written and the fresh
    /// snapshot is still returned. Use [`Inventory::remove_one`] to tell
    /// the two cases apart.
    pub async fn decrement_or_delete(&self, name: &str) -> Result<Snapshot> {
        self.remove_one(name).await.map(|removal| removal.snapshot)
    }

    /// Like [`Inventory::decrement_or_delete`], also reporting the quantity
    /// that was stored before the call.
    pub async fn remove_one(&self, name: &str) -> Result<Removal> {
        let result = self.try_decrement(name).await;
        let (previous, snapshot) = self.finish("decrement", name, result).await?;
        Ok(Removal { snapshot, previous })
    }

    async fn try_decrement(&self, name: &str) -> Result<Option<Quantity>> {
        let Some(record) = self.get(name).await? else {
            tracing::debug!(item = %name, "decrement of absent item, nothing to write");
            return Ok(None);
        };
        if record.quantity <= 1 {
            self.delete(name).await?;
        } else {
            self.put(name, &Record::new(record.quantity - 1), false).await?;
        }
        Ok(Some(record.quantity))
    }

    /// Set the quantity of `name` from user input.
    ///
    /// The input must be a positive integer; otherwise the store is not
    /// touched and a validation error is returned.
    pub async fn set_absolute(&self, name: &str, input: &str) -> Result<Snapshot> {
        let name = validate_name(name)?;
        let quantity = parse_quantity(input)?;
        self.write_quantity(name, quantity).await
    }

    /// Set the quantity of `name` to an already-typed value.
    pub async fn set_quantity(&self, name: &str, quantity: Quantity) -> Result<Snapshot> {
        let name = validate_name(name)?;
        let quantity = check_quantity(quantity)?;
        self.write_quantity(name, quantity).await
    }

    async fn write_quantity(&self, name: &str, quantity: Quantity) -> Result<Snapshot> {
        let result = self.put(name, &Record::new(quantity), true).await;
        Ok(self.finish("set", name, result).await?.1)
    }

    /// Fetch every record as a fresh snapshot.
    pub async fn list_all(&self) -> Result<Snapshot> {
        let records = self
            .call("list_items", self.store.list_items())
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "failed to list inventory"))?;
        Ok(Snapshot::from_records(records))
    }

    /// Re-fetch after a mutation, or surface the mutation's error.
    async fn finish<T>(
        &self,
        op: &'static str,
        name: &str,
        result: Result<T>,
    ) -> Result<(T, Snapshot)> {
        let value = result.inspect_err(|e| {
            tracing::warn!(op, item = %name, error = %e, "inventory operation failed")
        })?;
        tracing::debug!(op, item = %name, "inventory operation written, refreshing");
        Ok((value, self.list_all().await?))
    }

    async fn get(&self, name: &str) -> Result<Option<Record>> {
        self.call("get_item", self.store.get_item(name)).await
    }

    async fn put(&self, name: &str, record: &Record, merge: bool) -> Result<()> {
        tracing::debug!(item = %name, quantity = record.quantity, merge, "writing item");
        self.call("put_item", self.store.put_item(name, record, merge))
            .await
    }

    async fn delete(&self, name: &str) -> Result<()> {
        tracing::debug!(item = %name, "deleting exhausted item");
        self.call("delete_item", self.store.delete_item(name)).await
    }

    async fn call<T>(&self, what: &str, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match self.config.call_timeout {
            Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
                Error::store(format!("{what} timed out after {}ms", limit.as_millis()))
            })?,
            None => fut.await,
        }
    }
}
