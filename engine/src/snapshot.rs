//! Snapshot - the full inventory as last fetched from the store.
//!
//! A snapshot is rebuilt from a complete `list_items` call after every
//! mutation and replaced wholesale. It is never patched in place.

use crate::{Item, Quantity, Record};
use serde::{Deserialize, Serialize};

/// All item records at a point in time, in store enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    items: Vec<Item>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from store output, mapping each key to `name`.
    pub fn from_records(records: Vec<(String, Record)>) -> Self {
        records
            .into_iter()
            .map(|(name, record)| Item::new(name, record.quantity))
            .collect()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Find an item by exact (case-sensitive) name.
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Quantity of an item, `None` if it is not in the snapshot.
    pub fn quantity_of(&self, name: &str) -> Option<Quantity> {
        self.get(name).map(|item| item.quantity)
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> Quantity {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

impl From<Vec<Item>> for Snapshot {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl FromIterator<Item> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Snapshot {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
