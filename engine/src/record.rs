//! Record types for inventory items.

use crate::{error::Result, Error, ItemName, Quantity};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub(crate) const EMPTY_NAME_MESSAGE: &str = "Item name cannot be empty";
pub(crate) const INVALID_QUANTITY_MESSAGE: &str = "Please enter a valid quantity";

/// The persisted payload for one inventory item.
///
/// Only `quantity` is read or written by the engine. Any other fields a
/// document carries are kept in `extra` and survive merge-writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub quantity: Quantity,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Create a record holding only a quantity.
    pub fn new(quantity: Quantity) -> Self {
        Self {
            quantity,
            extra: Map::new(),
        }
    }

    /// Merge `other` into this record, field by field.
    ///
    /// `quantity` is always taken from `other`; extra fields of `other`
    /// overwrite fields with the same key and leave the rest untouched.
    pub fn merge(&mut self, other: &Record) {
        self.quantity = other.quantity;
        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

/// One entry of a snapshot: the store key mapped to `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: ItemName,
    pub quantity: Quantity,
}

impl Item {
    pub fn new(name: impl Into<ItemName>, quantity: Quantity) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// A keyed record as it travels between the HTTP adapter and the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub key: ItemName,
    pub data: Record,
}

impl Document {
    pub fn new(key: impl Into<ItemName>, data: Record) -> Self {
        Self {
            key: key.into(),
            data,
        }
    }

    /// Project the document onto the fields the snapshot exposes.
    pub fn to_item(&self) -> Item {
        Item::new(self.key.clone(), self.data.quantity)
    }
}

/// Reject empty or whitespace-only names.
///
/// The name is returned verbatim: it is the store key and is never trimmed
/// or case-folded.
pub fn validate_name(name: &str) -> Result<&str> {
    if name.trim().is_empty() {
        return Err(Error::validation(EMPTY_NAME_MESSAGE));
    }
    Ok(name)
}

/// Parse user input into a strictly positive quantity.
pub fn parse_quantity(input: &str) -> Result<Quantity> {
    let quantity: Quantity = input
        .trim()
        .parse()
        .map_err(|_| Error::validation(INVALID_QUANTITY_MESSAGE))?;
    check_quantity(quantity)
}

pub(crate) fn check_quantity(quantity: Quantity) -> Result<Quantity> {
    if quantity > 0 {
        Ok(quantity)
    } else {
        Err(Error::validation(INVALID_QUANTITY_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_keeps_unknown_fields() {
        let record: Record =
            serde_json::from_value(json!({"quantity": 3, "location": "shelf-2"})).unwrap();
        assert_eq!(record.quantity, 3);
        assert_eq!(record.extra["location"], "shelf-2");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, json!({"quantity": 3, "location": "shelf-2"}));
    }

    #[test]
    fn record_requires_quantity() {
        let result: std::result::Result<Record, _> =
            serde_json::from_value(json!({"location": "shelf-2"}));
        assert!(result.is_err());
    }

    #[test]
    fn merge_overwrites_quantity_only() {
        let mut stored: Record =
            serde_json::from_value(json!({"quantity": 3, "location": "shelf-2"})).unwrap();
        stored.merge(&Record::new(9));

        assert_eq!(stored.quantity, 9);
        assert_eq!(stored.extra["location"], "shelf-2");
    }

    #[test]
    fn merge_overwrites_matching_extra_fields() {
        let mut stored: Record =
            serde_json::from_value(json!({"quantity": 3, "location": "shelf-2", "unit": "kg"}))
                .unwrap();
        let patch: Record =
            serde_json::from_value(json!({"quantity": 4, "location": "shelf-7"})).unwrap();
        stored.merge(&patch);

        assert_eq!(stored.quantity, 4);
        assert_eq!(stored.extra["location"], "shelf-7");
        assert_eq!(stored.extra["unit"], "kg");
    }

    #[test]
    fn validate_name_rejects_blank() {
        assert!(validate_name("").unwrap_err().is_validation());
        assert!(validate_name("   \t").unwrap_err().is_validation());
        assert_eq!(
            validate_name("").unwrap_err().message(),
            "Item name cannot be empty"
        );
    }

    #[test]
    fn validate_name_keeps_name_verbatim() {
        assert_eq!(validate_name(" Apple ").unwrap(), " Apple ");
    }

    #[test]
    fn parse_quantity_accepts_positive_integers() {
        assert_eq!(parse_quantity("5").unwrap(), 5);
        assert_eq!(parse_quantity("  12 ").unwrap(), 12);
    }

    #[test]
    fn parse_quantity_rejects_bad_input() {
        for input in ["", "   ", "0", "-1", "abc", "1.5", "5kg", "99999999999999999999"] {
            let err = parse_quantity(input).unwrap_err();
            assert!(err.is_validation(), "expected rejection for {input:?}");
            assert_eq!(err.message(), "Please enter a valid quantity");
        }
    }

    #[test]
    fn document_wire_format() {
        let doc = Document::new("apple", Record::new(2));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json, json!({"key": "apple", "data": {"quantity": 2}}));
        assert_eq!(doc.to_item(), Item::new("apple", 2));
    }
}
