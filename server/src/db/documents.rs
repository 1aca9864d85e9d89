//! Database operations for the documents table.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tally_engine::{error::Result, Document, Error, Record, StoreAdapter};

/// A stored document row from the database.
#[derive(Debug)]
pub struct StoredDocument {
    pub key: String,
    pub data: serde_json::Value,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for StoredDocument {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(StoredDocument {
            key: row.try_get("key")?,
            data: row.try_get("data")?,
        })
    }
}

impl StoredDocument {
    /// Convert database row to a tally-engine Document.
    pub fn to_document(&self) -> Result<Document> {
        let data: Record = serde_json::from_value(self.data.clone())
            .map_err(|e| Error::store(format!("malformed document {}: {}", self.key, e)))?;
        Ok(Document::new(self.key.clone(), data))
    }
}

fn database_error(e: sqlx::Error) -> Error {
    tracing::error!("Database error: {:?}", e);
    Error::store(format!("database error: {e}"))
}

/// A [`StoreAdapter`] over one collection of the `documents` table.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    collection: String,
}

impl PgStore {
    pub fn new(pool: PgPool, collection: impl Into<String>) -> Self {
        Self {
            pool,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl StoreAdapter for PgStore {
    async fn get_item(&self, key: &str) -> Result<Option<Record>> {
        let stored = sqlx::query_as::<_, StoredDocument>(
            r#"
            SELECT key, data
            FROM documents
            WHERE collection = $1 AND key = $2
            "#,
        )
        .bind(&self.collection)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        stored
            .map(|row| row.to_document().map(|doc| doc.data))
            .transpose()
    }

    async fn list_items(&self) -> Result<Vec<(String, Record)>> {
        // Byte-wise key order, independent of the database locale.
        let rows = sqlx::query_as::<_, StoredDocument>(
            r#"
            SELECT key, data
            FROM documents
            WHERE collection = $1
            ORDER BY key COLLATE "C" ASC
            "#,
        )
        .bind(&self.collection)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter()
            .map(|row| row.to_document().map(|doc| (doc.key, doc.data)))
            .collect()
    }

    async fn put_item(&self, key: &str, record: &Record, merge: bool) -> Result<()> {
        let data = serde_json::to_value(record)
            .map_err(|e| Error::store(format!("unencodable record for {key}: {e}")))?;

        // JSONB `||` overwrites top-level keys present on the right and keeps the rest.
        let sql = if merge {
            r#"
            INSERT INTO documents (collection, key, data, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (collection, key) DO UPDATE SET
                data = documents.data || EXCLUDED.data,
                updated_at = now()
            "#
        } else {
            r#"
            INSERT INTO documents (collection, key, data, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (collection, key) DO UPDATE SET
                data = EXCLUDED.data,
                updated_at = now()
            "#
        };

        sqlx::query(sql)
            .bind(&self.collection)
            .bind(key)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(())
    }

    async fn delete_item(&self, key: &str) -> Result<()> {
        let result = sqlx::query(r#"DELETE FROM documents WHERE collection = $1 AND key = $2"#)
            .bind(&self.collection)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found(key));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stored_document_conversion() {
        let stored = StoredDocument {
            key: "apple".into(),
            data: json!({"quantity": 3, "location": "shelf-2"}),
        };
        let doc = stored.to_document().unwrap();
        assert_eq!(doc.key, "apple");
        assert_eq!(doc.data.quantity, 3);
        assert_eq!(doc.data.extra["location"], "shelf-2");
    }

    #[test]
    fn malformed_document_is_store_error() {
        let stored = StoredDocument {
            key: "apple".into(),
            data: json!({"qty": 3}),
        };
        let err = stored.to_document().unwrap_err();
        assert!(err.is_store());
        assert!(err.message().starts_with("malformed document apple"));
    }
}
