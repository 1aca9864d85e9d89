//! Document endpoints: read, list, write and delete records by key.
//!
//! Single-document routes take the key as a query parameter. Keys are
//! arbitrary item names, and a path segment of `.` or `..` would be
//! normalized away by clients before the request is sent.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tally_engine::{validate_name, Document, Record};

use crate::error::{AppError, Result};
use crate::AppState;

/// Response for listing the collection.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    /// Every document, in ascending key order
    pub documents: Vec<Document>,
}

/// Query parameters addressing one document.
#[derive(Debug, Deserialize)]
pub struct DocumentQuery {
    /// Document key, used verbatim
    pub key: String,
    /// Merge into the stored record instead of replacing it (writes only)
    #[serde(default)]
    pub merge: bool,
}

/// Create document routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents))
        .route(
            "/document",
            get(get_document).put(put_document).delete(delete_document),
        )
}

/// GET /documents - List every document.
async fn list_documents(State(state): State<AppState>) -> Result<Json<ListResponse>> {
    let documents = state
        .store
        .list_items()
        .await?
        .into_iter()
        .map(|(key, data)| Document::new(key, data))
        .collect();
    Ok(Json(ListResponse { documents }))
}

/// GET /document?key={key} - Read one document.
///
/// A blank key is just a key nothing was ever written under.
async fn get_document(
    State(state): State<AppState>,
    Query(query): Query<DocumentQuery>,
) -> Result<Json<Document>> {
    match state.store.get_item(&query.key).await? {
        Some(data) => Ok(Json(Document::new(query.key, data))),
        None => Err(AppError::NotFound(format!("document not found: {}", query.key))),
    }
}

/// PUT /document?key={key}&merge={bool} - Write one document.
async fn put_document(
    State(state): State<AppState>,
    Query(query): Query<DocumentQuery>,
    Json(record): Json<Record>,
) -> Result<StatusCode> {
    let key = validate_name(&query.key)?;
    state.store.put_item(key, &record, query.merge).await?;
    tracing::debug!(key = %key, quantity = record.quantity, merge = query.merge, "document written");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /document?key={key} - Delete one document.
async fn delete_document(
    State(state): State<AppState>,
    Query(query): Query<DocumentQuery>,
) -> Result<StatusCode> {
    match state.store.delete_item(&query.key).await {
        Ok(()) => {
            tracing::debug!(key = %query.key, "document deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) if e.is_not_found() => Err(AppError::NotFound(e.message().to_string())),
        Err(e) => Err(e.into()),
    }
}
