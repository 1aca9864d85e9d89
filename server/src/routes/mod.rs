//! HTTP route definitions.

mod documents;
mod health;

use crate::AppState;
use axum::Router;

pub use documents::{DocumentQuery, ListResponse};
pub use health::HealthResponse;

/// Create all application routes.
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(documents::routes())
}
