//! Tally Server - document store for the tally inventory engine.
//!
//! Exposes one collection of keyed records over HTTP so that
//! `tally_engine::HttpStore` can use it as its store adapter. Records are
//! kept in PostgreSQL, or in memory when no database is configured.

pub mod config;
pub mod db;
pub mod error;
pub mod routes;

use crate::config::Config;
use axum::Router;
use std::sync::Arc;
use tally_engine::StoreAdapter;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StoreAdapter>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn StoreAdapter>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
