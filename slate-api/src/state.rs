//! Shared application state for Axum routers.

use std::sync::Arc;

use slate_storage::Store;

use crate::config::ApiConfig;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend. Trait object so tests can substitute wrappers that
    /// inject failures.
    pub store: Arc<dyn Store>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: ApiConfig) -> Self {
        Self { store, config }
    }
}
