//! REST API Routes Module
//!
//! Route handlers organized by entity type, plus the top-level router
//! assembly with auth, CORS, and request tracing layers.

pub mod health;
pub mod project;
pub mod task;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    Router,
};
use slate_storage::Store;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::AuthConfig;
use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, AuthMiddlewareState};
use crate::state::AppState;

/// Build the full API router.
///
/// Everything under `/projects` requires bearer auth; `/health` does not.
pub fn create_api_router(
    store: Arc<dyn Store>,
    api_config: &ApiConfig,
    auth_config: AuthConfig,
) -> Router {
    let state = Arc::new(AppState::new(store, api_config.clone()));
    let auth_state = AuthMiddlewareState::new(auth_config);

    let projects = project::create_router(state.clone()).merge(task::create_router(state));

    Router::new()
        .nest("/projects", projects)
        .layer(from_fn_with_state(auth_state, auth_middleware))
        .merge(health::create_router())
        .layer(build_cors_layer(api_config))
        .layer(TraceLayer::new_for_http())
}

/// CORS layer from config: permissive when no origins are configured (dev
/// mode), exact-origin otherwise.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
    ];

    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    }
}
