//! Slate API - REST Layer
//!
//! This crate exposes the project and task tracker over HTTP (Axum). It
//! owns the slug lifecycle: handlers resolve path slugs through the service
//! layer, creations run the probe-and-insert slug cycle against the storage
//! backend, and ownership is enforced before every mutation.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use auth::{
    authenticate, generate_jwt_token, validate_jwt_token, AuthConfig, AuthContext, Claims,
    FixedClock, JwtClock, SystemClock,
};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use middleware::{auth_middleware, AuthExtractor, AuthMiddlewareState};
pub use routes::create_api_router;
pub use state::AppState;
pub use types::*;
