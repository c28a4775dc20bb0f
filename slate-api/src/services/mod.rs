//! Service Layer
//!
//! Business logic extracted from the route handlers: slug uniqueness
//! resolution, entity lifecycle (create/update/delete with the create+link
//! unit for tasks), ownership checks, and slug-to-entity resolution.
//! Handlers stay thin; everything here is testable against any [`Store`].
//!
//! [`Store`]: slate_storage::Store

pub mod ownership;
pub mod projects;
pub mod slugs;
pub mod tasks;

pub use ownership::*;
pub use projects::*;
pub use slugs::*;
pub use tasks::*;
