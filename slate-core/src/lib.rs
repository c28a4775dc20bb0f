//! Slate Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! The only logic here is the slugifier, which is a pure function.

pub mod entities;
pub mod error;
pub mod identity;
pub mod slug;

pub use entities::{Project, Task};
pub use error::{SlateError, SlateResult, StorageError, ValidationError};
pub use identity::{new_entity_id, EntityId, ProjectId, TaskId, Timestamp, UserId};
pub use slug::{is_valid_slug, slugify, suffixed};

/// Default value for a project's `client` field, meaning no external client.
pub const SELF_ENGAGED: &str = "SelfEngaged";

/// Entity type discriminator used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EntityType {
    Project,
    Task,
}
