//! Identity types for Slate entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Entity identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type EntityId = Uuid;

/// Identifier of a project.
pub type ProjectId = EntityId;

/// Identifier of a task.
pub type TaskId = EntityId;

/// Identifier of the user attributed to an entity at creation time.
/// Users themselves live in the surrounding identity provider.
pub type UserId = EntityId;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 EntityId (timestamp-sortable).
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}
