//! Error types for Slate operations

use crate::EntityType;
use thiserror::Error;
use uuid::Uuid;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Entity not found: {entity_type:?} with id {id}")]
    NotFound { entity_type: EntityType, id: Uuid },

    /// The `(scope, slug)` unique index rejected an insert. Signals a lost
    /// race to the uniqueness resolver, which retries with a fresh suffix.
    #[error("Slug '{slug}' already taken in scope")]
    SlugTaken { slug: String },

    #[error("Insert failed for {entity_type:?}: {reason}")]
    InsertFailed { entity_type: EntityType, reason: String },

    #[error("Update failed for {entity_type:?} with id {id}: {reason}")]
    UpdateFailed {
        entity_type: EntityType,
        id: Uuid,
        reason: String,
    },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Master error type for all Slate errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlateError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The bounded resolve-and-persist retry loop ran out of attempts
    /// without winning the slug race.
    #[error("Could not assign a unique slug for '{candidate}' after {attempts} attempts")]
    SlugConflictExhausted { candidate: String, attempts: u32 },
}

/// Result type alias for Slate operations.
pub type SlateResult<T> = Result<T, SlateError>;
