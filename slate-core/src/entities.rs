//! Core entity structures

use crate::{ProjectId, TaskId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Project - top-level container owned by a user.
///
/// Addressed externally by `slug`, which is globally unique and immutable
/// once assigned (a rename never re-slugifies).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: ProjectId,
    pub name: String,
    pub slug: String,
    pub owner: UserId,
    /// Free-text client attribution; `SELF_ENGAGED` when there is none.
    pub client: String,
    /// Member tasks in creation order. Append-only.
    pub tasks: Vec<TaskId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Task - a unit of work inside a project.
///
/// The slug is unique within the owning project only; two different
/// projects may each have a task slugged `"setup"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: TaskId,
    pub name: String,
    pub slug: String,
    pub owner: UserId,
    pub project: ProjectId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
