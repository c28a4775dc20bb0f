//! Slate Storage - Storage Trait and In-Memory Implementation
//!
//! Defines the storage abstraction layer for Slate entities. The trait is
//! shaped for SQL-backed implementations: slug uniqueness is enforced by the
//! store itself (a unique index on `(scope, slug)`), and a losing insert
//! surfaces as [`StorageError::SlugTaken`] rather than corrupting state.
//! The uniqueness resolver above this layer treats that error as a lost race
//! and retries with a fresh suffix.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use slate_core::{Project, ProjectId, SlateResult, Task, TaskId, UserId};

/// Update payload for projects. Only mutable fields appear here: slug and
/// owner are immutable once assigned, so they cannot even be expressed.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    /// New display name. Does not re-slugify.
    pub name: Option<String>,
    /// New client attribution.
    pub client: Option<String>,
}

/// Update payload for tasks. Slug, owner, and project linkage are immutable.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    /// New display name. Does not re-slugify.
    pub name: Option<String>,
}

/// Async storage trait for Slate entities.
///
/// All reads and writes suspend; requests execute concurrently against a
/// shared store with no in-process locking assumed above this trait.
#[async_trait]
pub trait Store: Send + Sync {
    // === Project Operations ===

    /// Insert a new project. Fails with [`StorageError::SlugTaken`] when the
    /// global slug index already holds `p.slug`.
    ///
    /// [`StorageError::SlugTaken`]: slate_core::StorageError::SlugTaken
    async fn project_insert(&self, p: &Project) -> SlateResult<()>;

    /// Get a project by ID.
    async fn project_get(&self, id: ProjectId) -> SlateResult<Option<Project>>;

    /// Get a project by its globally-unique slug.
    async fn project_get_by_slug(&self, slug: &str) -> SlateResult<Option<Project>>;

    /// Probe whether a project slug is taken.
    async fn project_slug_exists(&self, slug: &str) -> SlateResult<bool>;

    /// List projects owned by `owner`, ordered by creation, paginated.
    async fn project_list_by_owner(
        &self,
        owner: UserId,
        limit: i64,
        offset: i64,
    ) -> SlateResult<Vec<Project>>;

    /// Count projects owned by `owner`.
    async fn project_count_by_owner(&self, owner: UserId) -> SlateResult<i64>;

    /// Apply a partial update to a project.
    async fn project_update(&self, id: ProjectId, update: ProjectUpdate) -> SlateResult<()>;

    /// Append `task_id` to the project's member list. Append-only; the list
    /// reflects task creation order.
    async fn project_link_task(&self, id: ProjectId, task_id: TaskId) -> SlateResult<()>;

    /// Delete a project and, cascading, every task it owns.
    async fn project_delete(&self, id: ProjectId) -> SlateResult<()>;

    // === Task Operations ===

    /// Insert a new task. Fails with [`StorageError::SlugTaken`] when the
    /// `(project, slug)` index already holds `t.slug` for `t.project`.
    ///
    /// [`StorageError::SlugTaken`]: slate_core::StorageError::SlugTaken
    async fn task_insert(&self, t: &Task) -> SlateResult<()>;

    /// Get a task by ID.
    async fn task_get(&self, id: TaskId) -> SlateResult<Option<Task>>;

    /// Get a task by slug within a project's scope.
    async fn task_get_by_slug(&self, project: ProjectId, slug: &str)
        -> SlateResult<Option<Task>>;

    /// Probe whether a task slug is taken within a project.
    async fn task_slug_exists(&self, project: ProjectId, slug: &str) -> SlateResult<bool>;

    /// List a project's tasks, ordered by creation, paginated.
    async fn task_list_by_project(
        &self,
        project: ProjectId,
        limit: i64,
        offset: i64,
    ) -> SlateResult<Vec<Task>>;

    /// Count a project's tasks.
    async fn task_count_by_project(&self, project: ProjectId) -> SlateResult<i64>;

    /// Apply a partial update to a task.
    async fn task_update(&self, id: TaskId, update: TaskUpdate) -> SlateResult<()>;

    /// Delete a task and unlink it from its project's member list.
    async fn task_delete(&self, id: TaskId) -> SlateResult<()>;
}
