//! Task lifecycle and resolution.
//!
//! Task slugs are resolved within their parent project's scope, so two
//! projects may each own a task slugged `setup`. Creating a task is a
//! two-write unit (insert, then link into the parent's member list); a
//! failed link rolls the insert back so no unlisted orphan survives.

use chrono::Utc;
use slate_core::{
    is_valid_slug, new_entity_id, slugify, Project, SlateError, StorageError, Task, UserId,
};
use slate_storage::{Store, TaskUpdate};

use crate::error::{ApiError, ApiResult};
use crate::services::ownership::{ensure_project_owner, ensure_task_owner};
use crate::services::projects::locate_project;
use crate::services::slugs::{first_free_task_slug, MAX_SLUG_ATTEMPTS};
use crate::types::{CreateTaskRequest, UpdateTaskRequest};

/// Create a task under `project`, acting as `acting`.
///
/// Only the project's owner may add tasks; anyone else gets 403, distinct
/// from the 404 a missing project produces. The slug race handling mirrors
/// project creation, scoped to the project id.
pub async fn create_task(
    store: &dyn Store,
    acting: UserId,
    project: &Project,
    req: &CreateTaskRequest,
) -> ApiResult<Task> {
    ensure_project_owner(project, acting)?;

    if req.name.trim().is_empty() {
        return Err(ApiError::missing_field("name"));
    }

    let candidate = slugify(&req.name);

    for attempt in 1..=MAX_SLUG_ATTEMPTS {
        let slug = first_free_task_slug(store, project.project_id, &candidate).await?;
        let now = Utc::now();
        let task = Task {
            task_id: new_entity_id(),
            name: req.name.clone(),
            slug,
            owner: acting,
            project: project.project_id,
            created_at: now,
            updated_at: now,
        };

        match store.task_insert(&task).await {
            Ok(()) => return link_task(store, project, task).await,
            Err(SlateError::Storage(StorageError::SlugTaken { slug })) => {
                tracing::debug!(%slug, attempt, "task slug race lost, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(ApiError::slug_conflict_exhausted(
        &candidate,
        MAX_SLUG_ATTEMPTS,
    ))
}

/// Second half of the create unit: append the task to the parent's member
/// list. On failure the freshly-inserted task is deleted again so the store
/// never keeps a task its project does not list.
async fn link_task(store: &dyn Store, project: &Project, task: Task) -> ApiResult<Task> {
    if let Err(link_err) = store.project_link_task(project.project_id, task.task_id).await {
        tracing::warn!(
            task_slug = %task.slug,
            project_slug = %project.slug,
            error = %link_err,
            "task link failed, rolling back insert"
        );
        if let Err(rollback_err) = store.task_delete(task.task_id).await {
            // The orphan survives; operators must reconcile from the log.
            tracing::error!(
                task_id = %task.task_id,
                error = %rollback_err,
                "rollback of orphaned task failed"
            );
        }
        return Err(link_err.into());
    }
    Ok(task)
}

/// Resolve a `(project slug, task slug)` pair. A missing project produces
/// the project-level 404 before the task is ever looked up.
pub async fn locate_task(
    store: &dyn Store,
    project_slug: &str,
    task_slug: &str,
) -> ApiResult<(Project, Task)> {
    let project = locate_project(store, project_slug).await?;

    if !is_valid_slug(task_slug) {
        return Err(ApiError::invalid_format(
            "taskSlug",
            "a lowercase URL-safe slug",
        ));
    }

    let task = store
        .task_get_by_slug(project.project_id, task_slug)
        .await?
        .ok_or_else(|| ApiError::task_not_found(task_slug))?;

    Ok((project, task))
}

/// List one page of a project's tasks, returning the page and total count.
pub async fn list_tasks(
    store: &dyn Store,
    project: &Project,
    page: i64,
    limit: i64,
) -> ApiResult<(Vec<Task>, i64)> {
    let offset = page.saturating_sub(1).saturating_mul(limit);
    let tasks = store
        .task_list_by_project(project.project_id, limit, offset)
        .await?;
    let total = store.task_count_by_project(project.project_id).await?;
    Ok((tasks, total))
}

/// Update a task's mutable fields. Owner-only; slug and project linkage are
/// untouched.
pub async fn update_task(
    store: &dyn Store,
    acting: UserId,
    project_slug: &str,
    task_slug: &str,
    req: &UpdateTaskRequest,
) -> ApiResult<Task> {
    let name = match &req.name {
        None => {
            return Err(ApiError::invalid_input(
                "At least one field must be provided for update",
            ))
        }
        Some(name) if name.trim().is_empty() => {
            return Err(ApiError::invalid_input("name cannot be empty"))
        }
        Some(name) => name.clone(),
    };

    let (_, task) = locate_task(store, project_slug, task_slug).await?;
    ensure_task_owner(&task, acting)?;

    store
        .task_update(task.task_id, TaskUpdate { name: Some(name) })
        .await?;

    store
        .task_get(task.task_id)
        .await?
        .ok_or_else(|| ApiError::task_not_found(task_slug))
}

/// Delete a task. Owner-only.
pub async fn delete_task(
    store: &dyn Store,
    acting: UserId,
    project_slug: &str,
    task_slug: &str,
) -> ApiResult<()> {
    let (_, task) = locate_task(store, project_slug, task_slug).await?;
    ensure_task_owner(&task, acting)?;

    store.task_delete(task.task_id).await?;
    tracing::info!(project_slug, task_slug, "task deleted");
    Ok(())
}
