//! Project lifecycle and resolution.
//!
//! Creation assigns the slug once, via the uniqueness resolver against the
//! global scope; the slug is never regenerated, even on rename.

use chrono::Utc;
use slate_core::{
    is_valid_slug, new_entity_id, slugify, Project, SlateError, StorageError, UserId,
    SELF_ENGAGED,
};
use slate_storage::{ProjectUpdate, Store};

use crate::error::{ApiError, ApiResult};
use crate::services::ownership::ensure_project_owner;
use crate::services::slugs::{first_free_project_slug, MAX_SLUG_ATTEMPTS};
use crate::types::{CreateProjectRequest, UpdateProjectRequest};

/// Create a project owned by `owner`.
///
/// The probe-then-insert cycle is retried on a lost slug race: the store's
/// global unique index rejects the losing insert with `SlugTaken`, and the
/// next cycle picks up a fresh suffix. Exhausting [`MAX_SLUG_ATTEMPTS`]
/// cycles fails the request with 409.
pub async fn create_project(
    store: &dyn Store,
    owner: UserId,
    req: &CreateProjectRequest,
) -> ApiResult<Project> {
    if req.name.trim().is_empty() {
        return Err(ApiError::missing_field("name"));
    }

    let candidate = slugify(&req.name);
    let client = req
        .client
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(SELF_ENGAGED)
        .to_string();

    for attempt in 1..=MAX_SLUG_ATTEMPTS {
        let slug = first_free_project_slug(store, &candidate).await?;
        let now = Utc::now();
        let project = Project {
            project_id: new_entity_id(),
            name: req.name.clone(),
            slug,
            owner,
            client: client.clone(),
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        match store.project_insert(&project).await {
            Ok(()) => return Ok(project),
            Err(SlateError::Storage(StorageError::SlugTaken { slug })) => {
                tracing::debug!(%slug, attempt, "project slug race lost, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(ApiError::slug_conflict_exhausted(
        &candidate,
        MAX_SLUG_ATTEMPTS,
    ))
}

/// Resolve a path slug to a project, or 404. Malformed slugs are 400 before
/// storage is touched.
pub async fn locate_project(store: &dyn Store, slug: &str) -> ApiResult<Project> {
    if !is_valid_slug(slug) {
        return Err(ApiError::invalid_format("slug", "a lowercase URL-safe slug"));
    }

    store
        .project_get_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::project_not_found(slug))
}

/// List `owner`'s projects for one page, returning the page and total count.
pub async fn list_projects(
    store: &dyn Store,
    owner: UserId,
    page: i64,
    limit: i64,
) -> ApiResult<(Vec<Project>, i64)> {
    let offset = page.saturating_sub(1).saturating_mul(limit);
    let projects = store.project_list_by_owner(owner, limit, offset).await?;
    let total = store.project_count_by_owner(owner).await?;
    Ok((projects, total))
}

/// Update a project's mutable fields. Owner-only; the slug is untouched.
pub async fn update_project(
    store: &dyn Store,
    acting: UserId,
    slug: &str,
    req: &UpdateProjectRequest,
) -> ApiResult<Project> {
    if req.name.is_none() && req.client.is_none() {
        return Err(ApiError::invalid_input(
            "At least one field must be provided for update",
        ));
    }
    if let Some(name) = &req.name {
        if name.trim().is_empty() {
            return Err(ApiError::invalid_input("name cannot be empty"));
        }
    }

    let project = locate_project(store, slug).await?;
    ensure_project_owner(&project, acting)?;

    store
        .project_update(
            project.project_id,
            ProjectUpdate {
                name: req.name.clone(),
                client: req.client.clone(),
            },
        )
        .await?;

    store
        .project_get(project.project_id)
        .await?
        .ok_or_else(|| ApiError::project_not_found(slug))
}

/// Delete a project (cascading to its tasks). Owner-only.
pub async fn delete_project(store: &dyn Store, acting: UserId, slug: &str) -> ApiResult<()> {
    let project = locate_project(store, slug).await?;
    ensure_project_owner(&project, acting)?;

    store.project_delete(project.project_id).await?;
    tracing::info!(%slug, "project deleted");
    Ok(())
}
