//! Slug uniqueness resolution.
//!
//! Given a candidate produced by the slugifier, find the first slug not yet
//! taken in the target scope: the candidate itself, then `candidate-1`,
//! `candidate-2`, and so on. The search restarts from the base candidate on
//! every call, so a numeric suffix freed by deletion is reused by the next
//! creation in that scope.
//!
//! The probe result is advisory only: between the probe and the persist a
//! concurrent creator may take the slug. The store's unique index on
//! `(scope, slug)` is the serialization point; the create paths in
//! [`projects`](super::projects) and [`tasks`](super::tasks) re-run the
//! whole probe-and-insert cycle on a lost race, bounded by
//! [`MAX_SLUG_ATTEMPTS`].

use crate::error::ApiResult;
use slate_core::{slug::suffixed, ProjectId};
use slate_storage::Store;

/// Maximum resolve-and-persist cycles before a create fails with 409.
pub const MAX_SLUG_ATTEMPTS: u32 = 16;

/// First project slug not present in the global scope.
pub async fn first_free_project_slug(store: &dyn Store, candidate: &str) -> ApiResult<String> {
    let mut slug = candidate.to_string();
    let mut count: u32 = 1;

    while store.project_slug_exists(&slug).await? {
        slug = suffixed(candidate, count);
        count += 1;
    }

    Ok(slug)
}

/// First task slug not present within `project`'s scope.
pub async fn first_free_task_slug(
    store: &dyn Store,
    project: ProjectId,
    candidate: &str,
) -> ApiResult<String> {
    let mut slug = candidate.to_string();
    let mut count: u32 = 1;

    while store.task_slug_exists(project, &slug).await? {
        slug = suffixed(candidate, count);
        count += 1;
    }

    Ok(slug)
}
