//! Request/Response Types for the Slate API
//!
//! Pure DTOs; business logic lives in the service layer.

use serde::{Deserialize, Serialize};
use slate_core::{Project, ProjectId, Task, TaskId, Timestamp, UserId};

// ============================================================================
// PROJECT TYPES
// ============================================================================

/// Request body for POST /projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    /// Client attribution; defaults to the self-engaged sentinel when absent.
    #[serde(default)]
    pub client: Option<String>,
}

/// Request body for PUT /projects/{slug}.
///
/// Only mutable fields are expressible: slug and owner are immutable by
/// construction, so a patch can never carry them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub client: Option<String>,
}

/// Project representation returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub project_id: ProjectId,
    pub name: String,
    pub slug: String,
    pub owner: UserId,
    pub client: String,
    pub tasks: Vec<TaskId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            project_id: p.project_id,
            name: p.name,
            slug: p.slug,
            owner: p.owner,
            client: p.client,
            tasks: p.tasks,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// ============================================================================
// TASK TYPES
// ============================================================================

/// Request body for POST /projects/{slug}/tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
}

/// Request body for PUT /projects/{slug}/tasks/{taskSlug}.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub name: Option<String>,
}

/// Task representation returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task_id: TaskId,
    pub name: String,
    pub slug: String,
    pub owner: UserId,
    pub project: ProjectId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            task_id: t.task_id,
            name: t.name,
            slug: t.slug,
            owner: t.owner,
            project: t.project,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

// ============================================================================
// PAGINATION
// ============================================================================

/// Pagination query parameters: `?page=1&limit=10`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Resolve page/limit against defaults and the configured cap.
    /// Pages are 1-based; out-of-range values clamp rather than error.
    pub fn resolve(&self, default_limit: i64, max_limit: i64) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, max_limit);
        (page, limit)
    }
}

/// Paginated response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub items: Vec<T>,
}

impl<T> Paginated<T> {
    /// Assemble an envelope. `total_pages` is the ceiling of
    /// `total_items / limit`.
    pub fn new(items: Vec<T>, total_items: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 {
            (total_items + limit - 1) / limit
        } else {
            0
        };
        Self {
            total_items,
            total_pages,
            current_page: page,
            items,
        }
    }
}

// ============================================================================
// MISC
// ============================================================================

/// Confirmation body returned by DELETE endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_params_defaults() {
        let params = PageParams::default();
        assert_eq!(params.resolve(10, 100), (1, 10));
    }

    #[test]
    fn page_params_clamping() {
        let params = PageParams {
            page: Some(0),
            limit: Some(9999),
        };
        assert_eq!(params.resolve(10, 100), (1, 100));

        let params = PageParams {
            page: Some(3),
            limit: Some(-5),
        };
        assert_eq!(params.resolve(10, 100), (3, 1));
    }

    #[test]
    fn total_pages_is_ceiling() {
        let env = Paginated::<u8>::new(Vec::new(), 21, 1, 10);
        assert_eq!(env.total_pages, 3);

        let env = Paginated::<u8>::new(Vec::new(), 20, 1, 10);
        assert_eq!(env.total_pages, 2);

        let env = Paginated::<u8>::new(Vec::new(), 0, 1, 10);
        assert_eq!(env.total_pages, 0);
    }

    #[test]
    fn envelope_uses_camel_case_keys() {
        let env = Paginated::<u8>::new(Vec::new(), 1, 1, 10);
        let json = serde_json::to_string(&env).unwrap();
        assert!(json.contains("totalItems"));
        assert!(json.contains("totalPages"));
        assert!(json.contains("currentPage"));
    }
}
