//! Task route handlers.
//!
//! Tasks are addressed through their parent project:
//! `/projects/{slug}/tasks/{taskSlug}`. The parent is resolved first, so a
//! missing project surfaces as the project-level 404 on every task route.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::ApiResult;
use crate::middleware::AuthExtractor;
use crate::services::{projects, tasks};
use crate::state::AppState;
use crate::types::{
    CreateTaskRequest, DeleteResponse, PageParams, Paginated, TaskResponse, UpdateTaskRequest,
};

/// Routes mounted under `/projects` alongside the project routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/:slug/tasks", get(list_tasks).post(create_task))
        .route(
            "/:slug/tasks/:task_slug",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(state)
}

/// POST /projects/{slug}/tasks
async fn create_task(
    State(state): State<Arc<AppState>>,
    AuthExtractor(ctx): AuthExtractor,
    Path(slug): Path<String>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let project = projects::locate_project(state.store.as_ref(), &slug).await?;
    let task = tasks::create_task(state.store.as_ref(), ctx.user_id, &project, &req).await?;
    tracing::info!(project_slug = %slug, task_slug = %task.slug, "task created");
    Ok((StatusCode::CREATED, Json(task.into())))
}

/// GET /projects/{slug}/tasks?page=&limit=
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    AuthExtractor(_ctx): AuthExtractor,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Paginated<TaskResponse>>> {
    let project = projects::locate_project(state.store.as_ref(), &slug).await?;
    let (page, limit) = params.resolve(
        state.config.default_page_limit,
        state.config.max_page_limit,
    );
    let (items, total) = tasks::list_tasks(state.store.as_ref(), &project, page, limit).await?;
    let items = items.into_iter().map(TaskResponse::from).collect();
    Ok(Json(Paginated::new(items, total, page, limit)))
}

/// GET /projects/{slug}/tasks/{taskSlug}
async fn get_task(
    State(state): State<Arc<AppState>>,
    AuthExtractor(_ctx): AuthExtractor,
    Path((slug, task_slug)): Path<(String, String)>,
) -> ApiResult<Json<TaskResponse>> {
    let (_, task) = tasks::locate_task(state.store.as_ref(), &slug, &task_slug).await?;
    Ok(Json(task.into()))
}

/// PUT /projects/{slug}/tasks/{taskSlug}
async fn update_task(
    State(state): State<Arc<AppState>>,
    AuthExtractor(ctx): AuthExtractor,
    Path((slug, task_slug)): Path<(String, String)>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task =
        tasks::update_task(state.store.as_ref(), ctx.user_id, &slug, &task_slug, &req).await?;
    Ok(Json(task.into()))
}

/// DELETE /projects/{slug}/tasks/{taskSlug}
async fn delete_task(
    State(state): State<Arc<AppState>>,
    AuthExtractor(ctx): AuthExtractor,
    Path((slug, task_slug)): Path<(String, String)>,
) -> ApiResult<Json<DeleteResponse>> {
    tasks::delete_task(state.store.as_ref(), ctx.user_id, &slug, &task_slug).await?;
    Ok(Json(DeleteResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
