//! Project route handlers.
//!
//! Paths address projects by slug, never by id. The service layer owns slug
//! resolution and ownership checks; handlers only translate HTTP.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::ApiResult;
use crate::middleware::AuthExtractor;
use crate::services::projects;
use crate::state::AppState;
use crate::types::{
    CreateProjectRequest, DeleteResponse, PageParams, Paginated, ProjectResponse,
    UpdateProjectRequest,
};

/// Routes mounted under `/projects`.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:slug",
            get(get_project).put(update_project).delete(delete_project),
        )
        .with_state(state)
}

/// POST /projects
async fn create_project(
    State(state): State<Arc<AppState>>,
    AuthExtractor(ctx): AuthExtractor,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let project = projects::create_project(state.store.as_ref(), ctx.user_id, &req).await?;
    tracing::info!(slug = %project.slug, "project created");
    Ok((StatusCode::CREATED, Json(project.into())))
}

/// GET /projects?page=&limit=
async fn list_projects(
    State(state): State<Arc<AppState>>,
    AuthExtractor(ctx): AuthExtractor,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Paginated<ProjectResponse>>> {
    let (page, limit) = params.resolve(
        state.config.default_page_limit,
        state.config.max_page_limit,
    );
    let (items, total) =
        projects::list_projects(state.store.as_ref(), ctx.user_id, page, limit).await?;
    let items = items.into_iter().map(ProjectResponse::from).collect();
    Ok(Json(Paginated::new(items, total, page, limit)))
}

/// GET /projects/{slug}
async fn get_project(
    State(state): State<Arc<AppState>>,
    AuthExtractor(_ctx): AuthExtractor,
    Path(slug): Path<String>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = projects::locate_project(state.store.as_ref(), &slug).await?;
    Ok(Json(project.into()))
}

/// PUT /projects/{slug}
async fn update_project(
    State(state): State<Arc<AppState>>,
    AuthExtractor(ctx): AuthExtractor,
    Path(slug): Path<String>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let project =
        projects::update_project(state.store.as_ref(), ctx.user_id, &slug, &req).await?;
    Ok(Json(project.into()))
}

/// DELETE /projects/{slug}
async fn delete_project(
    State(state): State<Arc<AppState>>,
    AuthExtractor(ctx): AuthExtractor,
    Path(slug): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    projects::delete_project(state.store.as_ref(), ctx.user_id, &slug).await?;
    Ok(Json(DeleteResponse {
        message: "Project deleted successfully".to_string(),
    }))
}
