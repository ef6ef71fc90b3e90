//! Project HTTP Handlers
//!
//! Projects belong to one user. Reads are public; creating, updating and
//! deleting require the owner or a superuser.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::store::{images, projects, users, Project};
use crate::shared::{CreateProjectRequest, ProjectResponse, UpdateProjectRequest};

pub(crate) async fn find_project(pool: &SqlitePool, project_id: i64) -> Result<Project, BackendError> {
    projects::get_project(pool, project_id).await?.ok_or_else(|| {
        tracing::warn!("Project with id {} not found", project_id);
        BackendError::NotFound("Project")
    })
}

/// Create a project owned by the user in the path
pub async fn create_project_for_user(
    State(pool): State<SqlitePool>,
    caller: AuthUser,
    Path(user_id): Path<i64>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), BackendError> {
    if users::get_user_by_id(&pool, user_id).await?.is_none() {
        tracing::warn!("User with id {} not found", user_id);
        return Err(BackendError::NotFound("User"));
    }
    caller.require_owner(user_id)?;
    request.validate()?;

    let project =
        projects::create_project(&pool, user_id, request.title.trim(), &request.description).await?;

    tracing::info!("Project with id {} created by user {}", project.id, user_id);
    Ok((StatusCode::CREATED, Json(project.into())))
}

/// Get one project
pub async fn get_project(
    State(pool): State<SqlitePool>,
    Path(project_id): Path<i64>,
) -> Result<Json<ProjectResponse>, BackendError> {
    let project = find_project(&pool, project_id).await?;
    Ok(Json(project.into()))
}

/// Partially update a project's title and/or description
pub async fn update_project(
    State(pool): State<SqlitePool>,
    caller: AuthUser,
    Path(project_id): Path<i64>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, BackendError> {
    let project = find_project(&pool, project_id).await?;
    caller.require_owner(project.owner_id)?;
    request.validate()?;

    let updated = projects::update_project(
        &pool,
        project_id,
        request.title.as_deref().map(str::trim),
        request.description.as_deref(),
    )
    .await?
    .ok_or(BackendError::NotFound("Project"))?;

    tracing::info!("Project with id {} updated", project_id);
    Ok(Json(updated.into()))
}

/// Delete a project with its images; responds with the deleted project
pub async fn delete_project(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(project_id): Path<i64>,
) -> Result<Json<ProjectResponse>, BackendError> {
    let project = find_project(&state.db_pool, project_id).await?;
    caller.require_owner(project.owner_id)?;

    let image_ids: Vec<i64> = images::list_images_for_project(&state.db_pool, project_id)
        .await?
        .into_iter()
        .map(|image| image.id)
        .collect();

    let deleted = projects::delete_project(&state.db_pool, project_id)
        .await?
        .ok_or(BackendError::NotFound("Project"))?;
    state.images.remove_all(image_ids).await;

    tracing::info!("Project with id {} deleted", project_id);
    Ok(Json(deleted.into()))
}
