//! User HTTP Handlers
//!
//! Read endpoints are public. Mutations require the caller to be the user
//! in the path or a superuser.

use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::store::{images, is_unique_violation, projects, users, User};
use crate::shared::{DetailResponse, ProjectResponse, UpdateUserRequest, UserResponse, UserSummary};

async fn find_user(pool: &SqlitePool, user_id: i64) -> Result<User, BackendError> {
    users::get_user_by_id(pool, user_id).await?.ok_or_else(|| {
        tracing::warn!("User with id {} not found", user_id);
        BackendError::NotFound("User")
    })
}

/// List all users
pub async fn list_users(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<UserResponse>>, BackendError> {
    let users = users::list_users(&pool).await?;
    tracing::info!("Retrieved all users. Count: {}", users.len());
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get one user
pub async fn get_user(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, BackendError> {
    let user = find_user(&pool, user_id).await?;
    Ok(Json(user.into()))
}

/// Partially update a user's username and/or email
pub async fn update_user(
    State(pool): State<SqlitePool>,
    caller: AuthUser,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, BackendError> {
    find_user(&pool, user_id).await?;
    caller.require_owner(user_id)?;
    request.validate()?;

    let user = users::update_user(
        &pool,
        user_id,
        request.username.as_deref(),
        request.email.as_deref(),
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            BackendError::Conflict("Username or email already registered".to_string())
        } else {
            BackendError::Database(e)
        }
    })?
    .ok_or(BackendError::NotFound("User"))?;

    tracing::info!("Updated user {} ({})", user.id, user.username);
    Ok(Json(user.into()))
}

/// Delete a user along with their projects, images and image files
pub async fn delete_user(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<DetailResponse>, BackendError> {
    find_user(&state.db_pool, user_id).await?;
    caller.require_owner(user_id)?;

    let image_ids: Vec<i64> = images::list_images_for_owner(&state.db_pool, user_id)
        .await?
        .into_iter()
        .map(|image| image.id)
        .collect();

    if !users::delete_user(&state.db_pool, user_id).await? {
        return Err(BackendError::NotFound("User"));
    }
    state.images.remove_all(image_ids).await;

    tracing::info!("Deleted user {}", user_id);
    Ok(Json(DetailResponse::new("User deleted successfully")))
}

/// Disable an account. Its tokens stop working on the next request.
pub async fn deactivate_user(
    State(pool): State<SqlitePool>,
    caller: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, BackendError> {
    find_user(&pool, user_id).await?;
    caller.require_owner(user_id)?;

    let user = users::set_user_active(&pool, user_id, false)
        .await?
        .ok_or(BackendError::NotFound("User"))?;

    tracing::info!("Deactivated user {}", user_id);
    Ok(Json(user.into()))
}

/// Projects owned by a user
pub async fn list_user_projects(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ProjectResponse>>, BackendError> {
    find_user(&pool, user_id).await?;
    let projects = projects::list_projects_for_owner(&pool, user_id).await?;
    tracing::info!("Retrieved projects of user {}", user_id);
    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

/// Number of projects owned by a user, as a bare integer
pub async fn project_count(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<i64>,
) -> Result<Json<i64>, BackendError> {
    find_user(&pool, user_id).await?;
    let count = users::count_projects(&pool, user_id).await?;
    Ok(Json(count))
}

/// Project and image counts for a user
pub async fn user_summary(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserSummary>, BackendError> {
    find_user(&pool, user_id).await?;
    Ok(Json(users::user_summary(&pool, user_id).await?))
}
