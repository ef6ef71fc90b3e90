/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /users/me, which returns
 * the currently authenticated user.
 *
 * The route sits behind `auth_middleware`; the identity arrives through
 * the `AuthUser` extractor.
 */
use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::users::get_user_by_id;
use crate::shared::UserResponse;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the token is missing or invalid, or the user is gone or disabled
/// * `500 Internal Server Error` - If the database query fails
///
/// # Example Response
///
/// ```json
/// {
///   "id": 1,
///   "username": "alice",
///   "email": "alice@example.com",
///   "is_active": true
/// }
/// ```
pub async fn get_me(
    State(pool): State<SqlitePool>,
    AuthUser(identity): AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let user = get_user_by_id(&pool, identity.user_id)
        .await?
        .ok_or(BackendError::NotFound("User"))?;

    Ok(Json(user.into()))
}
