/**
 * User Model and Database Operations
 *
 * This module handles user rows and the queries over them.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::shared::{UserResponse, UserSummary};

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Disabled accounts cannot log in or use existing tokens
    pub is_active: bool,
    /// Superusers pass every ownership check
    pub is_superuser: bool,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
        }
    }
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, is_active, is_superuser, created_at, updated_at";

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's chosen username
/// * `email` - User email
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error (unique violations surface as `sqlx::Error::Database`)
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, email, password_hash, is_active, is_superuser, created_at, updated_at)
         VALUES (?, ?, ?, 1, 0, ?, ?)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// List every user ordered by id
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
        .fetch_all(pool)
        .await
}

/// Get user by exact username
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Update username and/or email; `None` keeps the stored value
///
/// # Returns
/// Updated user, or None if no such user
pub async fn update_user(
    pool: &SqlitePool,
    id: i64,
    username: Option<&str>,
    email: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users
         SET username = COALESCE(?, username), email = COALESCE(?, email), updated_at = ?
         WHERE id = ?
         RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(email)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Enable or disable an account
pub async fn set_user_active(
    pool: &SqlitePool,
    id: i64,
    is_active: bool,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET is_active = ?, updated_at = ? WHERE id = ? RETURNING {USER_COLUMNS}"
    ))
    .bind(is_active)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Grant or revoke superuser rights. There is no HTTP route for this; it is
/// an operator action.
pub async fn set_user_superuser(
    pool: &SqlitePool,
    id: i64,
    is_superuser: bool,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET is_superuser = ?, updated_at = ? WHERE id = ? RETURNING {USER_COLUMNS}"
    ))
    .bind(is_superuser)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete a user. Projects and images go with it (ON DELETE CASCADE).
///
/// # Returns
/// `true` if a row was deleted
pub async fn delete_user(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Number of projects owned by a user
pub async fn count_projects(pool: &SqlitePool, user_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE owner_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Project and image counts for a user
pub async fn user_summary(pool: &SqlitePool, user_id: i64) -> Result<UserSummary, sqlx::Error> {
    let (project_count, image_count) = sqlx::query_as::<_, (i64, i64)>(
        "SELECT
            (SELECT COUNT(*) FROM projects WHERE owner_id = ?),
            (SELECT COUNT(*) FROM images i JOIN projects p ON p.id = i.project_id WHERE p.owner_id = ?)",
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(UserSummary {
        user_id,
        project_count,
        image_count,
    })
}
