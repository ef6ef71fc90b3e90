/**
 * Project Model and Database Operations
 */
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::shared::ProjectResponse;

/// Project row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Owning user; projects are deleted with their owner
    pub owner_id: i64,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            owner_id: project.owner_id,
        }
    }
}

/// Create a project owned by `owner_id`
pub async fn create_project(
    pool: &SqlitePool,
    owner_id: i64,
    title: &str,
    description: &str,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "INSERT INTO projects (title, description, owner_id)
         VALUES (?, ?, ?)
         RETURNING id, title, description, owner_id",
    )
    .bind(title)
    .bind(description)
    .bind(owner_id)
    .fetch_one(pool)
    .await
}

/// Get project by ID
pub async fn get_project(pool: &SqlitePool, id: i64) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT id, title, description, owner_id FROM projects WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Projects owned by a user, oldest first
pub async fn list_projects_for_owner(
    pool: &SqlitePool,
    owner_id: i64,
) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT id, title, description, owner_id FROM projects WHERE owner_id = ? ORDER BY id",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Update title and/or description; `None` keeps the stored value
pub async fn update_project(
    pool: &SqlitePool,
    id: i64,
    title: Option<&str>,
    description: Option<&str>,
) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "UPDATE projects
         SET title = COALESCE(?, title), description = COALESCE(?, description)
         WHERE id = ?
         RETURNING id, title, description, owner_id",
    )
    .bind(title)
    .bind(description)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete a project and (by cascade) its image rows
///
/// # Returns
/// The deleted project, or None if it did not exist
pub async fn delete_project(pool: &SqlitePool, id: i64) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "DELETE FROM projects WHERE id = ? RETURNING id, title, description, owner_id",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
