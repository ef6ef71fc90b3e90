/**
 * Image Metadata Model and Database Operations
 *
 * Only metadata lives in the database; bytes are kept on disk by
 * `backend::images::storage`, keyed by the image id.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::shared::ImageResponse;

/// Image row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq, Eq)]
pub struct Image {
    pub id: i64,
    /// Client-supplied file name, kept for display only
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub project_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Image> for ImageResponse {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            filename: image.filename,
            content_type: image.content_type,
            size_bytes: image.size_bytes,
            project_id: image.project_id,
            created_at: image.created_at,
        }
    }
}

const IMAGE_COLUMNS: &str = "id, filename, content_type, size_bytes, project_id, created_at";

/// Record a new image for a project
pub async fn create_image(
    pool: &SqlitePool,
    project_id: i64,
    filename: &str,
    content_type: &str,
    size_bytes: i64,
) -> Result<Image, sqlx::Error> {
    sqlx::query_as::<_, Image>(&format!(
        "INSERT INTO images (filename, content_type, size_bytes, project_id, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {IMAGE_COLUMNS}"
    ))
    .bind(filename)
    .bind(content_type)
    .bind(size_bytes)
    .bind(project_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// List every image ordered by id
pub async fn list_images(pool: &SqlitePool) -> Result<Vec<Image>, sqlx::Error> {
    sqlx::query_as::<_, Image>(&format!("SELECT {IMAGE_COLUMNS} FROM images ORDER BY id"))
        .fetch_all(pool)
        .await
}

/// Images attached to one project
pub async fn list_images_for_project(
    pool: &SqlitePool,
    project_id: i64,
) -> Result<Vec<Image>, sqlx::Error> {
    sqlx::query_as::<_, Image>(&format!(
        "SELECT {IMAGE_COLUMNS} FROM images WHERE project_id = ? ORDER BY id"
    ))
    .bind(project_id)
    .fetch_all(pool)
    .await
}

/// Images across all projects owned by a user
pub async fn list_images_for_owner(
    pool: &SqlitePool,
    owner_id: i64,
) -> Result<Vec<Image>, sqlx::Error> {
    sqlx::query_as::<_, Image>(
        "SELECT i.id, i.filename, i.content_type, i.size_bytes, i.project_id, i.created_at
         FROM images i JOIN projects p ON p.id = i.project_id
         WHERE p.owner_id = ?
         ORDER BY i.id",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Get image by ID
pub async fn get_image(pool: &SqlitePool, id: i64) -> Result<Option<Image>, sqlx::Error> {
    sqlx::query_as::<_, Image>(&format!("SELECT {IMAGE_COLUMNS} FROM images WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Delete an image row
///
/// # Returns
/// `true` if a row was deleted
pub async fn delete_image(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM images WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::store::projects::{create_project, delete_project};
    use crate::backend::store::test_support::{insert_user, memory_pool};

    #[tokio::test]
    async fn test_image_listing_scopes() {
        let pool = memory_pool().await;
        let alice = insert_user(&pool, "alice", "hash").await;
        let bob = insert_user(&pool, "bob", "hash").await;
        let trips = create_project(&pool, alice.id, "Trips", "").await.unwrap();
        let cars = create_project(&pool, bob.id, "Cars", "").await.unwrap();

        let beach = create_image(&pool, trips.id, "beach.png", "image/png", 10).await.unwrap();
        create_image(&pool, cars.id, "car.jpg", "image/jpeg", 20).await.unwrap();

        assert_eq!(list_images(&pool).await.unwrap().len(), 2);
        assert_eq!(list_images_for_project(&pool, trips.id).await.unwrap(), vec![beach.clone()]);
        assert_eq!(list_images_for_owner(&pool, alice.id).await.unwrap(), vec![beach]);
    }

    #[tokio::test]
    async fn test_project_delete_cascades_images() {
        let pool = memory_pool().await;
        let alice = insert_user(&pool, "alice", "hash").await;
        let trips = create_project(&pool, alice.id, "Trips", "").await.unwrap();
        let image = create_image(&pool, trips.id, "beach.png", "image/png", 10).await.unwrap();

        delete_project(&pool, trips.id).await.unwrap();
        assert!(get_image(&pool, image.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_image() {
        let pool = memory_pool().await;
        let alice = insert_user(&pool, "alice", "hash").await;
        let trips = create_project(&pool, alice.id, "Trips", "").await.unwrap();
        let image = create_image(&pool, trips.id, "beach.png", "image/png", 10).await.unwrap();

        assert!(delete_image(&pool, image.id).await.unwrap());
        assert!(!delete_image(&pool, image.id).await.unwrap());
    }
}
