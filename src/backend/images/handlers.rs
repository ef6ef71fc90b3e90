//! Image HTTP Handlers
//!
//! Images are uploaded into a project as multipart form data (field
//! `image`). Metadata goes to the database, bytes to [`ImageStorage`].
//!
//! [`ImageStorage`]: crate::backend::images::storage::ImageStorage

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::projects::handlers::find_project;
use crate::backend::server::state::AppState;
use crate::backend::store::{images, Image};
use crate::shared::{DetailResponse, ImageResponse};

/// Multipart field carrying the file
pub const IMAGE_FIELD: &str = "image";

/// Declared content types an upload may carry. SVG is excluded because
/// it can embed script.
fn is_allowed_image_type(essence: &str) -> bool {
    essence
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty() && !subtype.starts_with("svg"))
}

/// `image/PNG; charset=x` -> `image/png`
fn content_type_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

async fn find_image(pool: &SqlitePool, image_id: i64) -> Result<Image, BackendError> {
    images::get_image(pool, image_id).await?.ok_or_else(|| {
        tracing::warn!("Image with id {} not found", image_id);
        BackendError::NotFound("Image")
    })
}

/// An uploaded file pulled out of the multipart body
struct Upload {
    filename: String,
    content_type: String,
    bytes: bytes::Bytes,
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, BackendError> {
    let multipart_error = |e: axum::extract::multipart::MultipartError| {
        tracing::warn!("Rejected multipart body: {}", e);
        BackendError::handler(e.status(), e.body_text())
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = content_type_essence(field.content_type().unwrap_or_default());
        if !is_allowed_image_type(&content_type) {
            tracing::warn!("Rejected upload {} with content type {:?}", filename, content_type);
            return Err(BackendError::handler(
                StatusCode::BAD_REQUEST,
                "Uploaded file must be an image",
            ));
        }
        let bytes = field.bytes().await.map_err(multipart_error)?;

        if bytes.is_empty() {
            return Err(BackendError::handler(StatusCode::BAD_REQUEST, "Image file is empty"));
        }

        return Ok(Upload {
            filename,
            content_type,
            bytes,
        });
    }

    Err(BackendError::handler(
        StatusCode::BAD_REQUEST,
        format!("Missing `{IMAGE_FIELD}` file field"),
    ))
}

/// Upload an image into a project
pub async fn upload_image(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(project_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ImageResponse>), BackendError> {
    let project = find_project(&state.db_pool, project_id).await?;
    caller.require_owner(project.owner_id)?;

    let upload = read_upload(&mut multipart).await?;
    let size_bytes = i64::try_from(upload.bytes.len())
        .map_err(|_| BackendError::handler(StatusCode::PAYLOAD_TOO_LARGE, "Image is too large"))?;

    let image = images::create_image(
        &state.db_pool,
        project_id,
        &upload.filename,
        &upload.content_type,
        size_bytes,
    )
    .await?;

    if let Err(e) = state.images.save(image.id, &upload.bytes).await {
        tracing::error!("Failed to write image file {}: {:?}", image.id, e);
        if let Err(cleanup) = images::delete_image(&state.db_pool, image.id).await {
            tracing::error!("Failed to remove orphaned image row {}: {:?}", image.id, cleanup);
        }
        return Err(BackendError::Storage(e));
    }

    tracing::info!("Image {} created for project {}", image.id, project_id);
    Ok((StatusCode::CREATED, Json(image.into())))
}

/// List every image
pub async fn list_images(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<ImageResponse>>, BackendError> {
    let images = images::list_images(&pool).await?;
    tracing::info!("Retrieved all images. Count: {}", images.len());
    Ok(Json(images.into_iter().map(ImageResponse::from).collect()))
}

/// Images in one project
pub async fn list_project_images(
    State(pool): State<SqlitePool>,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<ImageResponse>>, BackendError> {
    find_project(&pool, project_id).await?;
    let images = images::list_images_for_project(&pool, project_id).await?;
    Ok(Json(images.into_iter().map(ImageResponse::from).collect()))
}

/// Image metadata
pub async fn get_image(
    State(pool): State<SqlitePool>,
    Path(image_id): Path<i64>,
) -> Result<Json<ImageResponse>, BackendError> {
    let image = find_image(&pool, image_id).await?;
    Ok(Json(image.into()))
}

/// Raw image bytes, served with the content type recorded at upload
pub async fn get_image_file(
    State(state): State<AppState>,
    Path(image_id): Path<i64>,
) -> Result<Response, BackendError> {
    let image = find_image(&state.db_pool, image_id).await?;

    let bytes = match state.images.load(image.id).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Image {} has no file on disk", image.id);
            return Err(BackendError::NotFound("Image"));
        }
        Err(e) => return Err(e.into()),
    };

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
        ],
        bytes,
    )
        .into_response())
}

/// Delete an image and its file
pub async fn delete_image(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(image_id): Path<i64>,
) -> Result<Json<DetailResponse>, BackendError> {
    let image = find_image(&state.db_pool, image_id).await?;
    let project = find_project(&state.db_pool, image.project_id).await?;
    caller.require_owner(project.owner_id)?;

    if !images::delete_image(&state.db_pool, image_id).await? {
        return Err(BackendError::NotFound("Image"));
    }
    if let Err(e) = state.images.remove(image_id).await {
        tracing::error!("Failed to remove image file {}: {:?}", image_id, e);
    }

    tracing::info!("Image {} deleted", image_id);
    Ok(Json(DetailResponse::new("Image deleted successfully")))
}
