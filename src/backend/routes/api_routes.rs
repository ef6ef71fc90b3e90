/**
 * API Route Handlers
 *
 * This module defines the routes of the REST API.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /users` - User registration
 * - `POST /login` - User login (form-encoded)
 * - `GET /users/me` - Current user (requires authentication)
 *
 * ## Users
 * - `GET /users`, `GET /users/{id}`
 * - `PUT /users/{id}`, `DELETE /users/{id}`, `POST /users/{id}/deactivate` (owner)
 * - `GET /users/{id}/projects`, `GET /users/{id}/project_count`, `GET /users/{id}/summary`
 *
 * ## Projects
 * - `POST /users/{id}/projects` (owner)
 * - `GET /projects/{id}`
 * - `PUT /projects/{id}`, `DELETE /projects/{id}` (owner)
 *
 * ## Images
 * - `GET /images`, `GET /images/{id}`, `GET /images/{id}/file`
 * - `GET /projects/{id}/images`
 * - `POST /projects/{id}/images` (owner, multipart)
 * - `DELETE /images/{id}` (owner)
 */
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, login, signup};
use crate::backend::images::{
    delete_image, get_image, get_image_file, list_images, list_project_images, upload_image,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::projects::{create_project_for_user, delete_project, get_project, update_project};
use crate::backend::server::state::AppState;
use crate::backend::users::{
    deactivate_user, delete_user, get_user, list_user_projects, list_users, project_count,
    update_user, user_summary,
};

/// Configure API routes
///
/// # Authentication
///
/// `/users/me` runs behind `auth_middleware`. The other protected handlers
/// take an `AuthUser` argument, which runs the same guard, so public and
/// protected methods can share a path.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/login", post(login))
        .route(
            "/users/me",
            get(get_me).route_layer(middleware::from_fn_with_state(
                app_state.clone(),
                auth_middleware,
            )),
        )
        // User endpoints
        .route("/users", get(list_users).post(signup))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/{user_id}/deactivate", post(deactivate_user))
        .route(
            "/users/{user_id}/projects",
            get(list_user_projects).post(create_project_for_user),
        )
        .route("/users/{user_id}/project_count", get(project_count))
        .route("/users/{user_id}/summary", get(user_summary))
        // Project endpoints
        .route(
            "/projects/{project_id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route(
            "/projects/{project_id}/images",
            get(list_project_images).post(upload_image),
        )
        // Image endpoints
        .route("/images", get(list_images))
        .route("/images/{image_id}", get(get_image).delete(delete_image))
        .route("/images/{image_id}/file", get(get_image_file))
}
