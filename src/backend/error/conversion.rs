/**
 * Error Conversion
 *
 * This module provides the `IntoResponse` implementation for backend
 * errors, allowing them to be returned directly from handlers.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "detail": "Error message",
 *   "status": 404
 * }
 * ```
 *
 * 401 responses also carry `WWW-Authenticate: Bearer`.
 */
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, self);
        } else {
            tracing::warn!("Request rejected with {}: {}", status, self);
        }

        let body = serde_json::json!({
            "detail": message,
            "status": status.as_u16(),
        });

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
