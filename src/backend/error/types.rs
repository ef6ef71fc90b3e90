/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Types
 *
 * - `BackendError` - anything a request handler can fail with
 * - `StartupError` - anything that stops the server from starting
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - Authentication failures (401, via `AuthError`)
 * - Ownership failures (403)
 * - Missing entities (404)
 * - Duplicate usernames or emails (409)
 * - Input validation (400)
 *
 * ## Server Errors
 *
 * Database, file storage and hashing failures are 500s. Their details are
 * logged but never sent to the client.
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::guard::AuthError;
use crate::backend::auth::password::PasswordError;
use crate::backend::auth::sessions::TokenError;
use crate::backend::server::config::ConfigError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// Each variant can be converted to an HTTP response.
///
/// # Usage
///
/// ```rust
/// use gallery::backend::error::BackendError;
///
/// let err = BackendError::NotFound("Project");
/// assert_eq!(err.message(), "Project not found");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Authentication failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Entity does not exist; carries the entity name
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Authenticated, but not the owner (and not a superuser)
    #[error("Not enough permissions")]
    Forbidden,

    /// Unique constraint violated
    #[error("{0}")]
    Conflict(String),

    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Input validation error
    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Image file could not be written, read or removed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Example
    ///
    /// ```rust
    /// use gallery::backend::error::BackendError;
    /// use axum::http::StatusCode;
    ///
    /// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Missing image field");
    /// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    /// ```
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Auth` - 401 (500 if the user store failed)
    /// - `NotFound` - 404
    /// - `Forbidden` - 403
    /// - `Conflict` - 409
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400
    /// - `Password` - 400 for unencodable input, otherwise 500
    /// - everything else - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(err) => err.status_code(),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Password(PasswordError::Encoding(_)) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Storage(_) | Self::Password(_) | Self::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the client-facing message
    ///
    /// Server-side failures collapse to a generic message.
    pub fn message(&self) -> String {
        match self {
            Self::Auth(err) => err.detail().to_string(),
            Self::NotFound(_) | Self::Forbidden | Self::Conflict(_) | Self::SharedError(_) => {
                self.to_string()
            }
            Self::HandlerError { message, .. } => message.clone(),
            Self::Password(PasswordError::Encoding(reason)) => format!("Password cannot be used: {reason}"),
            Self::Database(_) | Self::Storage(_) | Self::Password(_) | Self::Token(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

/// Errors that abort server startup
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("password hasher error: {0}")]
    Password(#[from] PasswordError),

    #[error("image directory error: {0}")]
    Storage(#[from] std::io::Error),
}
