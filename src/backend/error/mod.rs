//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `BackendError` - request-level failures, rendered as JSON
//! - `StartupError` - configuration, database and storage failures at boot
//!
//! # Example
//!
//! ```rust,no_run
//! use gallery::backend::error::BackendError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<i64>, BackendError> {
//!     Err(BackendError::NotFound("User"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{BackendError, StartupError};
