//! Shared Error Types
//!
//! Errors raised while validating client input. They carry the offending
//! field so the backend can report it in the response detail.
//!
//! # Usage
//!
//! ```rust
//! use gallery::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Invalid email format");
//! assert_eq!(error.to_string(), "Invalid email format");
//! ```
use thiserror::Error;

/// Shared error types that can occur while handling client input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the field that failed validation
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}
