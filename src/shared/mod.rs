//! Shared Module
//!
//! This module contains the request and response bodies exchanged with API
//! clients. Everything here is plain serde data with no server dependencies,
//! so a client crate can depend on it directly.
//!
//! # Overview
//!
//! - **`users`** - signup, update, token and summary bodies
//! - **`projects`** - project create/update bodies and project view
//! - **`images`** - image metadata view
//! - **`error`** - input validation errors

/// User request/response types
pub mod users;

/// Project request/response types
pub mod projects;

/// Image response types
pub mod images;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use images::ImageResponse;
pub use projects::{CreateProjectRequest, ProjectResponse, UpdateProjectRequest};
pub use users::{
    CreateUserRequest, DetailResponse, LoginForm, TokenResponse, UpdateUserRequest,
    UserResponse, UserSummary, UserWithToken,
};
