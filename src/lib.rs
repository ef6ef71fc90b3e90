//! Gallery - Main Library
//!
//! Gallery is a REST backend for users, their projects, and the images
//! uploaded into those projects. It is built on Axum and SQLite (via sqlx),
//! with bcrypt password hashing and JWT bearer authentication.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Wire types shared with API clients
//!   - Request and response bodies for users, projects and images
//!   - Input validation errors
//!
//! - **`backend`** - Server-side code
//!   - Axum router, handlers and middleware
//!   - Authentication (password hashing, token codec, auth guard)
//!   - Entity store over SQLite
//!   - Image file storage
//!
//! # Usage
//!
//! ```rust,no_run
//! use gallery::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations
//! - Custom error types in `shared::error` and `backend::error`
//! - Every HTTP error renders as `{"detail": ..., "status": ...}`

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
