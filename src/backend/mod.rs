//! Backend Module
//!
//! This module contains all server-side code for the Gallery API.
//! It provides an Axum HTTP server over a SQLite entity store, with
//! bcrypt password hashing and JWT bearer authentication.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Password hashing, token codec, credential verifier, auth guard
//! - **`middleware`** - Bearer-token middleware and the `AuthUser` extractor
//! - **`store`** - SQLite persistence for users, projects and images
//! - **`users`** / **`projects`** / **`images`** - Entity CRUD handlers
//! - **`error`** - Backend error types and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Config, state and initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication core and login handlers
//! ├── middleware/     - Request middleware
//! ├── store/          - Entity store
//! ├── users/          - User handlers
//! ├── projects/       - Project handlers
//! ├── images/         - Image handlers and file storage
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the database pool, the immutable token codec and
//! password hasher (behind `Arc`), and the image storage root. Nothing in it
//! is mutated after startup, so handlers share it without locks.
//!
//! # Error Handling
//!
//! - `BackendError` for everything a handler can fail with
//! - `AuthError` for authentication failures (always 401, except store errors)
//! - Errors render as `{"detail": ..., "status": ...}` JSON

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and credential handling
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// SQLite entity store
pub mod store;

/// User endpoints
pub mod users;

/// Project endpoints
pub mod projects;

/// Image endpoints and file storage
pub mod images;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState};
