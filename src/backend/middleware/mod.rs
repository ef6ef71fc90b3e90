//! Middleware Module
//!
//! This module contains HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! - **`auth`** - Bearer-token authentication and the `AuthUser` extractor
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use gallery::backend::middleware::auth_middleware;
//! use gallery::backend::AppState;
//!
//! fn protect(state: AppState) -> Router<AppState> {
//!     Router::new()
//!         .route("/users/me", get(|| async { "me" }))
//!         .route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser};
