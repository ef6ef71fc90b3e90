/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The SQLite connection pool
 * - The token codec and password hasher
 * - The image file store
 *
 * # Thread Safety
 *
 * Nothing in `AppState` is mutated after startup. The codec and hasher sit
 * behind `Arc`; the pool and image store are cheap handles. Handlers share
 * all of it without locks.
 *
 * # Example
 *
 * ```rust
 * use gallery::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let _pool = &state.db_pool;
 * }
 * ```
 */
use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenCodec;
use crate::backend::images::storage::ImageStorage;

/// Application state shared by every handler
#[derive(Clone, Debug)]
pub struct AppState {
    /// SQLite connection pool
    pub db_pool: SqlitePool,

    /// Signs and verifies bearer tokens
    pub tokens: Arc<TokenCodec>,

    /// bcrypt hasher at the configured cost
    pub passwords: Arc<PasswordHasher>,

    /// On-disk image bytes
    pub images: ImageStorage,

    /// Upload body cap
    pub max_upload_bytes: usize,
}

/// Allows handlers to extract `State<SqlitePool>` directly
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<TokenCodec> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<PasswordHasher> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.passwords.clone()
    }
}

impl FromRef<AppState> for ImageStorage {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.images.clone()
    }
}
