/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Build the password hasher and token codec from the auth settings
 * 2. Open the database pool and apply migrations
 * 3. Create the image directory
 * 4. Create and configure the router
 *
 * Any failure aborts startup. There is no degraded mode without a database
 * or without a signing secret.
 */
use std::sync::Arc;

use axum::Router;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenCodec;
use crate::backend::error::StartupError;
use crate::backend::images::storage::ImageStorage;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::store;

/// Build the shared application state from `config`
pub async fn build_state(config: &ServerConfig) -> Result<AppState, StartupError> {
    let tokens = TokenCodec::new(&config.auth)?;
    let passwords = PasswordHasher::new(config.auth.bcrypt_cost)?;
    tracing::info!(
        "Auth configured: {:?}, tokens valid for {} minutes, bcrypt cost {}",
        tokens.algorithm(),
        config.auth.access_token_ttl_minutes,
        passwords.cost()
    );

    let db_pool = store::connect(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to connect to database: {:?}", e);
        e
    })?;
    store::run_migrations(&db_pool).await.map_err(|e| {
        tracing::error!("Failed to run migrations: {:?}", e);
        e
    })?;
    tracing::info!("Database ready");

    let images = ImageStorage::new(&config.image_dir);
    images.ensure_root().await.map_err(|e| {
        tracing::error!("Failed to create image directory {}: {:?}", config.image_dir.display(), e);
        e
    })?;

    Ok(AppState {
        db_pool,
        tokens: Arc::new(tokens),
        passwords: Arc::new(passwords),
        images,
        max_upload_bytes: config.max_upload_bytes,
    })
}

/// Create and configure the Axum application
///
/// # Errors
///
/// Returns `StartupError` if the auth settings are unusable, the database
/// cannot be opened or migrated, or the image directory cannot be created.
pub async fn create_app(config: &ServerConfig) -> Result<Router, StartupError> {
    tracing::info!("Initializing Gallery backend server");

    let state = build_state(config).await?;
    let app = create_router(state);

    tracing::info!("Router configured");
    Ok(app)
}
