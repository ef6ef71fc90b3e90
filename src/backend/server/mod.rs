//! Server Module
//!
//! This module contains the code that configures and assembles the Axum
//! HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Configuration loading and validation
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - ServerConfig / AuthConfig loading
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: defaults, TOML file, environment
//! 2. **State Creation**: token codec, password hasher, database pool, image store
//! 3. **Router Creation**: routes, auth middleware, tracing and body limits
//!
//! # Example
//!
//! ```rust,no_run
//! use gallery::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{AuthConfig, ServerConfig};
pub use init::{build_state, create_app};
pub use state::AppState;

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::path::Path;

    /// State over a fresh in-memory database and `image_dir`, with the
    /// cheapest bcrypt cost
    pub async fn test_state(image_dir: &Path) -> AppState {
        let mut auth = AuthConfig::with_secret("unit-test-secret-0123456789abcdefgh");
        auth.bcrypt_cost = 4;
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            database_url: "sqlite::memory:".to_string(),
            image_dir: image_dir.to_path_buf(),
            max_upload_bytes: 64 * 1024,
            auth,
        };
        build_state(&config).await.unwrap()
    }
}
