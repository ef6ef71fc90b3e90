//! Authentication Module
//!
//! This module handles password hashing, bearer tokens, credential checks
//! and caller resolution, plus the HTTP handlers built on them.
//!
//! # Architecture
//!
//! - **`password`** - bcrypt hashing and verification
//! - **`sessions`** - JWT encoding and decoding (`TokenCodec`)
//! - **`credentials`** - username/password verification against the store
//! - **`guard`** - bearer token → authenticated identity
//! - **`handlers`** - signup, login and current-user endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - Password hasher
//! ├── sessions.rs     - Token codec
//! ├── credentials.rs  - Credential verifier
//! ├── guard.rs        - Auth guard and AuthError
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HMAC-signed JWTs with a pinned algorithm
//! - Every protected request re-checks that the user exists and is active
//! - Invalid credentials return 401 with no hint which part was wrong
//!
//! # Example
//!
//! ```rust,no_run
//! use gallery::backend::auth::{PasswordHasher, TokenCodec};
//! use gallery::backend::server::AuthConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AuthConfig::with_secret(std::env::var("JWT_SECRET")?);
//! let codec = TokenCodec::new(&config)?;
//! let hasher = PasswordHasher::new(config.bcrypt_cost)?;
//!
//! let digest = hasher.hash("password123")?;
//! assert!(hasher.verify("password123", &digest));
//! let token = codec.issue_access_token(1, "alice")?;
//! assert_eq!(codec.decode(&token)?.subject(), Some("alice"));
//! # Ok(())
//! # }
//! ```

/// Password hashing
pub mod password;

/// Token encoding and decoding
pub mod sessions;

/// Credential verification
pub mod credentials;

/// Caller resolution for protected routes
pub mod guard;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use credentials::{authenticate, UserIdentity};
pub use guard::{AuthError, AuthenticatedIdentity};
pub use handlers::{get_me, login, signup};
pub use password::{PasswordError, PasswordHasher};
pub use sessions::{ClaimMap, TokenClaims, TokenCodec, TokenError};
