//! Authentication Handlers Module
//!
//! This module contains the HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /users - User registration
//! - **`login`** - POST /login - User authentication
//! - **`get_me`** - GET /users/me - Get current user info
//!
//! # Authentication Flow
//!
//! 1. **Signup**: User provides username, email and password → User created → token returned
//! 2. **Login**: User provides username and password (form) → Credentials verified → token returned
//! 3. **Get Me**: User provides bearer token → Token and account checked → User info returned

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use login::login;
pub use me::get_me;
pub use signup::signup;
