//! Routes Module
//!
//! This module configures all HTTP routes for the server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports and documentation
//! ├── router.rs      - Router assembly, layers and fallback
//! └── api_routes.rs  - REST API routes
//! ```

/// Main router creation
pub mod router;

/// REST API routes
pub mod api_routes;

pub use router::create_router;
