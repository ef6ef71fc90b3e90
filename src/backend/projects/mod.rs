//! Projects Module
//!
//! HTTP handlers for creating, reading, updating and deleting projects.

pub mod handlers;

pub use handlers::{create_project_for_user, delete_project, get_project, update_project};
