//! Users Module
//!
//! HTTP handlers for user listing, lookup, update, deactivation, deletion
//! and per-user project statistics. Registration and login live in
//! `backend::auth`.

pub mod handlers;

pub use handlers::*;
