//! Entity Store Module
//!
//! SQLite persistence for users, projects and images, built on a `sqlx`
//! connection pool. Each submodule exposes free async functions taking a
//! `&SqlitePool`; connections are borrowed per query and returned to the
//! pool when the query future completes or is dropped.
//!
//! The authentication core does not depend on SQLite directly. It talks to
//! the [`UserStore`] trait, which this module implements for `SqlitePool`.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - Pool setup, migrations, UserStore contract
//! ├── users.rs    - User model and queries
//! ├── projects.rs - Project model and queries
//! └── images.rs   - Image metadata model and queries
//! ```

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// User model and database operations
pub mod users;

/// Project model and database operations
pub mod projects;

/// Image metadata model and database operations
pub mod images;

pub use images::Image;
pub use projects::Project;
pub use users::User;

/// Lookup contract the authentication core needs from persistence.
///
/// Implementations return `Ok(None)` for a missing user and reserve `Err`
/// for the store itself failing.
pub trait UserStore: Send + Sync {
    fn find_user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, sqlx::Error>> + Send;

    fn find_user_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<User>, sqlx::Error>> + Send;
}

impl UserStore for SqlitePool {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        users::get_user_by_username(self, username).await
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        users::get_user_by_id(self, id).await
    }
}

/// Open a connection pool for `database_url`.
///
/// The database file is created if missing. An in-memory database lives
/// only as long as its connection, so it gets a single connection that is
/// never recycled.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    };

    pool_options.connect_with(options).await
}

/// Apply the embedded migrations in `migrations/`
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// `true` when `err` is a UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Fresh migrated in-memory database
    pub async fn memory_pool() -> SqlitePool {
        let pool = connect("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    /// Insert a user with a precomputed (not necessarily valid) hash
    pub async fn insert_user(pool: &SqlitePool, username: &str, password_hash: &str) -> User {
        users::create_user(
            pool,
            username,
            &format!("{username}@example.com"),
            password_hash,
        )
        .await
        .unwrap()
    }
}
