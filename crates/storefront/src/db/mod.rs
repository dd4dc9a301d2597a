//! Database operations for the storefront `SQLite` database.
//!
//! ## Tables
//!
//! - `users` - Accounts, credentials, loyalty points
//! - `categories` / `products` - The digital-goods catalog
//! - `reviews` - One review per user per product
//! - `orders` / `order_details` - Purchase bookkeeping
//! - `discounts` - Discount codes with validity windows and usage limits
//! - `tower_sessions` - Session storage (created by the session store)
//!
//! Migrations live in `crates/storefront/migrations/` and run on startup,
//! or explicitly via `cargo run -p byteshelf-cli -- migrate`.

pub mod catalog;
pub mod discounts;
pub mod orders;
pub mod reviews;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness or state conflict, such as a duplicate email.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The requested row does not exist.
    #[error("Not found")]
    NotFound,

    /// The input failed a domain check before reaching the database.
    #[error("Invalid: {0}")]
    Invalid(String),

    /// A stored value could not be interpreted.
    #[error("Data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the embedded migrations against the given pool.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
