//! Database migration command.

use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Run the storefront migrations against `DATABASE_URL`.
///
/// # Errors
///
/// Returns `MigrateError` if the connection or a migration fails.
pub async fn run() -> Result<(), MigrateError> {
    let pool = super::connect().await?;

    tracing::info!("Running storefront migrations...");
    byteshelf_storefront::db::run_migrations(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}
