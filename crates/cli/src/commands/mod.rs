//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::SqlitePool;

use byteshelf_storefront::config::DEFAULT_DATABASE_URL;
use byteshelf_storefront::db;

/// Connect to the storefront database named by `DATABASE_URL`.
pub(crate) async fn connect() -> Result<SqlitePool, sqlx::Error> {
    dotenvy::dotenv().ok();

    let database_url = SecretString::from(
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
    );

    db::create_pool(&database_url).await
}
