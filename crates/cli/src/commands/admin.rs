//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! bs-cli admin create -e admin@example.com -u admin -p "a strong password"
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `SQLite` connection string for the storefront database

use thiserror::Error;

use byteshelf_core::{Email, UserId};
use byteshelf_storefront::db::RepositoryError;
use byteshelf_storefront::db::users::UserRepository;
use byteshelf_storefront::models::user::NewUser;
use byteshelf_storefront::services::auth::{AuthError, hash_password};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// User already exists.
    #[error("A user already exists with email or username: {0}")]
    UserExists(String),

    /// Password hashing failed.
    #[error("Password hashing error: {0}")]
    Hash(String),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create a new admin user.
///
/// # Returns
///
/// The ID of the created admin user.
///
/// # Errors
///
/// Returns `AdminError` if the email is invalid, the user already
/// exists, or the database operation fails.
pub async fn create_user(email: &str, username: &str, password: &str) -> Result<UserId, AdminError> {
    let email = Email::parse(email).map_err(|e| AdminError::InvalidEmail(e.to_string()))?;

    let password_hash = match hash_password(password) {
        Ok(hash) => hash,
        Err(AuthError::PasswordHash(msg)) => return Err(AdminError::Hash(msg)),
        Err(e) => return Err(AdminError::Hash(e.to_string())),
    };

    let pool = super::connect().await?;
    let users = UserRepository::new(&pool);

    tracing::info!("Creating admin user: {} ({})", username, email);

    let user = users
        .create(&NewUser {
            username: username.to_owned(),
            email: email.clone(),
            password_hash,
            first_name: None,
            last_name: None,
            is_admin: true,
        })
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AdminError::UserExists(email.to_string()),
            other => AdminError::Repository(other),
        })?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );

    Ok(user.id)
}
