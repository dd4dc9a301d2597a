//! Startup bootstrapping.
//!
//! Ensures an admin account exists so a fresh deployment can log into the
//! admin panel without manual database edits.

use secrecy::ExposeSecret;
use sqlx::SqlitePool;

use byteshelf_core::Email;

use crate::config::{DEFAULT_ADMIN_PASSWORD, StoreConfig};
use crate::db::users::UserRepository;
use crate::models::user::NewUser;
use crate::services::auth::{AuthError, hash_password};

/// Create the configured admin account if no user with that email exists.
///
/// Idempotent: an existing account (admin or not) with the configured
/// email is left untouched. Logs a warning when the admin password is
/// still the well-known default.
///
/// # Errors
///
/// Returns `AuthError::InvalidEmail` if the configured admin email is
/// invalid, or a repository/hashing error if account creation fails.
pub async fn ensure_admin(pool: &SqlitePool, config: &StoreConfig) -> Result<(), AuthError> {
    let email = Email::parse(&config.admin_email)?;
    let users = UserRepository::new(pool);

    if users.get_by_email(&email).await?.is_some() {
        tracing::debug!(email = %email, "admin account already present");
        return Ok(());
    }

    let password = config.admin_password.expose_secret();
    if password == DEFAULT_ADMIN_PASSWORD {
        tracing::warn!(
            "admin account uses the default password; set ADMIN_PASSWORD before exposing this \
             instance"
        );
    }

    let password_hash = hash_password(password)?;

    users
        .create(&NewUser {
            username: "admin".to_owned(),
            email,
            password_hash,
            first_name: Some("Admin".to_owned()),
            last_name: Some("User".to_owned()),
            is_admin: true,
        })
        .await?;

    tracing::info!(email = %config.admin_email, "admin account created");
    Ok(())
}
