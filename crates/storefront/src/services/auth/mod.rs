//! Authentication service.
//!
//! Password registration and login on top of the user repository.
//! Passwords are hashed with Argon2id.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sqlx::SqlitePool;

use byteshelf_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::{NewUser, User};

/// Authentication service.
///
/// Handles user registration and login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

/// Fields submitted by the registration form.
#[derive(Debug)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is structurally
    /// invalid, `AuthError::EmptyUsername` if the username is blank, and
    /// `AuthError::UserAlreadyExists` if the username or email is taken.
    pub async fn register(&self, registration: Registration<'_>) -> Result<User, AuthError> {
        let email = Email::parse(registration.email)?;

        let username = registration.username.trim();
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }

        let password_hash = hash_password(registration.password)?;

        // The UNIQUE constraints are the real guard; this check just turns
        // the common case into a friendlier error without an insert attempt.
        if self.users.username_or_email_exists(username, &email).await? {
            return Err(AuthError::UserAlreadyExists);
        }

        let user = self
            .users
            .create(&NewUser {
                username: username.to_owned(),
                email,
                password_hash,
                first_name: registration.first_name.map(str::to_owned),
                last_name: registration.last_name.map(str::to_owned),
                is_admin: false,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// Updates the user's `last_login` timestamp on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (mut user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let now = Utc::now();
        self.users.touch_last_login(user.id, now).await?;
        user.last_login = Some(now);

        Ok(user)
    }
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password does not match,
/// or `AuthError::PasswordHash` if the stored hash cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::PasswordHash(_))
        ));
    }
}
