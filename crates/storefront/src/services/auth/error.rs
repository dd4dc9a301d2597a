//! Authentication error types.

use thiserror::Error;

use byteshelf_core::EmailError;

use crate::db::RepositoryError;

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password is wrong. Deliberately does not distinguish an
    /// unknown email from a bad password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The username or email is already registered.
    #[error("Username or email already registered")]
    UserAlreadyExists,

    /// The email address is structurally invalid.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The username is empty.
    #[error("Username cannot be empty")]
    EmptyUsername,

    /// Password hashing or verification machinery failed.
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Underlying repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
