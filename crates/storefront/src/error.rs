//! Unified error handling.
//!
//! Provides a unified `AppError` type used as the handler return error.
//! Server-side failures are logged and hidden behind a generic response.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Body served for any not-found page.
const NOT_FOUND_PAGE: &str = "<!DOCTYPE html>\n<html lang=\"ar\" dir=\"rtl\">\n<head><meta charset=\"utf-8\"><title>404</title></head>\n<body><h1>404</h1><p>الصفحة غير موجودة</p><a href=\"/\">العودة للرئيسية</a></body>\n</html>";

/// Body served for any internal failure.
const SERVER_ERROR_PAGE: &str = "<!DOCTYPE html>\n<html lang=\"ar\" dir=\"rtl\">\n<head><meta charset=\"utf-8\"><title>500</title></head>\n<body><h1>500</h1><p>حدث خطأ في الخادم</p><a href=\"/\">العودة للرئيسية</a></body>\n</html>";

/// Fallback handler for unknown paths.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
}

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Session(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                RepositoryError::Invalid(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::InvalidEmail(_) | AuthError::EmptyUsername => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Page-level failures get the dedicated pages; details are logged,
        // never leaked
        match status {
            StatusCode::NOT_FOUND => (status, Html(NOT_FOUND_PAGE)).into_response(),
            StatusCode::INTERNAL_SERVER_ERROR => {
                (status, Html(SERVER_ERROR_PAGE)).into_response()
            }
            _ => {
                let message = match &self {
                    Self::Database(err) => match err {
                        RepositoryError::Conflict(msg) | RepositoryError::Invalid(msg) => {
                            msg.clone()
                        }
                        _ => "Request failed".to_owned(),
                    },
                    Self::Auth(err) => match err {
                        AuthError::InvalidCredentials => "Invalid credentials".to_owned(),
                        AuthError::UserAlreadyExists => {
                            "An account with this username or email already exists".to_owned()
                        }
                        AuthError::InvalidEmail(_) => "Invalid email address".to_owned(),
                        AuthError::EmptyUsername => "Username cannot be empty".to_owned(),
                        _ => "Authentication error".to_owned(),
                    },
                    _ => self.to_string(),
                };
                (status, message).into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
