//! Authentication route handlers.
//!
//! Handles registration, login, and logout. Form posts respond with
//! redirects carrying flash messages in query parameters.

use axum::{
    Form, Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::session::CurrentUser;
use crate::routes::PageMeta;
use crate::services::auth::{AuthError, AuthService, Registration};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Page Payloads
// =============================================================================

/// Login page payload.
#[derive(Debug, Serialize)]
pub struct LoginView {
    pub error: Option<String>,
    pub success: Option<String>,
    pub meta: PageMeta,
}

/// Register page payload.
#[derive(Debug, Serialize)]
pub struct RegisterView {
    pub error: Option<String>,
    pub meta: PageMeta,
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<MessageQuery>,
) -> Result<Json<RegisterView>> {
    let meta = PageMeta::load(&state, &session).await?;
    Ok(Json(RegisterView {
        error: query.error,
        meta,
    }))
}

/// Handle registration form submission.
///
/// On success redirects to the login page with a success flash. Expected
/// failures redirect back to the form with an error flash; only
/// infrastructure failures surface as error responses.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    if form.password != form.confirm_password {
        return Ok(Redirect::to("/register?error=password_mismatch").into_response());
    }

    let auth = AuthService::new(state.pool());

    let registration = Registration {
        username: &form.username,
        email: &form.email,
        password: &form.password,
        first_name: form.first_name.as_deref().filter(|s| !s.is_empty()),
        last_name: form.last_name.as_deref().filter(|s| !s.is_empty()),
    };

    match auth.register(registration).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "user registered");
            Ok(Redirect::to("/login?success=account_created").into_response())
        }
        Err(AuthError::UserAlreadyExists) => {
            Ok(Redirect::to("/register?error=exists").into_response())
        }
        Err(AuthError::InvalidEmail(_)) => {
            Ok(Redirect::to("/register?error=invalid_email").into_response())
        }
        Err(AuthError::EmptyUsername) => {
            Ok(Redirect::to("/register?error=invalid_username").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<MessageQuery>,
) -> Result<Json<LoginView>> {
    let meta = PageMeta::load(&state, &session).await?;
    Ok(Json(LoginView {
        error: query.error,
        success: query.success,
        meta,
    }))
}

/// Handle login form submission.
///
/// Admins land on the admin dashboard, everyone else on the home page.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.email, &form.password).await {
        Ok(user) => {
            let current_user = CurrentUser::from(&user);

            // Rotate the session id on privilege change
            session.cycle_id().await?;
            set_current_user(&session, &current_user).await?;

            tracing::info!(user_id = %user.id, "user logged in");

            let destination = if user.is_admin { "/admin" } else { "/" };
            Ok(Redirect::to(destination).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("login failed");
            Ok(Redirect::to("/login?error=invalid_credentials").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Log the current user out and return to the home page.
///
/// Safe to hit while logged out.
pub async fn logout(session: Session) -> Result<Response> {
    clear_current_user(&session).await?;
    Ok(Redirect::to("/").into_response())
}
