//! Authentication middleware and extractors.
//!
//! Provides extractors for reading the logged-in user from the session
//! and for gating the admin panel.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::cart::Cart;
use crate::models::session::{CurrentUser, session_keys};

/// Extractor that requires an admin user.
///
/// Rejects with a redirect to the login page when nobody is logged in,
/// and to the home page with a flash message when the user is logged in
/// but not an admin. Every admin route goes through this extractor so
/// the panel has a single gate.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
pub struct RequireAdmin(pub CurrentUser);

/// Rejection for [`RequireAdmin`].
pub enum AdminRejection {
    /// Nobody is logged in.
    NotLoggedIn,
    /// Logged in, but not an admin.
    NotAdmin,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NotLoggedIn => Redirect::to("/login").into_response(),
            Self::NotAdmin => Redirect::to("/?error=forbidden").into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The session is placed in extensions by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminRejection::NotLoggedIn)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AdminRejection::NotLoggedIn)?;

        if !user.is_admin {
            return Err(AdminRejection::NotAdmin);
        }

        Ok(Self(user))
    }
}

/// Read the logged-in user from the session, if any.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn current_user(
    session: &Session,
) -> Result<Option<CurrentUser>, tower_sessions::session::Error> {
    session.get(session_keys::CURRENT_USER).await
}

/// Store the logged-in user in the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Remove all authentication state from the session.
///
/// Also drops the cart, matching a full logout.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    session.remove::<Cart>(session_keys::CART).await?;
    Ok(())
}

/// Read the cart from the session, defaulting to an empty one.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn current_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}
