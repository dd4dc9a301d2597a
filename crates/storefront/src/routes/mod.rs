//! Route handlers and router assembly.

pub mod admin;
pub mod auth;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::get,
};
use serde::Serialize;
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::{current_cart, current_user};
use crate::models::catalog::Category;
use crate::models::session::CurrentUser;
use crate::state::AppState;

/// Build the application router.
#[must_use]
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products", get(products::index))
        .route("/product/{id}", get(products::show))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .nest("/admin", admin::routes())
}

/// Data shared by every page: login state, cart badge, and the category
/// navigation.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub user: Option<CurrentUser>,
    pub cart_count: u32,
    pub categories: Vec<Category>,
}

impl PageMeta {
    /// Load the page metadata for the current request.
    pub async fn load(state: &AppState, session: &Session) -> Result<Self> {
        let user = current_user(session).await?;
        let cart = current_cart(session).await?;
        let categories = crate::db::catalog::CategoryRepository::new(state.pool())
            .list()
            .await?;

        Ok(Self {
            user,
            cart_count: cart.count(),
            categories,
        })
    }
}
