//! Home page handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::db::catalog::ProductRepository;
use crate::error::Result;
use crate::models::catalog::Product;
use crate::routes::PageMeta;
use crate::state::AppState;

/// Number of products featured on the home page.
const FEATURED_COUNT: u32 = 8;

/// Query parameters for flash messages on the home page.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub error: Option<String>,
}

/// Home page payload.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub featured_products: Vec<Product>,
    pub error: Option<String>,
    pub meta: PageMeta,
}

/// Display the home page: the newest active products.
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<HomeQuery>,
) -> Result<Json<HomeView>> {
    let featured_products = ProductRepository::new(state.pool())
        .featured(FEATURED_COUNT)
        .await?;
    let meta = PageMeta::load(&state, &session).await?;

    Ok(Json(HomeView {
        featured_products,
        error: query.error,
        meta,
    }))
}
