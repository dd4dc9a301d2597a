//! Admin panel route handlers.
//!
//! Every handler takes the [`RequireAdmin`] extractor, so the whole
//! panel shares one authorization gate.

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use byteshelf_core::{CategoryId, Price};

use crate::db::catalog::{CategoryRepository, ProductRepository};
use crate::db::orders::OrderRepository;
use crate::db::users::UserRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::catalog::{Category, NewProduct, Product};
use crate::state::AppState;

/// Build the admin sub-router, nested under `/admin`.
#[must_use]
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/products", get(products))
        .route("/add_product", get(add_product_page).post(add_product))
}

// =============================================================================
// Form and Query Types
// =============================================================================

/// Add-product form data.
///
/// `category_id` arrives as a string because an HTML select submits an
/// empty value for "no category". `is_active` is a checkbox: present
/// when ticked, absent otherwise.
#[derive(Debug, Deserialize)]
pub struct AddProductForm {
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub category_id: Option<String>,
    pub is_active: Option<String>,
}

/// Query parameters for flash messages on admin pages.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Page Payloads
// =============================================================================

/// Admin dashboard payload.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub product_count: i64,
    pub user_count: i64,
    pub order_count: i64,
}

/// Admin product listing payload. Includes inactive products.
#[derive(Debug, Serialize)]
pub struct AdminProductsView {
    pub products: Vec<Product>,
}

/// Add-product form payload.
#[derive(Debug, Serialize)]
pub struct AddProductView {
    pub categories: Vec<Category>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Admin dashboard with entity counts.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<DashboardView>> {
    let product_count = ProductRepository::new(state.pool()).count().await?;
    let user_count = UserRepository::new(state.pool()).count().await?;
    let order_count = OrderRepository::new(state.pool()).count().await?;

    Ok(Json(DashboardView {
        product_count,
        user_count,
        order_count,
    }))
}

/// List every product, active or not.
pub async fn products(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<AdminProductsView>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(AdminProductsView { products }))
}

/// Display the add-product form.
pub async fn add_product_page(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<MessageQuery>,
) -> Result<Json<AddProductView>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(AddProductView {
        categories,
        error: query.error,
        success: query.success,
    }))
}

/// Handle the add-product form submission.
///
/// Validation failures redirect back to the form with an error flash so
/// the admin can correct the input.
pub async fn add_product(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<AddProductForm>,
) -> Result<Response> {
    let Ok(price) = Price::parse(&form.price) else {
        return Ok(Redirect::to("/admin/add_product?error=invalid_price").into_response());
    };

    let category_id = match form.category_id.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) => {
                let category_id = CategoryId::new(id);
                if CategoryRepository::new(state.pool())
                    .get(category_id)
                    .await?
                    .is_none()
                {
                    return Ok(
                        Redirect::to("/admin/add_product?error=unknown_category").into_response()
                    );
                }
                Some(category_id)
            }
            Err(_) => {
                return Ok(
                    Redirect::to("/admin/add_product?error=unknown_category").into_response()
                );
            }
        },
        None => None,
    };

    let product = ProductRepository::new(state.pool())
        .create(&NewProduct {
            name: form.name,
            description: form.description.filter(|s| !s.is_empty()),
            price,
            file_path: None,
            thumbnail: None,
            category_id,
            is_active: form.is_active.is_some(),
        })
        .await?;

    tracing::info!(product_id = %product.id, admin = %admin.username, "product added");

    Ok(Redirect::to("/admin/products?success=product_added").into_response())
}
