//! Product listing and detail handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use byteshelf_core::{CategoryId, ProductId};

use crate::db::catalog::{CategoryRepository, ProductRepository};
use crate::db::reviews::ReviewRepository;
use crate::error::{AppError, Result};
use crate::models::catalog::Product;
use crate::models::page::Page;
use crate::models::review::ReviewWithAuthor;
use crate::routes::PageMeta;
use crate::state::AppState;

/// Products shown per listing page.
const PER_PAGE: u32 = 12;

/// Related products shown on a product page.
const RELATED_COUNT: u32 = 4;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    /// Filter to a single category.
    pub category: Option<i64>,
    /// 1-based page number.
    pub page: Option<u32>,
}

/// Product listing payload.
#[derive(Debug, Serialize)]
pub struct ListingView {
    /// Page title; category-specific when filtered.
    pub title: String,
    #[serde(flatten)]
    pub products: Page<Product>,
    pub category_id: Option<CategoryId>,
    pub meta: PageMeta,
}

/// Product detail payload.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub product: Product,
    pub related_products: Vec<Product>,
    pub reviews: Vec<ReviewWithAuthor>,
    pub average_rating: Option<f64>,
    pub meta: PageMeta,
}

/// Display the paginated product listing, optionally filtered by category.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingView>> {
    let categories = CategoryRepository::new(state.pool());
    let products = ProductRepository::new(state.pool());

    // An unknown category is a 404, not an empty listing
    let (category_id, title) = match query.category {
        Some(id) => {
            let category = categories
                .get(CategoryId::new(id))
                .await?
                .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;
            (Some(category.id), format!("منتجات {}", category.name))
        }
        None => (None, "جميع المنتجات".to_owned()),
    };

    let page = products
        .list_active(category_id, query.page.unwrap_or(1), PER_PAGE)
        .await?;
    let meta = PageMeta::load(&state, &session).await?;

    Ok(Json(ListingView {
        title,
        products: page,
        category_id,
        meta,
    }))
}

/// Display a single product with its reviews and related products.
///
/// Inactive products stay reachable by direct link, matching the
/// listing-only meaning of the active flag.
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<ProductView>> {
    let id = ProductId::new(id);
    let products = ProductRepository::new(state.pool());
    let reviews = ReviewRepository::new(state.pool());

    let product = products
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let related_products = products
        .related(product.category_id, product.id, RELATED_COUNT)
        .await?;
    let product_reviews = reviews.list_for_product(product.id).await?;
    let average_rating = reviews.average_rating(product.id).await?;
    let meta = PageMeta::load(&state, &session).await?;

    Ok(Json(ProductView {
        product,
        related_products,
        reviews: product_reviews,
        average_rating,
        meta,
    }))
}
