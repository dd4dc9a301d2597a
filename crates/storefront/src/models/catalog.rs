//! Catalog models: categories and products.

use chrono::{DateTime, Utc};
use serde::Serialize;

use byteshelf_core::{CategoryId, Price, ProductId};

/// A product category.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

/// A digital product.
///
/// `file_path` points at the downloadable artifact; `thumbnail` at the
/// listing image. Both are optional because admins can create the catalog
/// entry before uploading assets.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub file_path: Option<String>,
    pub thumbnail: Option<String>,
    pub category_id: Option<CategoryId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a new product.
#[derive(Debug)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub file_path: Option<String>,
    pub thumbnail: Option<String>,
    pub category_id: Option<CategoryId>,
    pub is_active: bool,
}
