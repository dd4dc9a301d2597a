//! Catalog repositories: categories and products.

use chrono::Utc;
use sqlx::SqlitePool;

use byteshelf_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::catalog::{Category, NewProduct, Product};
use crate::models::page::Page;

/// Columns selected for [`Product`] rows, aliased to the model's field names.
const PRODUCT_COLUMNS: &str = "id, name, description, price_cents AS price, \
                               file_path, thumbnail, category_id, is_active, created_at";

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all categories, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    /// Insert a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists, or
    /// `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES (?, ?) \
             RETURNING id, name, description",
        )
        .bind(name)
        .bind(description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("category name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(category)
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a product by ID, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// List one page of active products, newest first, optionally filtered
    /// by category.
    ///
    /// `page` is 1-based; values below 1 are treated as 1.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_active(
        &self,
        category_id: Option<CategoryId>,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Product>, RepositoryError> {
        let page = page.max(1);
        let offset = i64::from(page - 1) * i64::from(per_page);

        let (total, products) = if let Some(category_id) = category_id {
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM products WHERE is_active = 1 AND category_id = ?",
            )
            .bind(category_id)
            .fetch_one(self.pool)
            .await?;

            let products = sqlx::query_as::<_, Product>(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products \
                 WHERE is_active = 1 AND category_id = ? \
                 ORDER BY created_at DESC, id DESC \
                 LIMIT ? OFFSET ?"
            ))
            .bind(category_id)
            .bind(i64::from(per_page))
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

            (total, products)
        } else {
            let total: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
                    .fetch_one(self.pool)
                    .await?;

            let products = sqlx::query_as::<_, Product>(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products \
                 WHERE is_active = 1 \
                 ORDER BY created_at DESC, id DESC \
                 LIMIT ? OFFSET ?"
            ))
            .bind(i64::from(per_page))
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

            (total, products)
        };

        Ok(Page::new(products, page, per_page, total))
    }

    /// The newest active products, for the home page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn featured(&self, limit: u32) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE is_active = 1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT ?"
        ))
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Active products sharing the given category, excluding one product.
    ///
    /// A `None` category matches other uncategorized products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn related(
        &self,
        category_id: Option<CategoryId>,
        exclude: ProductId,
        limit: u32,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = if let Some(category_id) = category_id {
            sqlx::query_as::<_, Product>(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products \
                 WHERE is_active = 1 AND category_id = ? AND id != ? \
                 ORDER BY created_at DESC, id DESC \
                 LIMIT ?"
            ))
            .bind(category_id)
            .bind(exclude)
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Product>(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products \
                 WHERE is_active = 1 AND category_id IS NULL AND id != ? \
                 ORDER BY created_at DESC, id DESC \
                 LIMIT ?"
            ))
            .bind(exclude)
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?
        };

        Ok(products)
    }

    /// List every product regardless of active state, newest first.
    ///
    /// Used by the admin panel.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new_product: &NewProduct) -> Result<Product, RepositoryError> {
        let now = Utc::now();

        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products \
                 (name, description, price_cents, file_path, thumbnail, \
                  category_id, is_active, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&new_product.name)
        .bind(&new_product.description)
        .bind(new_product.price)
        .bind(&new_product.file_path)
        .bind(&new_product.thumbnail)
        .bind(new_product.category_id)
        .bind(new_product.is_active)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Count all products, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
