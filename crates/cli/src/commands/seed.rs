//! Catalog seeding command.
//!
//! Fills an empty database with a handful of categories and products so
//! the storefront has something to show during development.

use thiserror::Error;

use byteshelf_core::Price;
use byteshelf_storefront::db::RepositoryError;
use byteshelf_storefront::db::catalog::{CategoryRepository, ProductRepository};
use byteshelf_storefront::models::catalog::NewProduct;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The database already holds products.
    #[error("Database already contains {0} products; refusing to seed")]
    NotEmpty(i64),
}

const CATEGORIES: &[(&str, &str)] = &[
    ("E-Books", "Books in digital formats"),
    ("Templates", "Design and document templates"),
    ("Audio", "Music, loops, and sound effects"),
];

const PRODUCTS: &[(&str, &str, i64, usize)] = &[
    ("Rust Cookbook", "Recipes for everyday Rust", 1999, 0),
    ("SQL Field Guide", "Queries that pull their weight", 1499, 0),
    ("Invoice Template Pack", "Twelve ready-to-send invoice layouts", 899, 1),
    ("Pitch Deck Kit", "Slides for fundraising season", 2499, 1),
    ("Lo-fi Loop Bundle", "40 royalty-free loops", 1299, 2),
    ("Ambient Textures", "Background pads and drones", 999, 2),
];

/// Seed the catalog with sample data.
///
/// Refuses to touch a database that already contains products.
///
/// # Errors
///
/// Returns `SeedError` if the database is non-empty or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    let pool = super::connect().await?;
    byteshelf_storefront::db::run_migrations(&pool).await?;

    let categories = CategoryRepository::new(&pool);
    let products = ProductRepository::new(&pool);

    let existing = products.count().await?;
    if existing > 0 {
        return Err(SeedError::NotEmpty(existing));
    }

    tracing::info!("Seeding catalog...");

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let category = categories.create(name, Some(description)).await?;
        category_ids.push(category.id);
    }

    for (name, description, cents, category_index) in PRODUCTS {
        let price = Price::from_cents(*cents)
            .map_err(|e| SeedError::Repository(RepositoryError::Invalid(e.to_string())))?;

        products
            .create(&NewProduct {
                name: (*name).to_owned(),
                description: Some((*description).to_owned()),
                price,
                file_path: None,
                thumbnail: None,
                category_id: category_ids.get(*category_index).copied(),
                is_active: true,
            })
            .await?;
    }

    tracing::info!(
        "Seeded {} categories and {} products",
        CATEGORIES.len(),
        PRODUCTS.len()
    );

    Ok(())
}
