//! Product review models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use byteshelf_core::{ProductId, ReviewId, UserId};

/// Minimum allowed star rating.
pub const MIN_RATING: i64 = 1;

/// Maximum allowed star rating.
pub const MAX_RATING: i64 = 5;

/// A review left by a user on a product.
///
/// The database enforces one review per user per product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A review joined with its author's username, for product pages.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReviewWithAuthor {
    pub id: ReviewId,
    pub user_id: UserId,
    pub username: String,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
