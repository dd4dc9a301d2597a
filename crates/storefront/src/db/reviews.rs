//! Review repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use byteshelf_core::{ProductId, ReviewId, UserId};

use super::RepositoryError;
use crate::models::review::{MAX_RATING, MIN_RATING, Review, ReviewWithAuthor};

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Invalid` if the rating is outside 1-5,
    /// `RepositoryError::Conflict` if the user already reviewed this
    /// product, or `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        product_id: ProductId,
        rating: i64,
        comment: Option<&str>,
    ) -> Result<Review, RepositoryError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(RepositoryError::Invalid(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }

        let now = Utc::now();

        let review = sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (user_id, product_id, rating, comment, created_at) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, user_id, product_id, rating, comment, created_at",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(rating)
        .bind(comment)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "user has already reviewed this product".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        Ok(review)
    }

    /// List a product's reviews with author usernames, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ReviewWithAuthor>, RepositoryError> {
        let reviews = sqlx::query_as::<_, ReviewWithAuthor>(
            "SELECT r.id, r.user_id, u.username, r.rating, r.comment, r.created_at \
             FROM reviews r \
             JOIN users u ON u.id = r.user_id \
             WHERE r.product_id = ? \
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }

    /// Average star rating for a product, or `None` with no reviews.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn average_rating(
        &self,
        product_id: ProductId,
    ) -> Result<Option<f64>, RepositoryError> {
        let avg: Option<f64> =
            sqlx::query_scalar("SELECT AVG(rating) FROM reviews WHERE product_id = ?")
                .bind(product_id)
                .fetch_one(self.pool)
                .await?;

        Ok(avg)
    }

    /// Get a review by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(
            "SELECT id, user_id, product_id, rating, comment, created_at \
             FROM reviews WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(review)
    }
}
