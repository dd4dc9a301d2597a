//! Discount code repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::discount::{Discount, NewDiscount};

const DISCOUNT_COLUMNS: &str = "id, code, discount_type, amount, valid_from, valid_to, \
                                usage_limit, usage_count, is_active";

/// Repository for discount code database operations.
pub struct DiscountRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> DiscountRepository<'a> {
    /// Create a new discount repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new discount code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code already exists, or
    /// `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new_discount: &NewDiscount) -> Result<Discount, RepositoryError> {
        let discount = sqlx::query_as::<_, Discount>(&format!(
            "INSERT INTO discounts \
                 (code, discount_type, amount, valid_from, valid_to, usage_limit) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {DISCOUNT_COLUMNS}"
        ))
        .bind(&new_discount.code)
        .bind(new_discount.discount_type)
        .bind(new_discount.amount)
        .bind(new_discount.valid_from)
        .bind(new_discount.valid_to)
        .bind(new_discount.usage_limit)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("discount code already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(discount)
    }

    /// Look up a discount by code without redeeming it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Discount>, RepositoryError> {
        let discount = sqlx::query_as::<_, Discount>(&format!(
            "SELECT {DISCOUNT_COLUMNS} FROM discounts WHERE code = ?"
        ))
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(discount)
    }

    /// Redeem a discount code, atomically bumping its usage count.
    ///
    /// The guarded UPDATE only matches while the code is active, inside
    /// its validity window, and under its usage limit, so concurrent
    /// redemptions cannot push `usage_count` past `usage_limit`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such code exists,
    /// `RepositoryError::Conflict` if the code exists but is not
    /// currently redeemable, or `RepositoryError::Database` if a query
    /// fails.
    pub async fn redeem(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Discount, RepositoryError> {
        let redeemed = sqlx::query_as::<_, Discount>(&format!(
            "UPDATE discounts SET usage_count = usage_count + 1 \
             WHERE code = ? \
               AND is_active = 1 \
               AND valid_from <= ? \
               AND valid_to >= ? \
               AND (usage_limit = 0 OR usage_count < usage_limit) \
             RETURNING {DISCOUNT_COLUMNS}"
        ))
        .bind(code)
        .bind(now)
        .bind(now)
        .fetch_optional(self.pool)
        .await?;

        match redeemed {
            Some(discount) => Ok(discount),
            None => {
                if self.get_by_code(code).await?.is_some() {
                    Err(RepositoryError::Conflict(
                        "discount code is not currently redeemable".to_owned(),
                    ))
                } else {
                    Err(RepositoryError::NotFound)
                }
            }
        }
    }
}
