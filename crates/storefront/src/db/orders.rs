//! Order repository for database operations.
//!
//! Order creation is transactional: the order row, its detail rows, and
//! the buyer's loyalty point balance move together or not at all.

use chrono::Utc;
use sqlx::SqlitePool;

use byteshelf_core::{OrderDetailId, OrderId, PaymentStatus, UserId};

use super::RepositoryError;
use crate::models::order::{NewOrder, Order, OrderDetail};

const ORDER_COLUMNS: &str = "id, user_id, total_cents AS total, \
                             discount_cents AS discount_applied, payment_status, \
                             payment_method, payment_id, loyalty_points_earned, \
                             loyalty_points_used, created_at";

const DETAIL_COLUMNS: &str = "id, order_id, product_id, price_cents AS price, \
                              download_status, download_count, last_download";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a new order with its line items, atomically.
    ///
    /// Inserts the order and one detail row per line, then applies the
    /// loyalty point deltas to the buyer's balance, all in one
    /// transaction. The order starts in `pending` payment status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Invalid` if the order has no lines, or
    /// `RepositoryError::Database` if any statement fails (the
    /// transaction is rolled back).
    pub async fn create(&self, new_order: &NewOrder) -> Result<Order, RepositoryError> {
        if new_order.lines.is_empty() {
            return Err(RepositoryError::Invalid(
                "order must contain at least one line".to_owned(),
            ));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders \
                 (user_id, total_cents, discount_cents, payment_status, payment_method, \
                  payment_id, loyalty_points_earned, loyalty_points_used, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(new_order.user_id)
        .bind(new_order.total())
        .bind(new_order.discount_applied)
        .bind(PaymentStatus::Pending)
        .bind(&new_order.payment_method)
        .bind(&new_order.payment_id)
        .bind(new_order.loyalty_points_earned)
        .bind(new_order.loyalty_points_used)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for line in &new_order.lines {
            sqlx::query(
                "INSERT INTO order_details (order_id, product_id, price_cents) \
                 VALUES (?, ?, ?)",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.price)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "UPDATE users SET loyalty_points = loyalty_points + ? - ? WHERE id = ?",
        )
        .bind(new_order.loyalty_points_earned)
        .bind(new_order.loyalty_points_used)
        .bind(new_order.user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(order)
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = ? \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// List the detail rows of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_details(&self, order_id: OrderId) -> Result<Vec<OrderDetail>, RepositoryError> {
        let details = sqlx::query_as::<_, OrderDetail>(&format!(
            "SELECT {DETAIL_COLUMNS} FROM order_details WHERE order_id = ? ORDER BY id"
        ))
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(details)
    }

    /// Record a download of a purchased product.
    ///
    /// Marks the detail row as downloaded, increments its counter, and
    /// stamps the download time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the detail row does not
    /// exist, or `RepositoryError::Database` if the update fails.
    pub async fn record_download(
        &self,
        detail_id: OrderDetailId,
    ) -> Result<OrderDetail, RepositoryError> {
        let now = Utc::now();

        let detail = sqlx::query_as::<_, OrderDetail>(&format!(
            "UPDATE order_details \
             SET download_status = 'downloaded', \
                 download_count = download_count + 1, \
                 last_download = ? \
             WHERE id = ? \
             RETURNING {DETAIL_COLUMNS}"
        ))
        .bind(now)
        .bind(detail_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(detail)
    }

    /// Count all orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
