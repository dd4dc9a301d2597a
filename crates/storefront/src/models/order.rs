//! Order bookkeeping models.
//!
//! Orders record completed purchases of digital goods. Payment processing
//! itself happens elsewhere; the storefront only keeps the books.

use chrono::{DateTime, Utc};
use serde::Serialize;

use byteshelf_core::{DownloadStatus, OrderDetailId, OrderId, PaymentStatus, Price, ProductId, UserId};

/// A recorded order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Total charged after discount.
    pub total: Price,
    /// Amount subtracted from the subtotal by a discount code.
    pub discount_applied: Price,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    /// External payment processor reference, once one exists.
    pub payment_id: Option<String>,
    pub loyalty_points_earned: i64,
    pub loyalty_points_used: i64,
    pub created_at: DateTime<Utc>,
}

/// One purchased product within an order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderDetail {
    pub id: OrderDetailId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    /// Price of the product at purchase time.
    pub price: Price,
    pub download_status: DownloadStatus,
    pub download_count: i64,
    pub last_download: Option<DateTime<Utc>>,
}

/// A line item in an order about to be created.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub price: Price,
}

/// Data required to record a new order.
///
/// Loyalty point deltas are taken as given; the accrual policy lives with
/// the caller, not the bookkeeping layer.
#[derive(Debug)]
pub struct NewOrder {
    pub user_id: UserId,
    pub lines: Vec<OrderLine>,
    /// Amount subtracted from the subtotal, already computed from a
    /// redeemed discount code (zero when no code was used).
    pub discount_applied: Price,
    pub payment_method: Option<String>,
    pub payment_id: Option<String>,
    pub loyalty_points_earned: i64,
    pub loyalty_points_used: i64,
}

impl NewOrder {
    /// Sum of line prices before the discount.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::ZERO, |acc, line| {
                acc.checked_add(line.price).unwrap_or(acc)
            })
    }

    /// Total to charge: subtotal minus the discount, clamped at zero.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal().saturating_sub(self.discount_applied)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn order_with(prices: &[i64], discount: i64) -> NewOrder {
        NewOrder {
            user_id: UserId::new(1),
            lines: prices
                .iter()
                .enumerate()
                .map(|(i, cents)| OrderLine {
                    product_id: ProductId::new(i64::try_from(i).unwrap() + 1),
                    price: Price::from_cents(*cents).unwrap(),
                })
                .collect(),
            discount_applied: Price::from_cents(discount).unwrap(),
            payment_method: None,
            payment_id: None,
            loyalty_points_earned: 0,
            loyalty_points_used: 0,
        }
    }

    #[test]
    fn test_subtotal_sums_lines() {
        assert_eq!(order_with(&[1299, 499], 0).subtotal().as_cents(), 1798);
    }

    #[test]
    fn test_total_applies_discount() {
        assert_eq!(order_with(&[1299, 499], 300).total().as_cents(), 1498);
    }

    #[test]
    fn test_total_never_negative() {
        assert_eq!(order_with(&[100], 500).total(), Price::ZERO);
    }
}
