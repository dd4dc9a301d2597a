//! Discount code models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use byteshelf_core::{DiscountId, DiscountType, Price};

/// A discount code.
///
/// `amount` is interpreted per `discount_type`: whole percent (0-100) for
/// percentage codes, cents for fixed codes. A `usage_limit` of zero means
/// unlimited redemptions.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Discount {
    pub id: DiscountId,
    pub code: String,
    pub discount_type: DiscountType,
    pub amount: i64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub usage_limit: i64,
    pub usage_count: i64,
    pub is_active: bool,
}

impl Discount {
    /// Whether the code can currently be redeemed.
    #[must_use]
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.valid_from <= now
            && now <= self.valid_to
            && (self.usage_limit == 0 || self.usage_count < self.usage_limit)
    }

    /// Amount this code subtracts from the given subtotal.
    ///
    /// Never exceeds the subtotal, so order totals stay non-negative.
    #[must_use]
    pub fn amount_off(&self, subtotal: Price) -> Price {
        let cents = match self.discount_type {
            DiscountType::Percentage => {
                let pct = self.amount.clamp(0, 100);
                subtotal.as_cents() * pct / 100
            }
            DiscountType::Fixed => self.amount.max(0),
        };
        Price::from_cents(cents.min(subtotal.as_cents())).unwrap_or(Price::ZERO)
    }
}

/// Data required to insert a new discount code.
#[derive(Debug)]
pub struct NewDiscount {
    pub code: String,
    pub discount_type: DiscountType,
    pub amount: i64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub usage_limit: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn discount(discount_type: DiscountType, amount: i64) -> Discount {
        let now = Utc::now();
        Discount {
            id: DiscountId::new(1),
            code: "SAVE".to_owned(),
            discount_type,
            amount,
            valid_from: now - Duration::days(1),
            valid_to: now + Duration::days(1),
            usage_limit: 0,
            usage_count: 0,
            is_active: true,
        }
    }

    #[test]
    fn test_percentage_amount_off() {
        let d = discount(DiscountType::Percentage, 10);
        let subtotal = Price::from_cents(2000).unwrap();
        assert_eq!(d.amount_off(subtotal).as_cents(), 200);
    }

    #[test]
    fn test_fixed_amount_off_capped_at_subtotal() {
        let d = discount(DiscountType::Fixed, 5000);
        let subtotal = Price::from_cents(2000).unwrap();
        assert_eq!(d.amount_off(subtotal).as_cents(), 2000);
    }

    #[test]
    fn test_usable_within_window() {
        let d = discount(DiscountType::Fixed, 100);
        assert!(d.is_usable(Utc::now()));
    }

    #[test]
    fn test_unusable_when_inactive() {
        let mut d = discount(DiscountType::Fixed, 100);
        d.is_active = false;
        assert!(!d.is_usable(Utc::now()));
    }

    #[test]
    fn test_unusable_outside_window() {
        let d = discount(DiscountType::Fixed, 100);
        assert!(!d.is_usable(Utc::now() + Duration::days(2)));
    }

    #[test]
    fn test_usage_limit_enforced() {
        let mut d = discount(DiscountType::Fixed, 100);
        d.usage_limit = 3;
        d.usage_count = 3;
        assert!(!d.is_usable(Utc::now()));

        d.usage_count = 2;
        assert!(d.is_usable(Utc::now()));
    }
}
