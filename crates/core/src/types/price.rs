//! Type-safe price representation.
//!
//! Prices are stored as a non-negative number of cents (the smallest
//! currency unit) and converted to [`rust_decimal::Decimal`] for parsing
//! and display. This avoids float drift in order totals and discount math.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input could not be parsed as a decimal number.
    #[error("price is not a valid decimal number")]
    Invalid,
    /// The price is negative.
    #[error("price cannot be negative")]
    Negative,
    /// The price has more than two fractional digits.
    #[error("price cannot have more than two decimal places")]
    TooPrecise,
    /// The price does not fit in the cents representation.
    #[error("price is out of range")]
    OutOfRange,
}

/// A non-negative amount of money in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from a cent amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is negative.
    pub const fn from_cents(cents: i64) -> Result<Self, PriceError> {
        if cents < 0 {
            return Err(PriceError::Negative);
        }
        Ok(Self(cents))
    }

    /// Parse a price from a decimal string such as `"12.99"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a decimal number, is negative,
    /// has more than two fractional digits, or overflows the cents range.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount: Decimal = s.trim().parse().map_err(|_| PriceError::Invalid)?;

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }

        let cents_dec = amount
            .checked_mul(Decimal::from(100))
            .ok_or(PriceError::OutOfRange)?;

        if !cents_dec.fract().is_zero() {
            return Err(PriceError::TooPrecise);
        }

        let cents = cents_dec.to_i64().ok_or(PriceError::OutOfRange)?;
        Self::from_cents(cents)
    }

    /// Get the underlying cent amount.
    #[must_use]
    pub const fn as_cents(&self) -> i64 {
        self.0
    }

    /// Convert to a [`Decimal`] in the currency's standard unit.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Checked addition, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Subtraction clamped at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        let cents = self.0 - other.0;
        if cents < 0 { Self(0) } else { Self(cents) }
    }

    /// Whether this price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

// SQLx support (with sqlite feature): stored as INTEGER cents.
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for Price {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for Price {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let cents = <i64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self(cents))
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(Price::parse("12.99").unwrap().as_cents(), 1299);
        assert_eq!(Price::parse("5").unwrap().as_cents(), 500);
        assert_eq!(Price::parse("0.5").unwrap().as_cents(), 50);
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Price::parse(" 3.25 ").unwrap().as_cents(), 325);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Price::parse("abc"), Err(PriceError::Invalid));
        assert_eq!(Price::parse(""), Err(PriceError::Invalid));
        assert_eq!(Price::parse("12.99.1"), Err(PriceError::Invalid));
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert_eq!(Price::parse("-1"), Err(PriceError::Negative));
        assert_eq!(Price::from_cents(-5), Err(PriceError::Negative));
    }

    #[test]
    fn test_parse_rejects_sub_cent() {
        assert_eq!(Price::parse("1.999"), Err(PriceError::TooPrecise));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(1299).unwrap().to_string(), "12.99");
        assert_eq!(Price::from_cents(500).unwrap().to_string(), "5.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Price::from_cents(100).unwrap();
        let b = Price::from_cents(250).unwrap();
        assert_eq!(a.checked_add(b).unwrap().as_cents(), 350);
        assert_eq!(a.saturating_sub(b), Price::ZERO);
        assert_eq!(b.saturating_sub(a).as_cents(), 150);
    }

    #[test]
    fn test_serde_is_cents() {
        let price = Price::from_cents(1299).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "1299");
    }
}
