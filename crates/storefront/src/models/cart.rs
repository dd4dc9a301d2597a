//! Session-stored shopping cart.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use byteshelf_core::ProductId;

/// A shopping cart mapping product IDs to quantities.
///
/// Stored in the session, so it must stay small and serializable. A
/// `BTreeMap` keeps iteration order stable for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    items: BTreeMap<ProductId, u32>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Add a quantity of a product, accumulating with any existing entry.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        *self.items.entry(product_id).or_insert(0) += quantity;
    }

    /// Number of distinct products in the cart, shown in the header badge.
    #[must_use]
    pub fn count(&self) -> u32 {
        u32::try_from(self.items.len()).unwrap_or(u32::MAX)
    }

    /// Whether the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_count_is_distinct_products() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), 2);
        cart.add(ProductId::new(1), 1);
        cart.add(ProductId::new(2), 1);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(5), 3);

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }
}
