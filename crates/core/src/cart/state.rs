//! Cart line items and the aggregate root.

use std::collections::HashSet;
use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// Errors raised when a stored cart snapshot cannot become a [`CartState`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartStateError {
    /// Two line items share the same product id.
    #[error("duplicate line item for product {0}")]
    DuplicateItem(ProductId),

    /// `total` or `item_count` does not fit its type.
    #[error("cart totals overflow")]
    Overflow,
}

/// One distinct product held in the cart.
///
/// Display fields and price are copied from the product the first time it is
/// added and are never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub quantity: NonZeroU32,
}

impl LineItem {
    /// Snapshot a product into a new line with quantity one.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            image: product.image.clone(),
            description: product.description.clone(),
            price: product.price,
            quantity: NonZeroU32::MIN,
        }
    }

    /// `price * quantity` for this line.
    ///
    /// Saturates instead of panicking; with prices capped at [`Price::MAX`]
    /// the product always fits.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .amount()
            .saturating_mul(Decimal::from(self.quantity.get()))
    }
}

/// The cart aggregate: line items plus totals derived from them.
///
/// `total` and `item_count` are private and recomputed from `items` after
/// every transition, so they can never drift from the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", try_from = "CartSnapshot")]
pub struct CartState {
    items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    total: Decimal,
    item_count: u64,
}

/// The raw persisted shape of a cart, before invariants are checked.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default)]
    pub item_count: u64,
}

/// A snapshot accepted by [`CartState::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub state: CartState,
    /// The stored `total`/`itemCount` disagreed with the stored items and
    /// were replaced by recomputed values.
    pub aggregates_recomputed: bool,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of `price * quantity` over all items.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    /// Sum of quantities over all items.
    #[must_use]
    pub const fn item_count(&self) -> u64 {
        self.item_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Rebuild a cart from a stored snapshot.
    ///
    /// Items are taken verbatim. Aggregates are recomputed from them.
    ///
    /// # Errors
    ///
    /// Returns [`CartStateError::DuplicateItem`] if two items share an id and
    /// [`CartStateError::Overflow`] if the items cannot be totalled.
    pub fn restore(snapshot: CartSnapshot) -> Result<Restored, CartStateError> {
        let mut seen = HashSet::with_capacity(snapshot.items.len());
        for item in &snapshot.items {
            if !seen.insert(item.id) {
                return Err(CartStateError::DuplicateItem(item.id));
            }
        }

        let mut state = Self {
            items: snapshot.items,
            total: Decimal::ZERO,
            item_count: 0,
        };
        state.recompute()?;

        let aggregates_recomputed =
            state.total != snapshot.total || state.item_count != snapshot.item_count;

        Ok(Restored {
            state,
            aggregates_recomputed,
        })
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<LineItem> {
        &mut self.items
    }

    pub(crate) fn recompute(&mut self) -> Result<(), CartStateError> {
        let lines = self
            .items
            .iter()
            .map(|item| (item.price.amount(), item.quantity.get()));
        (self.total, self.item_count) = aggregate(lines)?;
        Ok(())
    }
}

/// Sum `price * quantity` and `quantity` over `lines` without panicking.
fn aggregate(
    lines: impl IntoIterator<Item = (Decimal, u32)>,
) -> Result<(Decimal, u64), CartStateError> {
    lines
        .into_iter()
        .try_fold((Decimal::ZERO, 0_u64), |(total, count), (price, quantity)| {
            let total = price
                .checked_mul(Decimal::from(quantity))
                .and_then(|line| total.checked_add(line))
                .ok_or(CartStateError::Overflow)?;
            let count = count
                .checked_add(u64::from(quantity))
                .ok_or(CartStateError::Overflow)?;
            Ok((total, count))
        })
}

impl TryFrom<CartSnapshot> for CartState {
    type Error = CartStateError;

    fn try_from(snapshot: CartSnapshot) -> Result<Self, Self::Error> {
        Self::restore(snapshot).map(|restored| restored.state)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_serializes_with_three_fields() {
        let json = serde_json::to_value(CartState::new()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(json["items"], serde_json::json!([]));
        assert_eq!(json["total"].as_f64(), Some(0.0));
        assert_eq!(json["itemCount"], 0);
    }

    #[test]
    fn test_restore_recomputes_stale_aggregates() {
        let json = r#"{
            "items": [
                { "id": 1, "title": "A", "image": "", "description": "", "price": 10, "quantity": 3 }
            ],
            "total": 999,
            "itemCount": 1
        }"#;
        let snapshot: CartSnapshot = serde_json::from_str(json).unwrap();
        let restored = CartState::restore(snapshot).unwrap();

        assert!(restored.aggregates_recomputed);
        assert_eq!(restored.state.total(), Decimal::new(30, 0));
        assert_eq!(restored.state.item_count(), 3);
    }

    #[test]
    fn test_restore_rejects_duplicate_ids() {
        let json = r#"{
            "items": [
                { "id": 1, "title": "A", "price": 10, "quantity": 1 },
                { "id": 1, "title": "A", "price": 10, "quantity": 2 }
            ],
            "total": 30,
            "itemCount": 3
        }"#;
        let err = serde_json::from_str::<CartState>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate line item for product 1"));
    }

    #[test]
    fn test_zero_quantity_is_not_a_valid_line() {
        let json = r#"{
            "items": [{ "id": 1, "title": "A", "price": 10, "quantity": 0 }],
            "total": 0,
            "itemCount": 0
        }"#;
        assert!(serde_json::from_str::<CartState>(json).is_err());
    }

    #[test]
    fn test_aggregate_reports_overflow() {
        assert_eq!(
            aggregate([(Decimal::MAX, 1), (Decimal::MAX, 1)]),
            Err(CartStateError::Overflow)
        );
        assert_eq!(
            aggregate([(Decimal::MAX, 2)]),
            Err(CartStateError::Overflow)
        );
        assert_eq!(
            aggregate([(Decimal::new(250, 2), 4), (Decimal::ONE, u32::MAX)]),
            Ok((Decimal::from(u32::MAX) + Decimal::TEN, u64::from(u32::MAX) + 4))
        );
    }

    #[test]
    fn test_largest_prices_and_quantities_still_total() {
        let line = |id: i64| LineItem {
            id: ProductId::new(id),
            title: "A".to_string(),
            image: String::new(),
            description: String::new(),
            price: Price::MAX,
            quantity: NonZeroU32::MAX,
        };
        let snapshot = CartSnapshot {
            items: vec![line(1), line(2), line(3)],
            total: Decimal::ZERO,
            item_count: 0,
        };
        let restored = CartState::restore(snapshot).unwrap();
        let expected = Price::MAX.amount() * Decimal::from(u32::MAX) * Decimal::from(3);
        assert_eq!(restored.state.total(), expected);
        assert_eq!(restored.state.item_count(), 3 * u64::from(u32::MAX));
    }

    #[test]
    fn test_restore_rejects_price_above_max() {
        let json = r#"{
            "items": [{ "id": 1, "title": "A", "price": 1e20, "quantity": 4000000000 }],
            "total": 0,
            "itemCount": 0
        }"#;
        assert!(serde_json::from_str::<CartSnapshot>(json).is_err());
    }

    #[test]
    fn test_line_total() {
        let item = LineItem {
            id: ProductId::new(1),
            title: "A".to_string(),
            image: String::new(),
            description: String::new(),
            price: Price::from_cents(250),
            quantity: NonZeroU32::new(4).unwrap(),
        };
        assert_eq!(item.line_total(), Decimal::new(10, 0));
    }
}
