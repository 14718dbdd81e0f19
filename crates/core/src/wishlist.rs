//! Saved-for-later products.

use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// Products the shopper has hearted, unique by id, in the order they were saved.
///
/// Serializes as a bare array of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WishlistState {
    items: Vec<Product>,
}

impl WishlistState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|p| p.id == id)
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Save a product. Returns `false` if it was already saved.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.items.push(product);
        true
    }

    /// Remove a product. Returns the removed entry, if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let index = self.items.iter().position(|p| p.id == id)?;
        Some(self.items.remove(index))
    }

    /// Drop duplicate ids, keeping the first occurrence.
    fn dedup(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.items.retain(|p| seen.insert(p.id));
    }

    /// Parse a stored wishlist, dropping duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if `json` is not a product array.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut state: Self = serde_json::from_str(json)?;
        state.dedup();
        Ok(state)
    }
}
