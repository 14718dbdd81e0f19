//! Persisted wishlist ("saved for later") store.

use tracing::debug;

use shopeasy_core::{Product, ProductId, Storage, WishlistState};

use crate::models::keys;

use super::{CartStore, RestoreOutcome, persist_snapshot, restore_snapshot};

/// Saved products, backed by [`Storage`] under [`keys::WISHLIST`].
///
/// Mutations that change nothing skip the write.
#[derive(Debug)]
pub struct WishlistStore<S: Storage> {
    storage: S,
    state: WishlistState,
    restore: RestoreOutcome,
    dirty: bool,
}

impl<S: Storage> WishlistStore<S> {
    pub fn open(storage: S) -> Self {
        let (state, restore) =
            restore_snapshot(&storage, keys::WISHLIST, WishlistState::from_json);
        debug!(?restore, items = state.len(), "Wishlist opened");

        Self {
            storage,
            state,
            restore,
            dirty: false,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        self.state.items()
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.state.contains(id)
    }

    #[must_use]
    pub const fn restore_outcome(&self) -> RestoreOutcome {
        self.restore
    }

    /// `true` if the most recent write to storage failed.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Save a product. No-op if it is already saved.
    pub fn add(&mut self, product: Product) {
        if self.state.add(product) {
            self.save();
        }
    }

    /// Remove a saved product, returning it. No-op if absent.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let removed = self.state.remove(id);
        if removed.is_some() {
            self.save();
        }
        removed
    }

    /// Save the product if absent, remove it if present.
    ///
    /// Returns `true` when the product is saved afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        if self.state.contains(product.id) {
            self.remove(product.id);
            false
        } else {
            self.add(product);
            true
        }
    }

    pub fn clear(&mut self) {
        if !self.state.is_empty() {
            self.state = WishlistState::new();
            self.save();
        }
    }

    /// Add a saved product to `cart`, then drop it from the wishlist.
    ///
    /// Returns `false` (and touches nothing) if the product is not saved.
    pub fn move_to_cart<C: Storage>(&mut self, id: ProductId, cart: &mut CartStore<C>) -> bool {
        let Some(product) = self.state.get(id).cloned() else {
            return false;
        };
        debug!(product_id = %id, "Moving wishlist item to cart");
        cart.add_item(product);
        self.remove(id);
        true
    }

    fn save(&mut self) {
        self.dirty = !persist_snapshot(&self.storage, keys::WISHLIST, &self.state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use shopeasy_core::{MemoryStorage, Price};

    use super::*;

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(1000),
            image: String::new(),
            description: String::new(),
            category: "jewelery".to_string(),
            rating: None,
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = WishlistStore::open(MemoryStorage::new());
        wishlist.add(product(1));
        wishlist.add(product(1));
        assert_eq!(wishlist.items().len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut wishlist = WishlistStore::open(MemoryStorage::new());
        assert!(wishlist.toggle(product(3)));
        assert!(wishlist.contains(ProductId::new(3)));
        assert!(!wishlist.toggle(product(3)));
        assert!(!wishlist.contains(ProductId::new(3)));
    }

    #[test]
    fn test_persists_across_reopen() {
        let storage = MemoryStorage::new();
        let mut wishlist = WishlistStore::open(storage.clone());
        wishlist.add(product(1));
        wishlist.add(product(2));
        wishlist.remove(ProductId::new(1));
        drop(wishlist);

        let reopened = WishlistStore::open(storage);
        assert_eq!(reopened.restore_outcome(), RestoreOutcome::Restored);
        assert_eq!(reopened.items().len(), 1);
        assert_eq!(reopened.items()[0].id, ProductId::new(2));
    }

    #[test]
    fn test_corrupt_wishlist_is_discarded() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::WISHLIST, "[{").unwrap();
        let wishlist = WishlistStore::open(storage);
        assert_eq!(wishlist.restore_outcome(), RestoreOutcome::Discarded);
        assert!(wishlist.items().is_empty());
    }

    #[test]
    fn test_move_to_cart() {
        let storage = MemoryStorage::new();
        let mut wishlist = WishlistStore::open(storage.clone());
        let mut cart = CartStore::open(storage);
        wishlist.add(product(7));

        assert!(wishlist.move_to_cart(ProductId::new(7), &mut cart));
        assert!(!wishlist.contains(ProductId::new(7)));
        assert_eq!(cart.state().items().len(), 1);
        assert_eq!(cart.state().items()[0].id, ProductId::new(7));
    }

    #[test]
    fn test_move_missing_is_noop() {
        let storage = MemoryStorage::new();
        let mut wishlist = WishlistStore::open(storage.clone());
        let mut cart = CartStore::open(storage.clone());

        assert!(!wishlist.move_to_cart(ProductId::new(9), &mut cart));
        assert!(cart.state().is_empty());
        assert!(storage.get_item(keys::CART).unwrap().is_none());
    }

    #[test]
    fn test_clear() {
        let mut wishlist = WishlistStore::open(MemoryStorage::new());
        wishlist.add(product(1));
        wishlist.clear();
        assert!(wishlist.items().is_empty());
    }
}
