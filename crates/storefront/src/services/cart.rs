//! Persisted cart store.
//!
//! Wraps the pure [`CartState`] transitions with durable snapshots: the
//! stored cart is read once when the store is opened, and the full state is
//! written after every operation (one write per operation, no batching).
//!
//! Write failures never fail an operation. They are logged and the in-memory
//! state stays authoritative until the next successful write.

use std::error::Error;

use tracing::{debug, warn};

use shopeasy_core::cart::{CartCommand, CartSnapshot, CartState, OrderSummary, PromoCode};
use shopeasy_core::{Product, ProductId, Storage};

use crate::models::keys;

use super::{RestoreOutcome, persist_snapshot, restore_snapshot};

/// The shopper's cart, backed by [`Storage`].
#[derive(Debug)]
pub struct CartStore<S: Storage> {
    storage: S,
    state: CartState,
    restore: RestoreOutcome,
    dirty: bool,
}

impl<S: Storage> CartStore<S> {
    /// Open the store, restoring any snapshot found under [`keys::CART`].
    pub fn open(storage: S) -> Self {
        let (state, restore) = restore_snapshot(&storage, keys::CART, parse_cart);
        debug!(
            ?restore,
            items = state.items().len(),
            item_count = state.item_count(),
            "Cart opened"
        );

        Self {
            storage,
            state,
            restore,
            dirty: false,
        }
    }

    /// Current cart state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// How the initial state was obtained.
    #[must_use]
    pub const fn restore_outcome(&self) -> RestoreOutcome {
        self.restore
    }

    /// `true` if the most recent write to storage failed.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply a command and persist the result.
    ///
    /// A command whose totals would overflow is dropped with a warning and
    /// nothing is written.
    pub fn dispatch(&mut self, command: CartCommand) -> &CartState {
        debug!(?command, "Cart command");
        match self.state.try_apply(command) {
            Ok(next) => {
                self.state = next;
                self.dirty = !persist_snapshot(&self.storage, keys::CART, &self.state);
            }
            Err(e) => warn!(error = %e, "Cart command refused"),
        }
        &self.state
    }

    /// Add one unit of `product`.
    ///
    /// An existing line keeps the title and price it was first added with.
    pub fn add_item(&mut self, product: Product) -> &CartState {
        self.dispatch(CartCommand::AddItem(product))
    }

    /// Remove the line for `id`, if present.
    pub fn remove_item(&mut self, id: ProductId) -> &CartState {
        self.dispatch(CartCommand::RemoveItem(id))
    }

    /// Replace the quantity of the line for `id`; `quantity <= 0` removes it.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> &CartState {
        self.dispatch(CartCommand::SetQuantity { id, quantity })
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> &CartState {
        self.dispatch(CartCommand::Clear)
    }

    /// Price the cart as shown on the cart page (no tax).
    #[must_use]
    pub fn summary(&self, promo: Option<PromoCode>) -> OrderSummary {
        OrderSummary::for_cart(&self.state, promo)
    }

    /// The underlying storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

fn parse_cart(raw: &str) -> Result<CartState, Box<dyn Error + Send + Sync>> {
    let snapshot: CartSnapshot = serde_json::from_str(raw)?;
    let restored = CartState::restore(snapshot)?;
    if restored.aggregates_recomputed {
        warn!("Stored cart totals did not match its items, using recomputed totals");
    }
    Ok(restored.state)
}
