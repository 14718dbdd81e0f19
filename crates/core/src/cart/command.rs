//! Cart commands and the pure transition function.

use std::num::NonZeroU32;

use crate::types::{Product, ProductId};

use super::state::{CartState, CartStateError, LineItem};

/// A mutation request against a [`CartState`].
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Append the product with quantity one, or increment an existing line.
    AddItem(Product),
    /// Drop the line for this product. Absent ids are ignored.
    RemoveItem(ProductId),
    /// Replace the quantity of an existing line. Non-positive removes it;
    /// absent ids are ignored.
    SetQuantity { id: ProductId, quantity: i64 },
    /// Reset to the empty cart.
    Clear,
}

impl CartState {
    /// Apply one command, returning the next state.
    ///
    /// A transition whose totals would overflow is refused and the current
    /// state is returned unchanged. See [`CartState::try_apply`].
    #[must_use]
    pub fn apply(self, command: CartCommand) -> Self {
        self.try_apply(command).unwrap_or(self)
    }

    /// Apply one command, recomputing aggregates from the resulting items.
    ///
    /// # Errors
    ///
    /// Returns [`CartStateError::Overflow`] if the next state's totals do not
    /// fit. `self` is left untouched.
    pub fn try_apply(&self, command: CartCommand) -> Result<Self, CartStateError> {
        let mut next = self.clone();
        match command {
            CartCommand::AddItem(product) => next.add_item(&product),
            CartCommand::RemoveItem(id) => next.remove_item(id),
            CartCommand::SetQuantity { id, quantity } => match quantity_from(quantity) {
                Some(quantity) => next.set_quantity(id, quantity),
                None => next.remove_item(id),
            },
            CartCommand::Clear => return Ok(Self::new()),
        }
        next.recompute()?;
        Ok(next)
    }

    fn add_item(&mut self, product: &Product) {
        let items = self.items_mut();
        if let Some(existing) = items.iter_mut().find(|item| item.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
        } else {
            items.push(LineItem::from_product(product));
        }
    }

    fn remove_item(&mut self, id: ProductId) {
        self.items_mut().retain(|item| item.id != id);
    }

    fn set_quantity(&mut self, id: ProductId, quantity: NonZeroU32) {
        if let Some(existing) = self.items_mut().iter_mut().find(|item| item.id == id) {
            existing.quantity = quantity;
        }
    }
}

/// `None` for non-positive requests; values past `u32::MAX` saturate.
fn quantity_from(requested: i64) -> Option<NonZeroU32> {
    if requested <= 0 {
        return None;
    }
    NonZeroU32::new(u32::try_from(requested).unwrap_or(u32::MAX))
}
