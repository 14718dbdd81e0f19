//! Shopping cart state machine.
//!
//! A [`CartState`] holds line items unique by product id plus two aggregates
//! (`total`, `item_count`) derived from them. The only transitions are the
//! four [`CartCommand`] variants, applied through [`CartState::apply`], which
//! is pure and does no I/O. Persistence lives in the storefront crate.
//!
//! # Example
//!
//! ```
//! use shopeasy_core::cart::{CartCommand, CartState};
//! use shopeasy_core::{Price, Product, ProductId};
//!
//! let mug = Product {
//!     id: ProductId::new(1),
//!     title: "Mug".to_string(),
//!     price: Price::from_cents(1000),
//!     image: String::new(),
//!     description: String::new(),
//!     category: String::new(),
//!     rating: None,
//! };
//!
//! let cart = CartState::new()
//!     .apply(CartCommand::AddItem(mug.clone()))
//!     .apply(CartCommand::AddItem(mug));
//! assert_eq!(cart.item_count(), 2);
//! ```

mod command;
mod state;
pub mod summary;

pub use command::CartCommand;
pub use state::{CartSnapshot, CartState, CartStateError, LineItem, Restored};
pub use summary::{OrderSummary, PromoCode, PromoError, TAX_RATE};
