//! Domain models for storefront.
//!
//! - [`session`] - Mock login session and the storage keys used by stores
//! - [`order`] - Placed orders and the customer details captured at checkout

pub mod order;
pub mod session;

pub use order::{CustomerDetails, Order, OrderId, PaymentSummary};
pub use session::{CurrentUser, Session, keys};
