//! Subcommand implementations.
//!
//! Each function performs one storefront action against [`AppState`] and
//! hands the result to [`crate::render`].
//!
//! [`AppState`]: shopeasy_storefront::AppState

pub mod account;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod wishlist;
