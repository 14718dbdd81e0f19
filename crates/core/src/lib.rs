//! ShopEasy Core - Shared types and cart state machine.
//!
//! This crate provides the types and pure logic used across all ShopEasy
//! components:
//! - `storefront` - Persisted stores, checkout, and the catalog client
//! - `cli` - Terminal front end
//!
//! # Architecture
//!
//! The core crate contains only types, traits, and pure transitions - no file
//! access, no HTTP clients. The one trait with an I/O contract, [`Storage`],
//! is implemented against the filesystem in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, and products
//! - [`cart`] - Cart state, commands, and order summary pricing
//! - [`wishlist`] - Saved-for-later products
//! - [`storage`] - Key/value storage trait and in-memory backend

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod storage;
pub mod types;
pub mod wishlist;

pub use storage::{MemoryStorage, Storage, StorageError};
pub use types::*;
pub use wishlist::WishlistState;
