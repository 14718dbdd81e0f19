//! `ShopEasy` storefront library.
//!
//! Everything above the pure cart model: durable file storage, the persisted
//! cart/wishlist/session stores, checkout, the catalog API client, and the
//! configuration that wires them together. The `shopeasy` CLI is a thin shell
//! over [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
pub use state::AppState;
pub use storage::FileStorage;
