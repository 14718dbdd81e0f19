//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Persisted cart store (the cart state machine plus durable snapshots)
//! - `wishlist` - Persisted saved-for-later list
//! - `auth` - Mock email/password login
//! - `checkout` - Checkout form validation and simulated order placement
//! - `validation` - Per-field form error collection shared by auth and checkout
//!
//! Every persisted service follows the same contract: read its snapshot once
//! when opened, write the full snapshot synchronously after each mutation,
//! and keep running on in-memory state if a write fails.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod validation;
pub mod wishlist;

use std::fmt::Display;

use serde::Serialize;
use tracing::{error, warn};

use shopeasy_core::Storage;

pub use auth::{AuthError, AuthService};
pub use cart::CartStore;
pub use checkout::{CheckoutError, CheckoutForm, DEFAULT_COUNTRY, ValidCheckout, place_order};
pub use validation::FieldErrors;
pub use wishlist::WishlistStore;

/// How a store obtained its initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing was stored; started empty.
    Fresh,
    /// A stored snapshot was loaded.
    Restored,
    /// A snapshot existed but could not be read or parsed; started empty.
    Discarded,
}

/// Load the snapshot under `key`, falling back to `T::default()`.
///
/// A missing snapshot is silent. An unreadable or unparseable one is logged
/// at warn level before being ignored.
pub(crate) fn restore_snapshot<S, T, E>(
    storage: &S,
    key: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> (T, RestoreOutcome)
where
    S: Storage,
    T: Default,
    E: Display,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (T::default(), RestoreOutcome::Fresh),
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored snapshot, starting empty");
            return (T::default(), RestoreOutcome::Discarded);
        }
    };

    match parse(&raw) {
        Ok(value) => (value, RestoreOutcome::Restored),
        Err(e) => {
            warn!(key, error = %e, "Discarding unparseable snapshot, starting empty");
            (T::default(), RestoreOutcome::Discarded)
        }
    }
}

/// Write `value` under `key`. Returns `false` (after logging) on failure.
pub(crate) fn persist_snapshot<S, T>(storage: &S, key: &str, value: &T) -> bool
where
    S: Storage,
    T: Serialize,
{
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            error!(key, error = %e, "Failed to serialize snapshot");
            return false;
        }
    };

    match storage.set_item(key, &json) {
        Ok(()) => true,
        Err(e) => {
            error!(
                key,
                error = %e,
                "Failed to persist snapshot, keeping in-memory state for this session"
            );
            false
        }
    }
}
