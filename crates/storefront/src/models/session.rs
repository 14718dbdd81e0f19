//! Session-related types.
//!
//! Types persisted for the mock login flow, plus the fixed storage keys every
//! store writes its snapshot under.

use serde::{Deserialize, Serialize};

use shopeasy_core::{Email, UserId};

/// Logged-in user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
}

/// An authenticated session.
///
/// The token is an opaque random value; nothing verifies it server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: CurrentUser,
}

/// Storage keys for persisted client state.
pub mod keys {
    /// Key for the cart snapshot.
    pub const CART: &str = "shopeasy.cart";

    /// Key for the wishlist snapshot.
    pub const WISHLIST: &str = "shopeasy.wishlist";

    /// Key for the logged-in session.
    pub const SESSION: &str = "shopeasy.session";
}
