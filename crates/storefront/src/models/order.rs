//! Placed orders.
//!
//! Orders are produced by the simulated checkout and returned to the caller.
//! They are never sent anywhere or stored.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopeasy_core::Email;
use shopeasy_core::cart::{LineItem, OrderSummary};

/// Order reference shown on the confirmation screen, e.g. `ORD-48213`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Upper bound (exclusive) of the numeric part.
    pub const MAX_NUMBER: u32 = 100_000;

    #[must_use]
    pub fn from_number(number: u32) -> Self {
        Self(format!("ORD-{number}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shipping details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// The only card data kept after checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub last4: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub summary: OrderSummary,
    pub customer: CustomerDetails,
    pub payment: PaymentSummary,
}

impl Order {
    /// Confirmation message shown after a successful checkout.
    #[must_use]
    pub fn confirmation(&self) -> String {
        format!("Order {} placed successfully!", self.id)
    }
}
