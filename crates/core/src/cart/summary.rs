//! Order summary pricing: promo discount, shipping and checkout tax.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::format_usd;

use super::CartState;

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Flat shipping charge below the free-shipping threshold.
pub const FLAT_SHIPPING: Decimal = Decimal::from_parts(599, 0, 0, false, 2);

/// Sales tax charged at checkout (7%). The cart page shows no tax.
pub const TAX_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

/// Errors from promo code entry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PromoError {
    #[error("Invalid promo code.")]
    Invalid,
}

/// Promo codes accepted at the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromoCode {
    /// `DISCOUNT10`: ten percent off the subtotal.
    Discount10,
}

impl PromoCode {
    /// Parse a code as typed by the shopper. Matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::Invalid`] for unknown codes.
    pub fn parse(code: &str) -> Result<Self, PromoError> {
        if code.trim().eq_ignore_ascii_case("discount10") {
            Ok(Self::Discount10)
        } else {
            Err(PromoError::Invalid)
        }
    }

    /// Fraction of the subtotal taken off.
    #[must_use]
    pub const fn rate(self) -> Decimal {
        match self {
            Self::Discount10 => Decimal::from_parts(10, 0, 0, false, 2),
        }
    }
}

/// Amounts shown in the cart and checkout order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub promo: Option<PromoCode>,
}

impl OrderSummary {
    /// Price a cart for the cart page, optionally applying a promo code.
    #[must_use]
    pub fn for_cart(cart: &CartState, promo: Option<PromoCode>) -> Self {
        let subtotal = cart.total();
        let discount = promo.map_or(Decimal::ZERO, |code| subtotal * code.rate());
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING
        };

        Self {
            subtotal,
            discount,
            shipping,
            tax: Decimal::ZERO,
            total: subtotal - discount + shipping,
            promo,
        }
    }

    /// Price a cart at checkout: the cart page amounts plus [`TAX_RATE`] on
    /// the discounted subtotal.
    #[must_use]
    pub fn for_checkout(cart: &CartState, promo: Option<PromoCode>) -> Self {
        let summary = Self::for_cart(cart, promo);
        let tax = (summary.subtotal - summary.discount) * TAX_RATE;
        Self {
            tax,
            total: summary.total + tax,
            ..summary
        }
    }

    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// Human-readable lines, e.g. for a terminal receipt.
    #[must_use]
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![("Subtotal", format_usd(self.subtotal))];
        if !self.discount.is_zero() {
            lines.push(("Discount", format!("-{}", format_usd(self.discount))));
        }
        lines.push((
            "Shipping",
            if self.is_free_shipping() {
                "Free".to_string()
            } else {
                format_usd(self.shipping)
            },
        ));
        if !self.tax.is_zero() {
            lines.push(("Tax", format_usd(self.tax)));
        }
        lines.push(("Total", format_usd(self.total)));
        lines
    }
}
