//! Checkout: form validation and simulated order placement.
//!
//! No payment is taken and no order is stored. A successful checkout returns
//! an [`Order`] for the confirmation screen and empties the cart.

use std::sync::LazyLock;

use chrono::Utc;
use rand::Rng;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{info, instrument};

use shopeasy_core::Storage;
use shopeasy_core::cart::{OrderSummary, PromoCode};

use crate::models::{CustomerDetails, Order, OrderId, PaymentSummary};

use super::{CartStore, FieldErrors};

/// Country preselected on the form.
pub const DEFAULT_COUNTRY: &str = "United States";

/// Card expiry, `MM/YY`.
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").expect("Invalid regex"));

/// Card number once whitespace is removed.
static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{16}$").expect("Invalid regex"));

static CVV_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3,4}$").expect("Invalid regex"));

/// Errors from placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Please correct the highlighted fields: {0}")]
    Invalid(FieldErrors),
}

/// Shipping and payment details as entered by the shopper.
///
/// Card number and CVV are held as secrets and never logged.
#[derive(Debug)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub card_name: String,
    pub card_number: SecretString,
    pub exp_date: String,
    pub cvv: SecretString,
}

/// A form that passed validation, reduced to what an order keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCheckout {
    pub customer: CustomerDetails,
    pub payment: PaymentSummary,
}

impl CheckoutForm {
    /// Validate every field, collecting one message per failing field.
    ///
    /// Field names match the checkout form (`firstName`, `cardNumber`, ...).
    ///
    /// # Errors
    ///
    /// Returns the per-field messages if any field is invalid.
    pub fn validate(&self) -> Result<ValidCheckout, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require("firstName", &self.first_name, "First name is required");
        errors.require("lastName", &self.last_name, "Last name is required");

        let email = if errors.require("email", &self.email, "Email is required") {
            None
        } else {
            let parsed = shopeasy_core::Email::parse(self.email.trim()).ok();
            if parsed.is_none() {
                errors.add("email", "Email is invalid");
            }
            parsed
        };

        errors.require("address", &self.address, "Address is required");
        errors.require("city", &self.city, "City is required");
        errors.require("state", &self.state, "State is required");
        errors.require("zip", &self.zip, "ZIP code is required");
        errors.require("cardName", &self.card_name, "Name on card is required");

        let card_digits: String = self
            .card_number
            .expose_secret()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if card_digits.is_empty() {
            errors.add("cardNumber", "Card number is required");
        } else if !CARD_NUMBER_RE.is_match(&card_digits) {
            errors.add("cardNumber", "Card number is invalid");
        }

        if !errors.require("expDate", &self.exp_date, "Expiration date is required")
            && !EXPIRY_RE.is_match(self.exp_date.trim())
        {
            errors.add("expDate", "Use format MM/YY");
        }

        let cvv = self.cvv.expose_secret().trim();
        if cvv.is_empty() {
            errors.add("cvv", "CVV is required");
        } else if !CVV_RE.is_match(cvv) {
            errors.add("cvv", "CVV is invalid");
        }

        let Some(email) = email else {
            return Err(errors);
        };
        let last4 = card_digits
            .get(card_digits.len().saturating_sub(4)..)
            .unwrap_or_default()
            .to_string();

        errors.into_result(ValidCheckout {
            customer: CustomerDetails {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                email,
                address: self.address.trim().to_string(),
                city: self.city.trim().to_string(),
                state: self.state.trim().to_string(),
                zip: self.zip.trim().to_string(),
                country: country_or_default(&self.country),
            },
            payment: PaymentSummary { last4 },
        })
    }
}

fn country_or_default(country: &str) -> String {
    let country = country.trim();
    if country.is_empty() {
        DEFAULT_COUNTRY.to_string()
    } else {
        country.to_string()
    }
}

/// Place an order for everything in `cart`.
///
/// On success the cart is cleared and the placed order returned. The order
/// total includes checkout tax.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if there is nothing to buy, or
/// `CheckoutError::Invalid` if the form fails validation. The cart is left
/// untouched in both cases.
#[instrument(skip_all, fields(items = cart.state().items().len()))]
pub fn place_order<S: Storage>(
    cart: &mut CartStore<S>,
    form: &CheckoutForm,
    promo: Option<PromoCode>,
) -> Result<Order, CheckoutError> {
    if cart.state().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let valid = form.validate().map_err(CheckoutError::Invalid)?;

    let order = Order {
        id: OrderId::from_number(rand::rng().random_range(0..OrderId::MAX_NUMBER)),
        placed_at: Utc::now(),
        items: cart.state().items().to_vec(),
        summary: OrderSummary::for_checkout(cart.state(), promo),
        customer: valid.customer,
        payment: valid.payment,
    };
    cart.clear();

    info!(order_id = %order.id, total = %order.summary.total, "Order placed");
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use shopeasy_core::{MemoryStorage, Price, Product, ProductId};

    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip: "10001".to_string(),
            country: String::new(),
            card_name: "Ada Lovelace".to_string(),
            card_number: secret("4242 4242 4242 4242"),
            exp_date: "09/28".to_string(),
            cvv: secret("123"),
        }
    }

    fn cart_with_item() -> CartStore<MemoryStorage> {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(Product {
            id: ProductId::new(1),
            title: "Backpack".to_string(),
            price: Price::from_cents(10995),
            image: String::new(),
            description: String::new(),
            category: "men's clothing".to_string(),
            rating: None,
        });
        cart
    }

    #[test]
    fn test_valid_form() {
        let valid = valid_form().validate().unwrap();
        assert_eq!(valid.payment.last4, "4242");
        assert_eq!(valid.customer.country, "United States");
        assert_eq!(valid.customer.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_required_messages() {
        let form = CheckoutForm {
            first_name: " ".to_string(),
            last_name: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            country: String::new(),
            card_name: String::new(),
            card_number: secret(""),
            exp_date: String::new(),
            cvv: secret(""),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 11);
        assert_eq!(errors.get("firstName"), Some("First name is required"));
        assert_eq!(errors.get("zip"), Some("ZIP code is required"));
        assert_eq!(errors.get("cardName"), Some("Name on card is required"));
        assert_eq!(errors.get("cardNumber"), Some("Card number is required"));
        assert_eq!(errors.get("expDate"), Some("Expiration date is required"));
        assert_eq!(errors.get("cvv"), Some("CVV is required"));
    }

    #[test]
    fn test_format_messages() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        form.card_number = secret("4242 4242");
        form.exp_date = "13/28".to_string();
        form.cvv = secret("12a");

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is invalid"));
        assert_eq!(errors.get("cardNumber"), Some("Card number is invalid"));
        assert_eq!(errors.get("expDate"), Some("Use format MM/YY"));
        assert_eq!(errors.get("cvv"), Some("CVV is invalid"));
        assert_eq!(errors.get("firstName"), None);
    }

    #[test]
    fn test_expiry_months() {
        for ok in ["01/25", "12/99"] {
            assert!(EXPIRY_RE.is_match(ok), "{ok}");
        }
        for bad in ["00/25", "1/25", "12/2025", "12-25"] {
            assert!(!EXPIRY_RE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn test_four_digit_cvv() {
        let mut form = valid_form();
        form.cvv = secret("1234");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_card() {
        let rendered = format!("{:?}", valid_form());
        assert!(!rendered.contains("4242"));
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let err = place_order(&mut cart, &valid_form(), None).unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[test]
    fn test_invalid_form_keeps_cart() {
        let mut cart = cart_with_item();
        let mut form = valid_form();
        form.zip = String::new();

        let err = place_order(&mut cart, &form, None).unwrap_err();
        assert!(matches!(err, CheckoutError::Invalid(ref e) if e.get("zip").is_some()));
        assert_eq!(cart.state().item_count(), 1);
    }

    #[test]
    fn test_successful_checkout_clears_cart() {
        let mut cart = cart_with_item();
        let order = place_order(&mut cart, &valid_form(), Some(PromoCode::Discount10)).unwrap();

        assert!(order.id.as_str().starts_with("ORD-"));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.summary.subtotal, Decimal::new(10995, 2));
        assert_eq!(order.summary.shipping, Decimal::ZERO);
        assert_eq!(order.payment.last4, "4242");
        assert!(cart.state().is_empty());
    }

    #[test]
    fn test_order_total_includes_tax() {
        let mut cart = cart_with_item();
        let order = place_order(&mut cart, &valid_form(), None).unwrap();

        assert_eq!(order.summary.tax, Decimal::new(76965, 4));
        assert_eq!(order.summary.total, Decimal::new(1_176_465, 4));
    }
}
