//! Unified error handling.
//!
//! Provides a unified `AppError` type for everything a storefront action can
//! fail with. Callers show [`AppError::user_message`] to the shopper and log
//! the full error.

use thiserror::Error;

use shopeasy_core::StorageError;
use shopeasy_core::cart::PromoError;

use crate::catalog::{CatalogError, ParseSortOrderError};
use crate::config::ConfigError;
use crate::services::{AuthError, CheckoutError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Durable storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Promo code was rejected.
    #[error(transparent)]
    Promo(#[from] PromoError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input from the shopper.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<ParseSortOrderError> for AppError {
    fn from(err: ParseSortOrderError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl AppError {
    /// Message suitable for showing to the shopper.
    ///
    /// Doesn't expose internal error details.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.to_string(),
            Self::Storage(_) => "Could not access saved data".to_string(),
            Self::Catalog(CatalogError::NotFound(_)) => "Product not found".to_string(),
            Self::Catalog(_) => "Failed to load products. Please try again later.".to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::Auth(AuthError::NotAuthenticated) => {
                "Please log in to complete your purchase".to_string()
            }
            Self::Auth(err) => err.to_string(),
            Self::Promo(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_errors_are_not_exposed() {
        let err = AppError::from(CatalogError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "upstream exploded at 10.0.0.3".to_string(),
        });
        assert_eq!(
            err.user_message(),
            "Failed to load products. Please try again later."
        );
        assert!(err.to_string().contains("10.0.0.3"));
    }

    #[test]
    fn test_not_found_message() {
        let err = AppError::from(CatalogError::NotFound("Product not found: 99".to_string()));
        assert_eq!(err.user_message(), "Product not found");
        assert_eq!(
            AppError::NotFound("Wishlist item 4".to_string()).user_message(),
            "Wishlist item 4 not found"
        );
    }

    #[test]
    fn test_promo_and_auth_messages() {
        assert_eq!(
            AppError::from(PromoError::Invalid).user_message(),
            "Invalid promo code."
        );
        assert_eq!(
            AppError::from(AuthError::NotAuthenticated).user_message(),
            "Please log in to complete your purchase"
        );
        assert_eq!(
            AppError::from(CheckoutError::EmptyCart).user_message(),
            "Your cart is empty"
        );
    }

    #[test]
    fn test_sort_order_error_is_bad_request() {
        let err: AppError = "cheapest"
            .parse::<crate::catalog::SortOrder>()
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
