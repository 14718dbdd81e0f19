//! Application state shared across storefront actions.

use shopeasy_core::cart::{CartState, PromoCode};
use shopeasy_core::{Product, ProductId, Storage};
use tracing::info;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::models::Order;
use crate::services::{AuthService, CartStore, CheckoutForm, WishlistStore, place_order};
use crate::storage::FileStorage;

/// Everything a storefront session needs: configuration, the catalog client
/// and the three persisted stores, all sharing one storage backend.
#[derive(Debug)]
pub struct AppState<S: Storage + Clone> {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: CartStore<S>,
    wishlist: WishlistStore<S>,
    auth: AuthService<S>,
}

impl AppState<FileStorage> {
    /// Create state backed by files in `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built.
    pub fn from_config(config: StorefrontConfig) -> Result<Self> {
        let storage = FileStorage::new(&config.data_dir);
        Self::new(config, storage)
    }
}

impl<S: Storage + Clone> AppState<S> {
    /// Create a new application state over `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built.
    pub fn new(config: StorefrontConfig, storage: S) -> Result<Self> {
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            cart: CartStore::open(storage.clone()),
            wishlist: WishlistStore::open(storage.clone()),
            auth: AuthService::open(storage),
            catalog,
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore<S> {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore<S> {
        &mut self.wishlist
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthService<S> {
        &self.auth
    }

    pub const fn auth_mut(&mut self) -> &mut AuthService<S> {
        &mut self.auth
    }

    // =========================================================================
    // Composite Actions
    // =========================================================================

    /// Look a product up in the catalog and add one unit to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the product cannot be fetched.
    pub async fn add_to_cart(&mut self, id: ProductId) -> Result<&CartState> {
        let product = self.catalog.fetch_product(id).await?;
        Ok(self.cart.add_item(product))
    }

    /// Look a product up in the catalog and save it to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the product cannot be fetched.
    pub async fn save_for_later(&mut self, id: ProductId) -> Result<&[Product]> {
        let product = self.catalog.fetch_product(id).await?;
        self.wishlist.add(product);
        Ok(self.wishlist.items())
    }

    /// Move a saved product into the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the product is not on the wishlist.
    pub fn move_to_cart(&mut self, id: ProductId) -> Result<&CartState> {
        if !self.wishlist.move_to_cart(id, &mut self.cart) {
            return Err(AppError::NotFound(format!("Wishlist item {id}")));
        }
        Ok(self.cart.state())
    }

    /// Place an order for the cart. Requires a logged-in session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` when logged out, otherwise any
    /// [`CheckoutError`](crate::services::CheckoutError).
    pub fn checkout(&mut self, form: &CheckoutForm, promo: Option<PromoCode>) -> Result<Order> {
        let session = self.auth.require_session()?;
        info!(user = %session.user.email, "Checkout started");
        Ok(place_order(&mut self.cart, form, promo)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use shopeasy_core::{MemoryStorage, Price};

    use super::*;
    use crate::services::AuthError;

    fn state() -> AppState<MemoryStorage> {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        AppState::new(config, MemoryStorage::new()).unwrap()
    }

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(2500),
            image: String::new(),
            description: String::new(),
            category: "electronics".to_string(),
            rating: None,
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
            country: "United States".to_string(),
            card_name: "Ada Lovelace".to_string(),
            card_number: SecretString::from("1111222233334444".to_string()),
            exp_date: "01/30".to_string(),
            cvv: SecretString::from("999".to_string()),
        }
    }

    #[test]
    fn test_move_to_cart_unknown_item() {
        let mut state = state();
        assert!(matches!(
            state.move_to_cart(ProductId::new(5)),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_move_to_cart() {
        let mut state = state();
        state.wishlist_mut().add(product(5));
        let cart = state.move_to_cart(ProductId::new(5)).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert!(state.wishlist().items().is_empty());
    }

    #[test]
    fn test_checkout_requires_login() {
        let mut state = state();
        state.cart_mut().add_item(product(1));

        let err = state.checkout(&form(), None).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::NotAuthenticated)));
        assert_eq!(state.cart().state().item_count(), 1);

        state
            .auth_mut()
            .login("ada@example.com", &SecretString::from("secret1".to_string()))
            .unwrap();
        let order = state.checkout(&form(), None).unwrap();
        assert_eq!(order.payment.last4, "4444");
        assert!(state.cart().state().is_empty());
    }
}
