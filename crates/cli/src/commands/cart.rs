//! Cart commands.

use shopeasy_core::ProductId;
use shopeasy_core::cart::PromoCode;
use shopeasy_storefront::{AppState, FileStorage, Result};

use crate::render;

pub fn show(app: &AppState<FileStorage>, promo: Option<&str>) -> Result<()> {
    let promo = promo.map(PromoCode::parse).transpose()?;
    let cart = app.cart();
    render::cart(cart.state(), &cart.summary(promo));
    Ok(())
}

pub async fn add(app: &mut AppState<FileStorage>, id: ProductId) -> Result<()> {
    let cart = app.add_to_cart(id).await?;
    render::cart_changed(cart);
    Ok(())
}

pub fn remove(app: &mut AppState<FileStorage>, id: ProductId) {
    render::cart_changed(app.cart_mut().remove_item(id));
}

pub fn set(app: &mut AppState<FileStorage>, id: ProductId, quantity: i64) {
    render::cart_changed(app.cart_mut().set_quantity(id, quantity));
}

pub fn clear(app: &mut AppState<FileStorage>) {
    render::cart_changed(app.cart_mut().clear());
}
