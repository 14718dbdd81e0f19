//! Wishlist commands.

use shopeasy_core::ProductId;
use shopeasy_storefront::{AppError, AppState, FileStorage, Result};

use crate::render;

pub fn show(app: &AppState<FileStorage>) {
    render::wishlist(app.wishlist().items());
}

pub async fn add(app: &mut AppState<FileStorage>, id: ProductId) -> Result<()> {
    let items = app.save_for_later(id).await?;
    render::wishlist(items);
    Ok(())
}

pub fn remove(app: &mut AppState<FileStorage>, id: ProductId) -> Result<()> {
    let removed = app
        .wishlist_mut()
        .remove(id)
        .ok_or_else(|| AppError::NotFound(format!("Wishlist item {id}")))?;
    render::message(&format!("Removed {} from your wishlist", removed.title));
    Ok(())
}

pub fn move_to_cart(app: &mut AppState<FileStorage>, id: ProductId) -> Result<()> {
    let cart = app.move_to_cart(id)?;
    render::cart_changed(cart);
    Ok(())
}
