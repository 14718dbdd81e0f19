//! Catalog browsing commands.

use shopeasy_core::ProductId;
use shopeasy_storefront::catalog::{ProductQuery, SortOrder};
use shopeasy_storefront::{AppState, FileStorage, Result};

use crate::render;

pub async fn list(
    app: &AppState<FileStorage>,
    category: Option<&str>,
    search: Option<String>,
    sort: Option<&str>,
    limit: usize,
) -> Result<()> {
    let query = ProductQuery {
        search,
        sort: sort.map(str::parse::<SortOrder>).transpose()?,
    };
    let products = app.catalog().search(category, &query, limit).await?;
    render::products(&products);
    Ok(())
}

pub async fn show(app: &AppState<FileStorage>, id: ProductId) -> Result<()> {
    let product = app.catalog().fetch_product(id).await?;
    render::product(&product);
    Ok(())
}

pub async fn categories(app: &AppState<FileStorage>) -> Result<()> {
    let categories = app.catalog().fetch_categories().await?;
    render::categories(&categories);
    Ok(())
}
