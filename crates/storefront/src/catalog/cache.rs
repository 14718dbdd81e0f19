//! Cache types for catalog API responses.

use std::sync::Arc;

use shopeasy_core::{Product, ProductId};

/// Cache key for catalog responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    /// Full listing, optionally for one category. Limits are applied after lookup.
    Products { category: Option<String> },
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Arc<[Product]>),
    Categories(Arc<[String]>),
}
