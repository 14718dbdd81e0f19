//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Customer rating summary attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rating {
    /// Average rating, 0.0 to 5.0.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

/// A product as returned by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Product {
    /// Average rating, treating a missing rating as zero.
    #[must_use]
    pub fn rating_rate(&self) -> f64 {
        self.rating.map_or(0.0, |r| r.rate)
    }
}
