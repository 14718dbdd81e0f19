//! Client-side search and sort over a fetched product listing.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use shopeasy_core::Product;

/// Error returned when parsing an unknown sort order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort order: {0} (expected price-asc, price-desc, name-asc, name-desc or rating-desc)")]
pub struct ParseSortOrderError(String);

/// Listing sort orders offered on the products page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    /// Highest rated first; unrated products count as zero.
    RatingDesc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::RatingDesc => "rating-desc",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::NameAsc => compare_titles(a, b),
            Self::NameDesc => compare_titles(b, a),
            Self::RatingDesc => b.rating_rate().total_cmp(&a.rating_rate()),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name-asc" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            "rating-desc" => Ok(Self::RatingDesc),
            other => Err(ParseSortOrderError(other.to_string())),
        }
    }
}

/// Case-insensitive title order, ties broken by the raw title.
fn compare_titles(a: &Product, b: &Product) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

/// Search and sort applied to a listing after it is fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive substring matched against title, description and category.
    pub search: Option<String>,
    pub sort: Option<SortOrder>,
}

impl ProductQuery {
    /// `true` if `product` passes the search filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let Some(needle) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            return true;
        };
        let needle = needle.to_lowercase();
        [&product.title, &product.description, &product.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Filter then sort. The sort is stable, so equal keys keep catalog order.
    #[must_use]
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let mut products: Vec<Product> =
            products.into_iter().filter(|p| self.matches(p)).collect();
        if let Some(sort) = self.sort {
            products.sort_by(|a, b| sort.compare(a, b));
        }
        products
    }
}
