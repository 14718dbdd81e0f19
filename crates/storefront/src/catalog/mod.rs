//! Product catalog API client.
//!
//! Talks JSON over `reqwest` 0.13 to a Fake Store style REST API:
//!
//! - `GET /products` and `GET /products/category/{category}` for listings
//! - `GET /products/{id}` for a single product
//! - `GET /products/categories` for category names
//!
//! Responses are cached using `moka` (5-minute TTL by default).

mod cache;
pub mod query;

use std::sync::Arc;

use moka::future::Cache;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use shopeasy_core::{Product, ProductId};

use crate::config::CatalogConfig;

use cache::{CacheKey, CacheValue};
pub use query::{ParseSortOrderError, ProductQuery, SortOrder};

/// Errors from the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("catalog returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The configured base URL cannot carry a path.
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(Url),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the product catalog API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("shopeasy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Build `base_url` + path segments, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.inner.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a URL and return the body text after checking the status.
    async fn get_text(&self, url: Url) -> Result<String, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(body.chars().take(200).collect()));
        }
        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Fetch the product listing, optionally for one category.
    ///
    /// A `limit` of zero returns everything; otherwise the listing is
    /// truncated to the first `limit` products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn fetch_products(
        &self,
        limit: usize,
        category: Option<&str>,
    ) -> Result<Vec<Product>, CatalogError> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        let key = CacheKey::Products {
            category: category.map(str::to_string),
        };

        let cached = self.inner.cache.get(&key).await;
        let products = if let Some(CacheValue::Products(products)) = cached {
            debug!("Cache hit for products");
            products
        } else {
            let url = match category {
                Some(category) => self.endpoint(&["products", "category", category])?,
                None => self.endpoint(&["products"])?,
            };
            let products: Arc<[Product]> = self.get_json::<Vec<Product>>(url).await?.into();
            debug!(count = products.len(), "Fetched products");
            self.inner
                .cache
                .insert(key, CacheValue::Products(Arc::clone(&products)))
                .await;
            products
        };

        let take = if limit == 0 { products.len() } else { limit };
        Ok(products.iter().take(take).cloned().collect())
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the API answers 404 or an empty
    /// body, or another error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = self.endpoint(&["products", &id.to_string()])?;
        let body = self.get_text(url).await.map_err(|e| match e {
            CatalogError::NotFound(_) => not_found(id),
            other => other,
        })?;

        // The API answers unknown ids with 200 and an empty or `null` body
        let product: Option<Product> = if body.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&body)?
        };
        let product = product.ok_or_else(|| not_found(id))?;

        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Fetch all category names.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories.to_vec());
        }

        let url = self.endpoint(&["products", "categories"])?;
        let categories: Vec<String> = self.get_json(url).await?;

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone().into()),
            )
            .await;

        Ok(categories)
    }

    /// Fetch a listing and apply client-side search and sort.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched.
    pub async fn search(
        &self,
        category: Option<&str>,
        query: &ProductQuery,
        limit: usize,
    ) -> Result<Vec<Product>, CatalogError> {
        let mut products = query.apply(self.fetch_products(0, category).await?);
        if limit > 0 {
            products.truncate(limit);
        }
        Ok(products)
    }

    /// Drop all cached responses.
    pub fn invalidate_cache(&self) {
        self.inner.cache.invalidate_all();
    }
}

fn not_found(id: ProductId) -> CatalogError {
    CatalogError::NotFound(format!("Product not found: {id}"))
}
