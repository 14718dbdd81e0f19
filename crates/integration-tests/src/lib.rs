//! Integration tests for `ShopEasy`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopeasy-integration-tests
//! ```
//!
//! Tests run against real file storage in a temp directory and a local fake
//! catalog server, so no network access is needed.
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart snapshots on disk across restarts
//! - `storefront_flow` - Catalog, wishlist, login and checkout end to end

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

use shopeasy_storefront::config::{CatalogConfig, StorefrontConfig};

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
}

impl Canned {
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// Minimal HTTP/1.1 server answering GETs from a fixed route table.
///
/// Unknown paths answer 404. Every request is counted so tests can observe
/// caching.
pub struct FakeCatalog {
    base_url: Url,
    hits: Arc<AtomicUsize>,
}

impl FakeCatalog {
    /// Bind to an ephemeral port and serve `routes` (path -> response).
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(routes: HashMap<String, Canned>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake catalog");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let hits = Arc::new(AtomicUsize::new(0));
        let routes = Arc::new(routes);

        let counter = Arc::clone(&hits);
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let counter = Arc::clone(&counter);
                tokio::spawn(async move {
                    let mut buf = vec![0_u8; 8192];
                    let Ok(n) = socket.read(&mut buf).await else {
                        return;
                    };
                    counter.fetch_add(1, Ordering::SeqCst);

                    let request = String::from_utf8_lossy(buf.get(..n).unwrap_or_default());
                    let path = request.split_whitespace().nth(1).unwrap_or("/");
                    let canned = routes.get(path).cloned().unwrap_or_else(|| Canned::status(404));

                    let response = format!(
                        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        canned.status,
                        canned.body.len(),
                        canned.body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}/")).expect("Invalid fake catalog URL"),
            hits,
        }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Number of requests served so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// A temp data directory plus a config pointing at it.
pub struct TestContext {
    pub dir: TempDir,
    pub config: StorefrontConfig,
}

impl TestContext {
    /// Config with a fresh data dir and the given catalog base URL.
    ///
    /// # Panics
    ///
    /// Panics if the temp directory cannot be created.
    #[must_use]
    pub fn new(catalog_url: &Url) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = StorefrontConfig {
            data_dir: dir.path().join("data"),
            catalog: CatalogConfig {
                base_url: catalog_url.clone(),
                cache_ttl: Duration::from_secs(60),
                cache_capacity: 100,
                timeout: Duration::from_secs(5),
            },
        };
        Self { dir, config }
    }
}

/// Catalog JSON for one product.
#[must_use]
pub fn product_json(id: i64, title: &str, price: f64, category: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("{title} description"),
        "category": category,
        "image": format!("https://fakestoreapi.com/img/{id}.jpg"),
        "rating": { "rate": 4.1, "count": 259 }
    })
}
