//! Integration tests for the online marketplace client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store over file storage across "reloads"
//! - `checkout_flow` - Login, cart, checkout and logout end to end
//! - `order_lookup` - Order ID validation and lookup response decoding
//!
//! Each test gets its own `tempfile` storage directory, removed when the
//! [`TestContext`] is dropped.

use std::path::Path;

use marketplace_core::{Price, ProductId};
use marketplace_storefront::FileStorage;
use marketplace_storefront::models::Product;
use tempfile::TempDir;

/// Per-test storage directory, deleted on drop.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a fresh, empty storage directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("marketplace-it-")
            .tempdir()
            .expect("create temp dir");
        Self { dir }
    }

    /// The storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Open a new storage handle, as a fresh page load would.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be opened.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn storage(&self) -> FileStorage {
        FileStorage::open(self.dir.path()).expect("open file storage")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A catalog product fixture.
#[must_use]
pub fn product(id: &str, name: &str, price: u64, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::new(price),
        stock,
        images: vec![format!("https://cdn.example.com/products/{id}.jpg")],
    }
}
