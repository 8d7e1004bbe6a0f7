//! Catalog product descriptor.

use serde::{Deserialize, Serialize};

use marketplace_core::{Price, ProductId};

/// A product as returned by the catalog endpoints.
///
/// Only the fields the cart needs are modelled; unknown backend fields are
/// ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Backend document id.
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Units available for sale.
    #[serde(default)]
    pub stock: u32,
    /// Image URLs, primary image first.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// The primary image URL, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
