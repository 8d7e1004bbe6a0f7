//! Cart line item.

use serde::{Deserialize, Serialize};

use marketplace_core::{Price, ProductId};

use super::Product;

/// One product's entry in the cart.
///
/// Display fields (`name`, `price`, `image`, `stock`) are snapshots taken
/// when the product was first added; later adds of the same product only
/// change `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price in minor units.
    pub price: Price,
    /// Image URL, or an empty string when the product had none.
    #[serde(default)]
    pub image: String,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
    /// Stock ceiling at add-time. Advisory only.
    #[serde(default)]
    pub stock: u32,
}

impl CartLineItem {
    /// Build a new line for `product`.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.primary_image().unwrap_or_default().to_owned(),
            quantity,
            stock: product.stock,
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// Whether the quantity exceeds the stock snapshot.
    #[must_use]
    pub const fn exceeds_stock(&self) -> bool {
        self.quantity > self.stock
    }
}
