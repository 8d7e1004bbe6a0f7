//! Client-side shopping cart store.
//!
//! [`CartStore`] owns the ordered list of [`CartLineItem`]s for one storage
//! profile. Every mutation rewrites the whole list under a single key as a
//! JSON array; there are no partial writes.
//!
//! # Failure policy
//!
//! Persistence failures never reach the caller. A cart that cannot be read
//! or decoded loads as empty, and a failed write leaves the in-memory list
//! as it was (so memory keeps mirroring storage). The last failure of each
//! kind is kept in [`CartStore::last_load_error`] and
//! [`CartStore::last_save_error`] and logged at `warn`.
//!
//! # Stock
//!
//! The store does not enforce the `stock` ceiling, neither on merge nor on
//! update. Front ends call [`CartStore::check_add`] and
//! [`CartStore::check_update`] before mutating and refuse the change when
//! they return a [`StockError`].
//!
//! # Concurrency
//!
//! One logical writer is assumed. Another handle writing the same key is
//! not observed until [`CartStore::load`] is called again, and this
//! store's next write replaces whatever that handle wrote.

use thiserror::Error;
use tracing::instrument;

use marketplace_core::{Price, ProductId};

use crate::models::{CartLineItem, Product};
use crate::storage::{KeyValueStorage, StorageError, keys};

/// Reasons the cart could not be loaded from or saved to storage.
#[derive(Debug, Error)]
pub enum CartPersistError {
    /// Storage could not be read.
    #[error("failed to read cart: {0}")]
    Read(#[source] StorageError),

    /// Stored value is not a JSON array of line items.
    #[error("stored cart is corrupt: {0}")]
    Decode(#[source] serde_json::Error),

    /// Line items could not be serialized.
    #[error("failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),

    /// Storage could not be written.
    #[error("failed to write cart: {0}")]
    Write(#[source] StorageError),
}

/// A requested quantity the product's stock cannot cover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    /// The product has no units left.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// The line would hold more units than are in stock.
    #[error("only {available} {name} available in stock (requested {requested})")]
    Insufficient {
        name: String,
        available: u32,
        requested: u64,
    },
}

/// The shopping cart for one storage profile.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    items: Vec<CartLineItem>,
    last_load_error: Option<CartPersistError>,
    last_save_error: Option<CartPersistError>,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create a store under the default cart key and hydrate it.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, keys::CART)
    }

    /// Create a store under a custom key and hydrate it.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            items: Vec::new(),
            last_load_error: None,
            last_save_error: None,
        };
        store.load();
        store
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Find the line for a product.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| &line.product_id == product_id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The storage key this cart persists under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The failure from the most recent [`load`](Self::load), if it degraded.
    #[must_use]
    pub const fn last_load_error(&self) -> Option<&CartPersistError> {
        self.last_load_error.as_ref()
    }

    /// The failure from the most recent write, if it failed.
    #[must_use]
    pub const fn last_save_error(&self) -> Option<&CartPersistError> {
        self.last_save_error.as_ref()
    }

    /// Replace the in-memory list with the persisted one.
    ///
    /// A missing or empty value yields an empty cart. Unreadable or corrupt
    /// data also yields an empty cart and is recorded in
    /// [`last_load_error`](Self::last_load_error). Duplicate product lines
    /// in stored data are merged and zero-quantity lines dropped.
    pub fn load(&mut self) -> &[CartLineItem] {
        match self.read() {
            Ok(items) => {
                self.items = items;
                self.last_load_error = None;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to load cart, starting empty");
                self.items = Vec::new();
                self.last_load_error = Some(e);
            }
        }
        &self.items
    }

    /// Check that adding `quantity` units of `product` stays within stock.
    ///
    /// The quantity already in the cart counts toward the ceiling.
    ///
    /// # Errors
    ///
    /// Returns `StockError::OutOfStock` when the product has no stock and
    /// `StockError::Insufficient` when the merged line would exceed it.
    pub fn check_add(&self, product: &Product, quantity: u32) -> Result<(), StockError> {
        if product.stock == 0 {
            return Err(StockError::OutOfStock {
                name: product.name.clone(),
            });
        }
        let in_cart = self.get(&product.id).map_or(0, |line| line.quantity);
        let requested = u64::from(in_cart) + u64::from(quantity);
        if requested > u64::from(product.stock) {
            return Err(StockError::Insufficient {
                name: product.name.clone(),
                available: product.stock,
                requested,
            });
        }
        Ok(())
    }

    /// Check a quantity update against the line's stock snapshot.
    ///
    /// Removals (`quantity <= 0`) and products not in the cart always pass.
    ///
    /// # Errors
    ///
    /// Returns `StockError::Insufficient` when `quantity` exceeds the stock
    /// recorded on the line.
    pub fn check_update(&self, product_id: &ProductId, quantity: i64) -> Result<(), StockError> {
        let Ok(requested) = u64::try_from(quantity) else {
            return Ok(());
        };
        match self.get(product_id) {
            Some(line) if requested > u64::from(line.stock) => Err(StockError::Insufficient {
                name: line.name.clone(),
                available: line.stock,
                requested,
            }),
            _ => Ok(()),
        }
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product is already in the cart its quantity grows by
    /// `quantity` (unclamped); otherwise a new line is appended. A zero
    /// quantity changes nothing.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> &[CartLineItem] {
        if quantity == 0 {
            tracing::debug!("Ignoring add with zero quantity");
            return &self.items;
        }

        let mut next = self.items.clone();
        match next.iter_mut().find(|line| line.product_id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => next.push(CartLineItem::from_product(product, quantity)),
        }
        self.commit(next)
    }

    /// Remove the line for `product_id`. Absent products are a no-op.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: &ProductId) -> &[CartLineItem] {
        let next = self
            .items
            .iter()
            .filter(|line| &line.product_id != product_id)
            .cloned()
            .collect();
        self.commit(next)
    }

    /// Set the quantity of the line for `product_id`.
    ///
    /// `quantity <= 0` removes the line. Quantities beyond `u32::MAX` are
    /// stored as `u32::MAX`. Absent products are a no-op.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> &[CartLineItem] {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let next = self
            .items
            .iter()
            .map(|line| {
                if &line.product_id == product_id {
                    CartLineItem {
                        quantity,
                        ..line.clone()
                    }
                } else {
                    line.clone()
                }
            })
            .collect();
        self.commit(next)
    }

    /// Empty the cart and delete the persisted entry.
    ///
    /// The in-memory list is emptied even if the delete fails.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.items.clear();
        match self.storage.remove(&self.key) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                let e = CartPersistError::Write(e);
                tracing::warn!(key = %self.key, error = %e, "Failed to delete persisted cart");
                self.last_save_error = Some(e);
            }
        }
    }

    /// Σ `price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Σ `quantity` over all lines (units, not lines).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    fn read(&self) -> Result<Vec<CartLineItem>, CartPersistError> {
        let raw = self
            .storage
            .get(&self.key)
            .map_err(CartPersistError::Read)?;
        let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
            return Ok(Vec::new());
        };
        let stored: Vec<CartLineItem> =
            serde_json::from_str(&raw).map_err(CartPersistError::Decode)?;
        Ok(normalize(stored))
    }

    /// Persist `next` and adopt it as the in-memory list on success.
    fn commit(&mut self, next: Vec<CartLineItem>) -> &[CartLineItem] {
        let written = serde_json::to_string(&next)
            .map_err(CartPersistError::Encode)
            .and_then(|json| {
                self.storage
                    .set(&self.key, &json)
                    .map_err(CartPersistError::Write)
            });

        match written {
            Ok(()) => {
                self.items = next;
                self.last_save_error = None;
                tracing::debug!(
                    lines = self.items.len(),
                    units = self.item_count(),
                    "Cart saved"
                );
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to save cart");
                self.last_save_error = Some(e);
            }
        }
        &self.items
    }
}

/// Merge duplicate product lines (first occurrence keeps its position and
/// display fields) and drop zero-quantity lines.
fn normalize(stored: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut items: Vec<CartLineItem> = Vec::with_capacity(stored.len());
    for line in stored {
        if line.quantity == 0 {
            continue;
        }
        match items.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => items.push(line),
        }
    }
    items
}
