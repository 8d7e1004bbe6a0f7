//! Key/value persistence for client-side state.
//!
//! Everything the storefront keeps between "page loads" (the cart, the auth
//! token, the cached user profile) lives under a handful of string keys in a
//! [`KeyValueStorage`]. Values are JSON text; the storage itself is
//! schema-agnostic.
//!
//! # Implementations
//!
//! - [`MemoryStorage`] - process-local map, shareable between store handles
//! - [`FileStorage`] - one file per key inside a directory
//!
//! All methods take `&self`; implementations use interior mutability.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be represented by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend is not usable (e.g. a poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A synchronous string key/value store.
pub trait KeyValueStorage {
    /// Read a value. Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Well-known storage keys.
pub mod keys {
    /// Key holding the JSON array of cart line items.
    pub const CART: &str = "online_marketplace_cart";

    /// Key holding the bearer token issued at login.
    pub const ACCESS_TOKEN: &str = "online_marketplace_access_token";

    /// Key holding the JSON user profile captured at login.
    pub const USER: &str = "online_marketplace_user";
}
