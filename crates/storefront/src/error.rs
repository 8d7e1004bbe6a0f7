//! Unified error handling.
//!
//! Provides a unified `AppError` type for front ends (the CLI) that drive
//! several services in one command. The cart store itself never returns
//! errors; see [`CartStore`](crate::services::CartStore).

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::{
    AuthError, CheckoutError, OrderLookupError, ProductField, StockError, ValidationErrors,
};
use crate::storage::StorageError;

/// Application-level error type for the storefront client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend could not be opened or used.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Session operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout could not proceed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// A cart change would exceed the product's stock.
    #[error("Stock error: {0}")]
    Stock(#[from] StockError),

    /// Order lookup found nothing.
    #[error("Order lookup error: {0}")]
    OrderLookup(#[from] OrderLookupError),

    /// Product form is invalid.
    #[error("Product form has {0}")]
    ProductForm(#[from] ValidationErrors<ProductField>),

    /// A payload could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
