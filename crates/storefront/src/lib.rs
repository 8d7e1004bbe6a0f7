//! Online Marketplace storefront client library.
//!
//! Client-side state for the marketplace storefront: the persisted shopping
//! cart, checkout, order lookup, and the login session. Rendering, routing and the
//! backend REST API are external; this crate builds the payloads the
//! backend expects and consumes its response shapes.
//!
//! # Modules
//!
//! - [`storage`] - Key/value persistence (`get`/`set`/`remove`)
//! - [`models`] - Cart lines, products, orders, user profile
//! - [`services`] - Cart store, checkout, order lookup, product form, auth
//!   session
//! - [`config`] - Environment configuration
//! - [`error`] - Unified error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use services::{AuthSession, CartStore};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
