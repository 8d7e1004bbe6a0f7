//! Core types for the online marketplace.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId};
pub use price::Price;
pub use status::*;
