//! Business logic services for the storefront client.
//!
//! # Services
//!
//! - [`cart`] - Persisted shopping cart with merge-on-insert and totals
//! - [`checkout`] - Form validation, order payloads, WhatsApp handoff
//! - [`orders`] - Order lookup by ID and order history decoding
//! - [`product_form`] - Admin product form validation
//! - [`auth`] - Persisted login session (token + user profile)

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod product_form;
mod validation;

pub use auth::{AuthError, AuthSession, LoginResponse, SessionState};
pub use cart::{CartPersistError, CartStore, StockError};
pub use checkout::{
    CheckoutError, CheckoutField, CheckoutForm, CheckoutReceipt, complete_order, prepare_order,
    whatsapp_message, whatsapp_url,
};
pub use orders::{OrderLookupError, decode_history, decode_order, parse_order_id};
pub use product_form::{ProductField, ProductForm};
pub use validation::ValidationErrors;
