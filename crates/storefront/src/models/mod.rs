//! Domain models for the storefront client.
//!
//! These are the JSON shapes exchanged with storage and the backend API.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::CartLineItem;
pub use order::{
    CustomerInfo, OrderConfirmation, OrderDetail, OrderHistory, OrderItem, OrderLine, OrderRequest,
    Pagination,
};
pub use product::Product;
pub use user::UserProfile;
