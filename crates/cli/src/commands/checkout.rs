//! Checkout command.
//!
//! Without `--order-id` the command validates the form and prints the
//! order-creation request that would be sent to the backend. With
//! `--order-id` it records the backend's confirmation: the cart is cleared
//! and, for WhatsApp payment, the handoff link is printed.

use marketplace_core::{OrderId, OrderStatus, PaymentMethod};
use marketplace_storefront::models::OrderConfirmation;
use marketplace_storefront::services::{CheckoutError, CheckoutForm, complete_order, prepare_order};
use marketplace_storefront::{AppError, AuthSession, CartStore, FileStorage, StorefrontConfig};

/// Parsed `checkout` flags.
pub struct CheckoutInput {
    pub name: Option<String>,
    pub address: String,
    pub phone: String,
    pub notes: String,
    pub payment_method: PaymentMethod,
    pub order_id: Option<String>,
    pub status: OrderStatus,
}

/// Run checkout against the persisted cart.
///
/// # Errors
///
/// Returns `AppError::Checkout` if the cart is empty or the form is
/// invalid, and a JSON error if the request cannot be printed.
#[allow(clippy::print_stdout)]
pub fn run(
    config: &StorefrontConfig,
    storage: &FileStorage,
    input: CheckoutInput,
) -> Result<(), AppError> {
    let mut cart = CartStore::with_key(storage, config.cart_key.as_str());
    let session = AuthSession::with_cart_key(storage, config.cart_key.as_str()).check();

    let mut form = CheckoutForm {
        address: input.address,
        phone: input.phone,
        notes: input.notes,
        payment_method: input.payment_method,
        ..CheckoutForm::default()
    };
    match input.name {
        Some(name) => form.customer_name = name,
        None => form.prefill(session.user()),
    }

    let request = match prepare_order(&cart, &form) {
        Ok(request) => request,
        Err(CheckoutError::Invalid(errors)) => {
            for (field, message) in errors.iter() {
                tracing::error!("{field}: {message}");
            }
            return Err(CheckoutError::Invalid(errors).into());
        }
        Err(e) => return Err(e.into()),
    };

    let Some(order_id) = input.order_id else {
        println!("POST {}", config.orders_endpoint());
        println!("{}", serde_json::to_string_pretty(&request)?);
        if !session.is_authenticated() {
            tracing::warn!("Not logged in; the backend will reject this order");
        }
        return Ok(());
    };

    let confirmation = OrderConfirmation {
        order_id: OrderId::new(order_id),
        total_amount: cart.total(),
        status: input.status,
    };
    let receipt = complete_order(&mut cart, &form, confirmation, &config.whatsapp_number);
    if let Some(e) = cart.last_save_error() {
        tracing::warn!("Cart could not be removed from storage: {e}");
    }

    println!("Order ID: {}", receipt.confirmation.order_id);
    println!("Total: {}", receipt.confirmation.total_amount);
    println!("Status: {}", receipt.confirmation.status.label());
    if let Some(url) = receipt.handoff_url {
        println!("Confirm via WhatsApp: {url}");
    }
    Ok(())
}
