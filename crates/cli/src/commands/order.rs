//! Order lookup commands.
//!
//! # Usage
//!
//! ```bash
//! # Print the request for an order lookup
//! mp-cli order show ORD-123456
//!
//! # Render the backend's response
//! mp-cli order show ORD-123456 --response order.json
//!
//! # Order history, one page at a time
//! mp-cli order history --page 2 --response orders.json
//! ```

use std::path::Path;

use marketplace_storefront::models::OrderDetail;
use marketplace_storefront::services::{
    OrderLookupError, decode_history, decode_order, parse_order_id,
};
use marketplace_storefront::{AppError, AuthSession, FileStorage, StorefrontConfig};

fn read_response(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path)
        .map_err(|e| AppError::BadRequest(format!("cannot read {}: {e}", path.display())))
}

fn warn_if_anonymous(config: &StorefrontConfig, storage: &FileStorage) {
    let session = AuthSession::with_cart_key(storage, config.cart_key.as_str()).check();
    if !session.is_authenticated() {
        tracing::warn!("Not logged in; the backend will reject this request");
    }
}

/// Look up one order.
///
/// # Errors
///
/// Returns `AppError::OrderLookup` for a blank ID, a missing order or a
/// response that is not an order.
#[allow(clippy::print_stdout)]
pub fn show(
    config: &StorefrontConfig,
    storage: &FileStorage,
    query: &str,
    response: Option<&Path>,
) -> Result<(), AppError> {
    let order_id = parse_order_id(query).inspect_err(report)?;

    let Some(path) = response else {
        println!("GET {}", config.order_endpoint(&order_id));
        warn_if_anonymous(config, storage);
        return Ok(());
    };

    let order = decode_order(&order_id, &read_response(path)?).inspect_err(report)?;
    print_order(&order);
    Ok(())
}

/// Show one page of the order history.
///
/// # Errors
///
/// Returns `AppError::OrderLookup` if the response is not a history page.
#[allow(clippy::print_stdout)]
pub fn history(
    config: &StorefrontConfig,
    storage: &FileStorage,
    page: u32,
    limit: u32,
    response: Option<&Path>,
) -> Result<(), AppError> {
    let Some(path) = response else {
        println!("GET {}", config.order_history_endpoint(page, limit));
        warn_if_anonymous(config, storage);
        return Ok(());
    };

    let history = decode_history(&read_response(path)?)?;
    if history.orders.is_empty() {
        println!("No orders yet");
        return Ok(());
    }

    for order in &history.orders {
        println!(
            "  {:<26} {:<20} {:>3} item(s)  {:>16}  {}",
            order.order_id.as_str(),
            order.status.label(),
            order.items.len(),
            order.total_price.to_string(),
            order.created_at_label().unwrap_or_default(),
        );
    }

    let pagination = history.pagination;
    print!(
        "Showing {} of {} orders",
        history.orders.len(),
        pagination.total
    );
    if pagination.pages > 1 {
        print!(" (Page {} of {})", pagination.page, pagination.pages);
    }
    println!();
    Ok(())
}

fn report(e: &OrderLookupError) {
    tracing::error!("{}", e.user_message());
}

#[allow(clippy::print_stdout)]
fn print_order(order: &OrderDetail) {
    println!("Order ID: {}", order.order_id);
    println!("Status:   {}", order.status.label());
    if let Some(date) = order.created_at_label() {
        println!("Tanggal:  {date}");
    }

    let customer = &order.customer_info;
    println!();
    println!("Customer: {}", customer.name);
    println!("Address:  {}", customer.address);
    println!("Phone:    {}", customer.phone);

    println!();
    for line in &order.items {
        println!(
            "  {:<32} {:>4} x {:>16} = {:>16}",
            line.name,
            line.quantity,
            line.price.to_string(),
            line.line_total().to_string(),
        );
    }
    println!("Total: {}", order.total_price);

    if !order.notes.trim().is_empty() {
        println!();
        println!("Catatan: {}", order.notes.trim());
    }
}
