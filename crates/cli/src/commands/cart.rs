//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! mp-cli cart show
//! mp-cli cart add --id p-mouse --name "Wireless Mouse" --price 150000 --stock 12
//! mp-cli cart update p-mouse 3
//! mp-cli cart remove p-mouse
//! mp-cli cart clear
//! ```
//!
//! # Environment Variables
//!
//! - `MARKETPLACE_STORAGE_DIR` - Directory holding the persisted cart
//! - `MARKETPLACE_CART_KEY` - Storage key the cart persists under

use std::path::Path;

use marketplace_core::{Price, ProductId};
use marketplace_storefront::models::Product;
use marketplace_storefront::{AppError, CartStore, FileStorage, StorefrontConfig};

fn open_cart<'a>(config: &StorefrontConfig, storage: &'a FileStorage) -> CartStore<&'a FileStorage> {
    let cart = CartStore::with_key(storage, config.cart_key.as_str());
    if let Some(e) = cart.last_load_error() {
        tracing::warn!("Stored cart could not be loaded and was reset: {e}");
    }
    cart
}

fn report_save<S: marketplace_storefront::KeyValueStorage>(cart: &CartStore<S>) {
    if let Some(e) = cart.last_save_error() {
        tracing::error!("Cart change was not saved: {e}");
    }
}

/// Print the cart.
///
/// # Errors
///
/// Returns an error if `--json` output cannot be serialized.
#[allow(clippy::print_stdout)]
pub fn show(config: &StorefrontConfig, storage: &FileStorage, json: bool) -> Result<(), AppError> {
    let cart = open_cart(config, storage);

    if json {
        println!("{}", serde_json::to_string_pretty(cart.items())?);
        return Ok(());
    }

    if cart.is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }

    println!("Shopping Cart ({} items)", cart.item_count());
    for line in cart.items() {
        let stock_note = if line.exceeds_stock() {
            format!("  (only {} in stock)", line.stock)
        } else {
            String::new()
        };
        println!(
            "  {:<12} {:<32} {:>4} x {:>16} = {:>16}{stock_note}",
            line.product_id.as_str(),
            line.name,
            line.quantity,
            line.price.to_string(),
            line.line_total().to_string(),
        );
    }
    println!("Total: {}", cart.total());
    Ok(())
}

/// Read a catalog product from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a product.
pub fn product_from_file(path: &Path) -> Result<Product, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::BadRequest(format!("cannot read {}: {e}", path.display()))
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Build a product from individual flags.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if a required flag is missing.
pub fn product_from_args(
    id: Option<String>,
    name: Option<String>,
    price: Option<u64>,
    stock: Option<u32>,
    image: Option<String>,
) -> Result<Product, AppError> {
    let missing = |flag: &str| AppError::BadRequest(format!("--{flag} is required"));
    Ok(Product {
        id: ProductId::new(id.ok_or_else(|| missing("id"))?),
        name: name.ok_or_else(|| missing("name"))?,
        price: Price::new(price.ok_or_else(|| missing("price"))?),
        stock: stock.ok_or_else(|| missing("stock"))?,
        images: image.into_iter().collect(),
    })
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns `AppError::Stock` if the product is out of stock or the line
/// would exceed it; the cart is left unchanged.
pub fn add(
    config: &StorefrontConfig,
    storage: &FileStorage,
    product: &Product,
    quantity: u32,
) -> Result<(), AppError> {
    let mut cart = open_cart(config, storage);
    cart.check_add(product, quantity)?;
    cart.add_item(product, quantity);
    report_save(&cart);

    if let Some(line) = cart.get(&product.id) {
        tracing::info!("{} now has quantity {}", line.name, line.quantity);
    }
    Ok(())
}

/// Remove a product's line.
pub fn remove(config: &StorefrontConfig, storage: &FileStorage, id: &str) {
    let mut cart = open_cart(config, storage);
    let id = ProductId::new(id);
    if cart.get(&id).is_none() {
        tracing::info!("{id} is not in the cart");
        return;
    }
    cart.remove_item(&id);
    report_save(&cart);
    tracing::info!("Removed {id} from cart");
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns `AppError::Stock` if `quantity` exceeds the line's stock; the
/// cart is left unchanged.
pub fn update(
    config: &StorefrontConfig,
    storage: &FileStorage,
    id: &str,
    quantity: i64,
) -> Result<(), AppError> {
    let mut cart = open_cart(config, storage);
    let id = ProductId::new(id);
    cart.check_update(&id, quantity)?;
    cart.update_quantity(&id, quantity);
    report_save(&cart);

    match cart.get(&id) {
        Some(line) => tracing::info!("{id} now has quantity {}", line.quantity),
        None => tracing::info!("{id} is not in the cart"),
    }
    Ok(())
}

/// Empty the cart.
pub fn clear(config: &StorefrontConfig, storage: &FileStorage) {
    let mut cart = open_cart(config, storage);
    cart.clear();
    report_save(&cart);
    tracing::info!("Cart cleared");
}
