//! Cart persistence across reloads over file storage.

use marketplace_core::{Price, ProductId};
use marketplace_integration_tests::{TestContext, product};
use marketplace_storefront::models::CartLineItem;
use marketplace_storefront::storage::keys;
use marketplace_storefront::services::StockError;
use marketplace_storefront::{CartStore, KeyValueStorage};

#[test]
fn reload_reproduces_identical_cart() {
    let ctx = TestContext::new();
    let mut cart = CartStore::new(ctx.storage());
    cart.add_item(&product("laptop", "Laptop ASUS Vivobook 14", 15_999_000, 4), 1);
    cart.add_item(&product("monitor", "Monitor LG 24\"", 4_999_000, 10), 2);
    let before = cart.items().to_vec();

    let reloaded = CartStore::new(ctx.storage());
    assert_eq!(reloaded.items(), before.as_slice());
    assert_eq!(reloaded.total(), Price::new(25_997_000));
    assert_eq!(reloaded.item_count(), 3);
}

#[test]
fn stored_document_is_camel_case_json_array() {
    let ctx = TestContext::new();
    let mut cart = CartStore::new(ctx.storage());
    cart.add_item(&product("mouse", "Wireless Mouse", 150_000, 12), 2);

    let raw = std::fs::read_to_string(ctx.dir().join(format!("{}.json", keys::CART)))
        .expect("cart file written");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(
        value,
        serde_json::json!([{
            "productId": "mouse",
            "name": "Wireless Mouse",
            "price": 150_000,
            "image": "https://cdn.example.com/products/mouse.jpg",
            "quantity": 2,
            "stock": 12,
        }])
    );
}

#[test]
fn clear_removes_file_and_reload_is_empty() {
    let ctx = TestContext::new();
    let mut cart = CartStore::new(ctx.storage());
    cart.add_item(&product("mouse", "Wireless Mouse", 150_000, 12), 1);
    cart.clear();

    assert!(!ctx.dir().join(format!("{}.json", keys::CART)).exists());
    let mut reloaded = CartStore::new(ctx.storage());
    reloaded.load();
    assert!(reloaded.is_empty());
    assert_eq!(reloaded.total(), Price::ZERO);
}

#[test]
fn corrupt_file_degrades_to_empty_cart() {
    let ctx = TestContext::new();
    ctx.storage()
        .set(keys::CART, "[{\"productId\": \"x\"")
        .expect("write corrupt cart");

    let mut cart = CartStore::new(ctx.storage());
    assert!(cart.is_empty());
    assert!(cart.last_load_error().is_some());

    // The next mutation overwrites the corrupt document.
    cart.add_item(&product("x", "Keyboard", 450_000, 3), 1);
    let reloaded = CartStore::new(ctx.storage());
    assert!(reloaded.last_load_error().is_none());
    assert_eq!(reloaded.item_count(), 1);
}

#[test]
fn second_handle_clobbers_until_reload() {
    let ctx = TestContext::new();
    let mut first_tab = CartStore::new(ctx.storage());
    let mut second_tab = CartStore::new(ctx.storage());

    first_tab.add_item(&product("a", "A", 1_000, 10), 1);
    second_tab.add_item(&product("b", "B", 2_000, 10), 1);

    // The second tab never saw "a", so its write dropped it.
    let reloaded = CartStore::new(ctx.storage());
    let ids: Vec<&ProductId> = reloaded.items().iter().map(|l| &l.product_id).collect();
    assert_eq!(ids, vec![&ProductId::new("b")]);

    first_tab.load();
    assert_eq!(first_tab.items(), reloaded.items());
}

#[test]
fn update_to_zero_equals_remove_across_reload() {
    let ctx = TestContext::new();
    let mut cart = CartStore::new(ctx.storage());
    cart.add_item(&product("a", "A", 1_000, 10), 2);
    cart.add_item(&product("b", "B", 2_000, 10), 3);
    cart.update_quantity(&ProductId::new("a"), 0);

    let reloaded = CartStore::new(ctx.storage());
    let expected: Vec<CartLineItem> = cart.items().to_vec();
    assert_eq!(reloaded.items(), expected.as_slice());
    assert_eq!(reloaded.item_count(), 3);
}

#[test]
fn stock_checks_leave_stored_cart_untouched() {
    let ctx = TestContext::new();
    let mouse = product("mouse", "Wireless Mouse", 150_000, 2);
    let mut cart = CartStore::new(ctx.storage());
    cart.check_add(&mouse, 2).expect("within stock");
    cart.add_item(&mouse, 2);

    let reloaded = CartStore::new(ctx.storage());
    assert!(matches!(
        reloaded.check_add(&mouse, 1),
        Err(StockError::Insufficient { available: 2, requested: 3, .. })
    ));
    assert!(reloaded.check_update(&mouse.id, 50).is_err());
    assert!(matches!(
        reloaded.check_add(&product("cable", "USB-C Cable", 50_000, 0), 1),
        Err(StockError::OutOfStock { .. })
    ));
    assert_eq!(CartStore::new(ctx.storage()).item_count(), 2);
}
