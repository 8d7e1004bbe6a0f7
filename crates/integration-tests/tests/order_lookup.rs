//! Order lookup from the ID a customer types in to the rendered record.

use marketplace_core::{OrderId, OrderStatus, Price};
use marketplace_storefront::models::OrderLine;
use marketplace_storefront::services::{OrderLookupError, decode_order, parse_order_id};

const LOOKUP_RESPONSE: &str = r#"{
    "success": true,
    "data": {
        "orderId": "ORD-123456",
        "status": "shipped",
        "createdAt": "2025-02-06T10:30:00Z",
        "customerInfo": {
            "name": "Daffa Anaqi Farid",
            "address": "Jl. Street No. 123, Jakarta Tengah, DKI Jakarta 010101",
            "phone": "083897685406"
        },
        "items": [
            {"id": 1, "name": "Samsung Galaxy S24 Ultra", "price": 15999000, "quantity": 1},
            {"id": 2, "name": "Iphone", "price": 19999000, "quantity": 2},
            {"id": 3, "name": "Sony WH-1000XM5", "price": 4999000, "quantity": 1}
        ],
        "totalPrice": 60996000,
        "notes": "Mohon dikirim secepatnya"
    }
}"#;

#[test]
fn typed_id_resolves_to_order_record() {
    let order_id = parse_order_id(" ORD-123456\n").expect("non-blank id");
    let order = decode_order(&order_id, LOOKUP_RESPONSE).expect("order decodes");

    assert_eq!(order.status, OrderStatus::Shipped);
    assert_eq!(order.status.label(), "Dalam Pengiriman");
    assert_eq!(order.item_count(), 4);
    let lines_total: Price = order.items.iter().map(OrderLine::line_total).sum();
    assert_eq!(lines_total, order.total_price);
    assert_eq!(order.total_price.to_string(), "Rp\u{a0}60.996.000");
    assert_eq!(
        order.created_at_label().as_deref(),
        Some("6 Februari 2025 pukul 10.30")
    );
}

#[test]
fn blank_and_unknown_ids_are_reported() {
    assert!(matches!(
        parse_order_id(""),
        Err(OrderLookupError::BlankOrderId)
    ));

    let unknown = OrderId::new("ORD-000000");
    let err = decode_order(&unknown, LOOKUP_RESPONSE).expect_err("different order");
    assert!(matches!(err, OrderLookupError::NotFound(id) if id == unknown));
}
