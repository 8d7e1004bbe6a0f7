//! Order lookup and history.
//!
//! The HTTP round trip happens outside this crate. These helpers validate
//! the order ID a customer types in and decode the backend's responses,
//! which wrap the record in a `data` field.

use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use marketplace_core::OrderId;

use crate::models::{OrderDetail, OrderHistory};

/// Reasons an order lookup produced no order.
#[derive(Debug, Error)]
pub enum OrderLookupError {
    /// The search box was blank.
    #[error("order ID is required")]
    BlankOrderId,

    /// The backend had no order with this ID.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// The response body is not an order record.
    #[error("invalid order response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl OrderLookupError {
    /// Message shown to the customer under the search box.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::BlankOrderId => "Masukkan Order ID",
            Self::NotFound(_) | Self::Decode(_) => {
                "Order tidak ditemukan. Periksa kembali Order ID."
            }
        }
    }
}

/// Validate the order ID typed into the lookup form.
///
/// # Errors
///
/// Returns `OrderLookupError::BlankOrderId` if the query is blank.
pub fn parse_order_id(query: &str) -> Result<OrderId, OrderLookupError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(OrderLookupError::BlankOrderId);
    }
    Ok(OrderId::new(query))
}

/// Decode the response to `GET orders/{id}`.
///
/// Accepts a `{"data": {...}}` envelope or a bare record.
///
/// # Errors
///
/// Returns `OrderLookupError::NotFound` when the envelope holds no order or
/// an order with a different ID, and `OrderLookupError::Decode` when the
/// body is not an order.
#[instrument(skip(body))]
pub fn decode_order(id: &OrderId, body: &str) -> Result<OrderDetail, OrderLookupError> {
    let value = match serde_json::from_str::<Value>(body)? {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    };
    if value.is_null() {
        return Err(OrderLookupError::NotFound(id.clone()));
    }

    let order: OrderDetail = serde_json::from_value(value)?;
    if &order.order_id != id {
        tracing::warn!(returned = %order.order_id, "Lookup returned a different order");
        return Err(OrderLookupError::NotFound(id.clone()));
    }
    Ok(order)
}

/// Decode the response to `GET orders?page=..&limit=..`.
///
/// # Errors
///
/// Returns `OrderLookupError::Decode` if the body is not a history page.
pub fn decode_history(body: &str) -> Result<OrderHistory, OrderLookupError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marketplace_core::{OrderStatus, Price};
    use serde_json::json;

    use super::*;

    fn order_json(id: &str) -> Value {
        json!({
            "orderId": id,
            "status": "confirmed",
            "createdAt": "2025-02-06T10:30:00Z",
            "customerInfo": {"name": "Budi", "address": "Jl. Merdeka 1", "phone": "081234567890"},
            "items": [{"name": "Mouse", "price": 150_000, "quantity": 2}],
            "totalPrice": 300_000,
        })
    }

    #[test]
    fn test_parse_order_id() {
        assert_eq!(parse_order_id("  ORD-123456 ").unwrap().as_str(), "ORD-123456");

        let err = parse_order_id("   ").unwrap_err();
        assert!(matches!(err, OrderLookupError::BlankOrderId));
        assert_eq!(err.user_message(), "Masukkan Order ID");
    }

    #[test]
    fn test_decode_wrapped_and_bare() {
        let id = OrderId::new("ORD-1");
        let wrapped = json!({"success": true, "data": order_json("ORD-1")}).to_string();
        let order = decode_order(&id, &wrapped).unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.total_price, Price::new(300_000));

        let bare = order_json("ORD-1").to_string();
        assert_eq!(decode_order(&id, &bare).unwrap(), order);
    }

    #[test]
    fn test_decode_missing_order_is_not_found() {
        let id = OrderId::new("ORD-404");
        let err = decode_order(&id, r#"{"data": null}"#).unwrap_err();
        assert!(matches!(err, OrderLookupError::NotFound(_)));
        assert_eq!(
            err.user_message(),
            "Order tidak ditemukan. Periksa kembali Order ID."
        );

        let other = json!({"data": order_json("ORD-2")}).to_string();
        assert!(matches!(
            decode_order(&id, &other),
            Err(OrderLookupError::NotFound(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_orders() {
        let id = OrderId::new("ORD-1");
        assert!(matches!(
            decode_order(&id, r#"{"message": "Internal error"}"#),
            Err(OrderLookupError::Decode(_))
        ));
        assert!(matches!(
            decode_order(&id, "<html>"),
            Err(OrderLookupError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_history() {
        let body = json!({
            "data": [order_json("ORD-1"), order_json("ORD-2")],
            "pagination": {"page": 2, "limit": 2, "total": 4, "pages": 2},
        })
        .to_string();

        let history = decode_history(&body).unwrap();
        assert_eq!(history.orders.len(), 2);
        assert!(!history.pagination.has_next());
    }
}
