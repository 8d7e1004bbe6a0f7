//! Order creation payloads and the order records returned by lookups.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use marketplace_core::{OrderId, OrderStatus, PaymentMethod, Price, ProductId};

use super::CartLineItem;

/// One `{product, quantity}` pair in an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ProductId,
    pub quantity: u32,
}

impl From<&CartLineItem> for OrderItem {
    fn from(line: &CartLineItem) -> Self {
        Self {
            product: line.product_id.clone(),
            quantity: line.quantity,
        }
    }
}

/// Body of the order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<OrderItem>,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub notes: String,
    pub payment_method: PaymentMethod,
}

/// The `data` object of a successful order-creation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub total_amount: Price,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: OrderStatus,
}

fn lenient_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OrderStatus, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(OrderStatus::parse_lenient(&raw))
}

/// Shipping contact stored with an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

/// One line of a placed order, priced at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
}

impl OrderLine {
    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A placed order as returned by the order lookup and history endpoints.
///
/// Accepts both the detail shape (`orderId`, `totalPrice`) and the history
/// shape (`_id`, `totalAmount`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(alias = "_id")]
    pub order_id: OrderId,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub customer_info: CustomerInfo,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(alias = "totalAmount")]
    pub total_price: Price,
    #[serde(default)]
    pub notes: String,
}

impl OrderDetail {
    /// Σ `quantity` over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Order date in long Indonesian form, e.g. `6 Februari 2025 pukul 10.30`
    /// (UTC). `None` when the backend sent no timestamp.
    #[must_use]
    pub fn created_at_label(&self) -> Option<String> {
        self.created_at.map(|at| {
            format!(
                "{} {} {} pukul {:02}.{:02}",
                at.day(),
                month_name(at.month()),
                at.year(),
                at.hour(),
                at.minute()
            )
        })
    }
}

/// Page position in an order history listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

impl Pagination {
    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// One page of the logged-in user's order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHistory {
    #[serde(rename = "data")]
    pub orders: Vec<OrderDetail>,
    pub pagination: Pagination,
}

const fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Januari",
        2 => "Februari",
        3 => "Maret",
        4 => "April",
        5 => "Mei",
        6 => "Juni",
        7 => "Juli",
        8 => "Agustus",
        9 => "September",
        10 => "Oktober",
        11 => "November",
        _ => "Desember",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_order_request_wire_shape() {
        let request = OrderRequest {
            items: vec![OrderItem {
                product: ProductId::new("p1"),
                quantity: 2,
            }],
            customer_name: "Budi".to_string(),
            address: "Jl. Merdeka 1".to_string(),
            phone: "081234567890".to_string(),
            notes: String::new(),
            payment_method: PaymentMethod::Cod,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "items": [{"product": "p1", "quantity": 2}],
                "customerName": "Budi",
                "address": "Jl. Merdeka 1",
                "phone": "081234567890",
                "notes": "",
                "paymentMethod": "cod",
            })
        );
    }

    #[test]
    fn test_confirmation_accepts_unknown_status() {
        let confirmation: OrderConfirmation = serde_json::from_value(json!({
            "orderId": "ORD-001",
            "totalAmount": 25_997_000,
            "status": "awaiting_payment",
        }))
        .unwrap();

        assert_eq!(confirmation.order_id.as_str(), "ORD-001");
        assert_eq!(confirmation.total_amount, Price::new(25_997_000));
        assert_eq!(confirmation.status, OrderStatus::Pending);
    }

    fn sample_detail() -> serde_json::Value {
        json!({
            "orderId": "ORD-123456",
            "status": "pending",
            "createdAt": "2025-02-06T10:30:00Z",
            "customerInfo": {
                "name": "Daffa Anaqi Farid",
                "address": "Jl. Street No. 123, Jakarta Tengah",
                "phone": "083897685406",
            },
            "items": [
                {"id": 1, "name": "Samsung Galaxy S24 Ultra", "price": 15_999_000, "quantity": 1},
                {"id": 2, "name": "Iphone", "price": 19_999_000, "quantity": 2},
            ],
            "totalPrice": 55_997_000,
            "notes": "Mohon dikirim secepatnya",
        })
    }

    #[test]
    fn test_order_detail_shape() {
        let order: OrderDetail = serde_json::from_value(sample_detail()).unwrap();

        assert_eq!(order.order_id.as_str(), "ORD-123456");
        assert_eq!(order.status.label(), "Menunggu Konfirmasi");
        assert_eq!(order.customer_info.name, "Daffa Anaqi Farid");
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.items[1].line_total(), Price::new(39_998_000));
        assert_eq!(order.total_price, Price::new(55_997_000));
        assert_eq!(
            order.created_at_label().as_deref(),
            Some("6 Februari 2025 pukul 10.30")
        );
    }

    #[test]
    fn test_history_entry_uses_id_and_total_amount() {
        let history: OrderHistory = serde_json::from_value(json!({
            "data": [{
                "_id": "65f1c0ffee",
                "status": "shipped",
                "items": [],
                "totalAmount": 150_000,
            }],
            "pagination": {"page": 1, "limit": 10, "total": 11, "pages": 2},
        }))
        .unwrap();

        let order = &history.orders[0];
        assert_eq!(order.order_id.as_str(), "65f1c0ffee");
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.total_price, Price::new(150_000));
        assert_eq!(order.created_at_label(), None);
        assert!(history.pagination.has_next());
    }
}
