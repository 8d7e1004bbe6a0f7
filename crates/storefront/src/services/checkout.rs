//! Checkout: form validation, order payloads and the WhatsApp handoff.
//!
//! The flow mirrors the checkout page:
//!
//! 1. [`CheckoutForm::validate`] collects every field error at once.
//! 2. [`prepare_order`] turns a non-empty cart plus a valid form into the
//!    [`OrderRequest`] body sent to the order-creation endpoint.
//! 3. Once the backend answers with an [`OrderConfirmation`],
//!    [`complete_order`] clears the cart and, for WhatsApp payment, builds
//!    the `wa.me` link carrying the order summary.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use marketplace_core::{OrderId, PaymentMethod, Price};

use crate::models::{CartLineItem, OrderConfirmation, OrderItem, OrderRequest, UserProfile};
use crate::services::cart::CartStore;
use crate::services::validation::ValidationErrors;
use crate::storage::KeyValueStorage;

/// Accepted phone number length, in digits, after dropping a leading `0`.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=13;

/// Checkout form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutField {
    CustomerName,
    Address,
    Phone,
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CustomerName => write!(f, "customerName"),
            Self::Address => write!(f, "address"),
            Self::Phone => write!(f, "phone"),
        }
    }
}

/// Errors that stop an order from being submitted.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more form fields are invalid.
    #[error("checkout form has {0}")]
    Invalid(#[from] ValidationErrors<CheckoutField>),
}

/// Customer details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Fill the customer name from the logged-in user.
    pub fn prefill(&mut self, user: Option<&UserProfile>) {
        if let Some(user) = user {
            self.customer_name.clone_from(&user.name);
        }
    }

    /// Check every field and report all failures together.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` when the name or address is blank, or the
    /// phone number is blank or not 10-13 digits (one leading `0` is
    /// ignored).
    pub fn validate(&self) -> Result<(), ValidationErrors<CheckoutField>> {
        let mut errors = ValidationErrors::default();

        if self.customer_name.trim().is_empty() {
            errors.insert(CheckoutField::CustomerName, "Nama harus diisi");
        }
        if self.address.trim().is_empty() {
            errors.insert(CheckoutField::Address, "Alamat harus diisi");
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.insert(CheckoutField::Phone, "Nomor telepon harus diisi");
        } else if !is_valid_phone(phone) {
            errors.insert(
                CheckoutField::Phone,
                "Nomor telepon tidak valid (10-13 digit)",
            );
        }

        errors.into_result()
    }
}

fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('0').unwrap_or(phone);
    PHONE_DIGITS.contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Build the order-creation request for the current cart.
///
/// # Errors
///
/// Returns `CheckoutError::Invalid` if the form fails validation and
/// `CheckoutError::EmptyCart` if there are no lines to order.
#[instrument(skip_all, fields(lines = cart.items().len()))]
pub fn prepare_order<S: KeyValueStorage>(
    cart: &CartStore<S>,
    form: &CheckoutForm,
) -> Result<OrderRequest, CheckoutError> {
    form.validate()?;
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    Ok(OrderRequest {
        items: cart.items().iter().map(OrderItem::from).collect(),
        customer_name: form.customer_name.trim().to_owned(),
        address: form.address.trim().to_owned(),
        phone: form.phone.trim().to_owned(),
        notes: form.notes.trim().to_owned(),
        payment_method: form.payment_method,
    })
}

/// Result of a confirmed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub confirmation: OrderConfirmation,
    /// Lines as they were in the cart when the order was confirmed.
    pub items: Vec<CartLineItem>,
    /// `wa.me` link for WhatsApp payment, `None` otherwise.
    pub handoff_url: Option<String>,
}

/// Finish checkout after the backend confirmed the order.
///
/// Snapshots the cart lines, clears the cart, and builds the WhatsApp
/// handoff link when the form chose WhatsApp payment. The message total is
/// the cart total at confirmation time.
#[instrument(skip(cart, form, whatsapp_number), fields(order_id = %confirmation.order_id))]
pub fn complete_order<S: KeyValueStorage>(
    cart: &mut CartStore<S>,
    form: &CheckoutForm,
    confirmation: OrderConfirmation,
    whatsapp_number: &str,
) -> CheckoutReceipt {
    let items = cart.items().to_vec();
    let total = cart.total();
    cart.clear();
    tracing::info!(
        status = %confirmation.status,
        total = %confirmation.total_amount,
        "Order confirmed, cart cleared"
    );

    let handoff_url = form.payment_method.is_whatsapp().then(|| {
        let message = whatsapp_message(form, &items, &confirmation.order_id, total);
        whatsapp_url(whatsapp_number, &message)
    });

    CheckoutReceipt {
        confirmation,
        items,
        handoff_url,
    }
}

/// The order summary a customer sends to the seller over WhatsApp.
#[must_use]
pub fn whatsapp_message(
    form: &CheckoutForm,
    items: &[CartLineItem],
    order_id: &OrderId,
    total: Price,
) -> String {
    let items_list = items
        .iter()
        .enumerate()
        .map(|(i, line)| {
            format!(
                "{}. {}\n   Qty: {} x {} = {}",
                i + 1,
                line.name,
                line.quantity,
                line.price,
                line.line_total()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let notes = form.notes.trim();
    let notes_block = if notes.is_empty() {
        String::new()
    } else {
        format!("Catatan: {notes}\n\n")
    };

    format!(
        "Halo Admin, saya {name}\n\n\
         Saya ingin konfirmasi order dengan:\n\
         Order ID: {order_id}\n\n\
         Detail Pesanan:\n{items_list}\n\n\
         Total: {total}\n\n\
         Alamat Pengiriman:\n{address}\n\n\
         No. Telepon: {phone}\n\n\
         {notes_block}Terima kasih!",
        name = form.customer_name.trim(),
        address = form.address.trim(),
        phone = form.phone.trim(),
    )
}

/// `https://wa.me/<number>?text=<percent-encoded message>`.
#[must_use]
pub fn whatsapp_url(number: &str, message: &str) -> String {
    format!(
        "https://wa.me/{number}?text={}",
        urlencoding::encode(message)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marketplace_core::{Email, OrderStatus, ProductId};

    use super::*;
    use crate::models::Product;
    use crate::storage::MemoryStorage;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            customer_name: "Budi Santoso".to_string(),
            address: "Jl. Merdeka No. 1, Jakarta".to_string(),
            phone: "081234567890".to_string(),
            notes: String::new(),
            payment_method: PaymentMethod::Whatsapp,
        }
    }

    fn filled_cart() -> CartStore<MemoryStorage> {
        let mut cart = CartStore::new(MemoryStorage::new());
        cart.add_item(
            &Product {
                id: ProductId::new("laptop"),
                name: "Laptop".to_string(),
                price: Price::new(15_999_000),
                stock: 3,
                images: Vec::new(),
            },
            1,
        );
        cart.add_item(
            &Product {
                id: ProductId::new("monitor"),
                name: "Monitor".to_string(),
                price: Price::new(4_999_000),
                stock: 3,
                images: Vec::new(),
            },
            2,
        );
        cart
    }

    fn confirmation() -> OrderConfirmation {
        OrderConfirmation {
            order_id: OrderId::new("ORD-42"),
            total_amount: Price::new(25_997_000),
            status: OrderStatus::Pending,
        }
    }

    #[test]
    fn test_validate_accepts_valid_form() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_all_blank_fields() {
        let form = CheckoutForm {
            customer_name: "  ".to_string(),
            ..CheckoutForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.iter().count(), 3);
        assert_eq!(errors.get(CheckoutField::Phone), Some("Nomor telepon harus diisi"));
        assert_eq!(errors.get(CheckoutField::CustomerName), Some("Nama harus diisi"));
    }

    #[test]
    fn test_phone_rules() {
        let check = |phone: &str| {
            CheckoutForm {
                phone: phone.to_string(),
                ..valid_form()
            }
            .validate()
            .is_ok()
        };

        assert!(check("081234567890"));
        assert!(check("6281234567890"));
        assert!(check("08123456789"));
        assert!(!check("081234567"));
        assert!(!check("08123456789012345"));
        assert!(!check("0812-3456-7890"));
        assert!(!check("+6281234567890"));
    }

    #[test]
    fn test_invalid_phone_message() {
        let form = CheckoutForm {
            phone: "12345".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(CheckoutField::Phone),
            Some("Nomor telepon tidak valid (10-13 digit)")
        );
    }

    #[test]
    fn test_prefill_uses_user_name() {
        let mut form = CheckoutForm::default();
        form.prefill(None);
        assert_eq!(form.customer_name, "");

        let user = UserProfile {
            name: "Siti".to_string(),
            email: Some(Email::parse("siti@example.com").unwrap()),
            role: "user".to_string(),
        };
        form.prefill(Some(&user));
        assert_eq!(form.customer_name, "Siti");
    }

    #[test]
    fn test_prepare_order_rejects_empty_cart() {
        let cart = CartStore::new(MemoryStorage::new());
        assert!(matches!(
            prepare_order(&cart, &valid_form()),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_prepare_order_validates_before_cart() {
        let cart = CartStore::new(MemoryStorage::new());
        let form = CheckoutForm::default();
        assert!(matches!(
            prepare_order(&cart, &form),
            Err(CheckoutError::Invalid(_))
        ));
    }

    #[test]
    fn test_prepare_order_packages_product_quantity_pairs() {
        let cart = filled_cart();
        let request = prepare_order(&cart, &valid_form()).unwrap();

        assert_eq!(
            request.items,
            vec![
                OrderItem {
                    product: ProductId::new("laptop"),
                    quantity: 1
                },
                OrderItem {
                    product: ProductId::new("monitor"),
                    quantity: 2
                },
            ]
        );
        assert_eq!(request.payment_method, PaymentMethod::Whatsapp);
    }

    #[test]
    fn test_whatsapp_message_format() {
        let cart = filled_cart();
        let mut form = valid_form();
        form.notes = "Kirim sore".to_string();

        let message = whatsapp_message(&form, cart.items(), &OrderId::new("ORD-42"), cart.total());

        assert!(message.starts_with("Halo Admin, saya Budi Santoso\n\n"));
        assert!(message.contains("Order ID: ORD-42\n"));
        assert!(message.contains(
            "1. Laptop\n   Qty: 1 x Rp\u{a0}15.999.000 = Rp\u{a0}15.999.000\n\n\
             2. Monitor\n   Qty: 2 x Rp\u{a0}4.999.000 = Rp\u{a0}9.998.000"
        ));
        assert!(message.contains("Total: Rp\u{a0}25.997.000\n"));
        assert!(message.contains("Catatan: Kirim sore\n"));
        assert!(message.ends_with("Terima kasih!"));
    }

    #[test]
    fn test_whatsapp_message_omits_blank_notes() {
        let cart = filled_cart();
        let message = whatsapp_message(
            &valid_form(),
            cart.items(),
            &OrderId::new("ORD-1"),
            cart.total(),
        );
        assert!(!message.contains("Catatan"));
    }

    #[test]
    fn test_whatsapp_url_encodes_message() {
        let url = whatsapp_url("6283897685406", "Halo Admin\nTotal: 5 & 6");
        assert_eq!(
            url,
            "https://wa.me/6283897685406?text=Halo%20Admin%0ATotal%3A%205%20%26%206"
        );
    }

    #[test]
    fn test_complete_order_clears_cart_and_builds_handoff() {
        let mut cart = filled_cart();
        let receipt = complete_order(&mut cart, &valid_form(), confirmation(), "6283897685406");

        assert!(cart.is_empty());
        assert_eq!(receipt.items.len(), 2);
        let url = receipt.handoff_url.unwrap();
        assert!(url.starts_with("https://wa.me/6283897685406?text=Halo%20Admin"));
        assert!(url.contains("ORD-42"));
    }

    #[test]
    fn test_complete_order_without_whatsapp_has_no_handoff() {
        let mut cart = filled_cart();
        let form = CheckoutForm {
            payment_method: PaymentMethod::BankTransfer,
            ..valid_form()
        };
        let receipt = complete_order(&mut cart, &form, confirmation(), "6283897685406");

        assert!(cart.is_empty());
        assert_eq!(receipt.handoff_url, None);
        assert_eq!(receipt.confirmation.order_id.as_str(), "ORD-42");
    }
}
