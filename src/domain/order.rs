//! Order domain entities, checkout request shapes and admin views.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::COMPLETED_LIKE_STATUSES;

/// Order lifecycle status.
///
/// The storage column is free text (admins may set anything), so unknown
/// values round-trip through `Other` instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipping,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(s) => s,
        }
    }

    /// Whether this status counts as revenue under the "completed-like"
    /// fallback strategy.
    pub fn is_completed_like(&self) -> bool {
        COMPLETED_LIKE_STATUSES.contains(&self.as_str())
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => OrderStatus::Pending,
            "confirmed" => OrderStatus::Confirmed,
            "shipping" => OrderStatus::Shipping,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            other => OrderStatus::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order domain entity.
///
/// Customer contact details are snapshotted at checkout so later profile
/// edits never rewrite order history.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: String,
    pub city: String,
    pub country: String,
    pub payment_method: String,
    pub shipping_fee: Decimal,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of a placed order, immutable after creation
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    /// Catalog-wide product ID; may reference the external feed partition
    pub product_id: i32,
    pub product_name: String,
    pub product_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

/// One cart line as submitted by the storefront
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CartLine {
    /// Catalog item ID (local or feed partition)
    #[schema(example = 1)]
    pub id: i32,
    #[validate(length(min = 1, message = "Cart item title is required"))]
    #[schema(example = "Shirt")]
    pub title: String,
    /// Unit price the client displayed; re-checked against the catalog
    #[schema(example = 10.0)]
    pub price: Decimal,
    #[validate(range(min = 1, message = "Cart item quantity must be at least 1"))]
    #[schema(example = 2)]
    pub qty: i32,
}

/// Checkout submission: cart plus shipping and payment form
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "Cart is empty"), nested)]
    pub cart: Vec<CartLine>,
    #[validate(length(min = 1, message = "Missing required field: name"))]
    #[schema(example = "John Doe")]
    pub name: String,
    #[validate(length(min = 1, message = "Missing required field: email"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Missing required field: address"))]
    pub address: String,
    #[validate(length(min = 1, message = "Missing required field: city"))]
    pub city: String,
    #[validate(length(min = 1, message = "Missing required field: country"))]
    pub country: String,
    #[validate(length(min = 1, message = "Missing required field: payment"))]
    #[schema(example = "cod")]
    pub payment: String,
    /// Client-computed grand total; verified against the server-side
    /// recomputation before anything is persisted
    #[schema(example = 20.0)]
    pub total: Decimal,
    #[serde(default)]
    pub shipping_fee: Option<Decimal>,
}

/// Confirmation returned from a successful checkout
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderConfirmation {
    pub success: bool,
    #[schema(example = "Order placed successfully! Invoice and notifications are being sent.")]
    pub message: String,
    #[schema(example = 17)]
    pub order_id: i32,
    /// Whether the invoice e-mail was enqueued for delivery
    pub email_started: bool,
    /// Whether the chat alert was enqueued for delivery
    pub telegram_started: bool,
}

/// Admin order list row
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderSummary {
    pub id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub total_amount: Decimal,
    pub status: String,
    /// `YYYY-MM-DD HH:MM`
    pub order_date: String,
    pub item_count: usize,
}

/// Admin order detail view, including line items
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderDetails {
    pub id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: String,
    pub city: String,
    pub country: String,
    pub payment_method: String,
    pub shipping_fee: Decimal,
    pub total_amount: Decimal,
    pub status: String,
    pub order_date: String,
    pub items: Vec<OrderItemView>,
}

/// Line item as shown in the admin detail view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderItemView {
    pub product_name: String,
    pub product_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

impl Order {
    /// Format the order timestamp the way the admin views expect.
    pub fn formatted_date(&self) -> String {
        self.order_date.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            product_name: item.product_name.clone(),
            product_price: item.product_price,
            quantity: item.quantity,
            subtotal: item.subtotal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_known_and_unknown_values() {
        assert_eq!(OrderStatus::from("delivered"), OrderStatus::Delivered);
        assert_eq!(OrderStatus::from("delivered").as_str(), "delivered");

        let odd = OrderStatus::from("on hold");
        assert_eq!(odd, OrderStatus::Other("on hold".to_string()));
        assert_eq!(odd.as_str(), "on hold");
    }

    #[test]
    fn completed_like_statuses_match_policy() {
        assert!(OrderStatus::Delivered.is_completed_like());
        assert!(OrderStatus::from("shipped").is_completed_like());
        assert!(OrderStatus::from("paid").is_completed_like());
        assert!(!OrderStatus::Pending.is_completed_like());
        assert!(!OrderStatus::Cancelled.is_completed_like());
    }
}
