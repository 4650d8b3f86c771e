//! Order notification dispatch.
//!
//! After an order commits, an invoice email and a Telegram alert are
//! pushed onto the durable job queue. Enqueue failures degrade the
//! confirmation flags but never fail the order itself.

use async_trait::async_trait;
use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use rust_decimal::Decimal;

use crate::errors::{AppError, AppResult};
use crate::infra::NewOrderItem;
use crate::jobs::{EmailJob, TelegramJob};

/// Dispatches order notifications onto the background queue.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Queue the customer invoice email.
    async fn dispatch_invoice(&self, job: EmailJob) -> AppResult<()>;

    /// Queue the staff order alert.
    async fn dispatch_order_alert(&self, job: TelegramJob) -> AppResult<()>;
}

/// Queue-backed dispatcher writing jobs to Postgres.
#[derive(Clone)]
pub struct OutboxDispatcher {
    emails: PostgresStorage<EmailJob>,
    alerts: PostgresStorage<TelegramJob>,
}

impl OutboxDispatcher {
    pub fn new(emails: PostgresStorage<EmailJob>, alerts: PostgresStorage<TelegramJob>) -> Self {
        Self { emails, alerts }
    }
}

#[async_trait]
impl NotificationDispatcher for OutboxDispatcher {
    async fn dispatch_invoice(&self, job: EmailJob) -> AppResult<()> {
        self.emails
            .clone()
            .push(job)
            .await
            .map_err(|e| AppError::integration(format!("Failed to queue invoice email: {}", e)))?;
        Ok(())
    }

    async fn dispatch_order_alert(&self, job: TelegramJob) -> AppResult<()> {
        self.alerts
            .clone()
            .push(job)
            .await
            .map_err(|e| AppError::integration(format!("Failed to queue order alert: {}", e)))?;
        Ok(())
    }
}

/// Render the invoice email body for a committed order.
pub fn render_invoice_html(
    order_id: i32,
    customer_name: &str,
    items: &[NewOrderItem],
    shipping_fee: Decimal,
    total: Decimal,
) -> String {
    let mut rows = String::new();
    for item in items {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>${}</td><td>${}</td></tr>",
            item.product_name, item.quantity, item.product_price, item.subtotal
        ));
    }

    format!(
        "<h2>Thank you for your order, {}!</h2>\
         <p>Order #{} has been received and is being processed.</p>\
         <table border=\"1\" cellpadding=\"4\">\
         <tr><th>Product</th><th>Qty</th><th>Price</th><th>Subtotal</th></tr>\
         {}\
         </table>\
         <p>Shipping: ${}</p>\
         <p><strong>Total: ${}</strong></p>",
        customer_name, order_id, rows, shipping_fee, total
    )
}

/// Render the plain-text staff alert for a new order.
pub fn render_order_alert(
    order_id: i32,
    customer_name: &str,
    customer_email: &str,
    total: Decimal,
    item_count: usize,
) -> String {
    format!(
        "New order #{}\nCustomer: {} <{}>\nItems: {}\nTotal: ${}",
        order_id, customer_name, customer_email, item_count, total
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, price: Decimal, qty: i32) -> NewOrderItem {
        NewOrderItem {
            product_id: 1,
            product_name: name.to_string(),
            product_price: price,
            quantity: qty,
            subtotal: price * Decimal::from(qty),
        }
    }

    #[test]
    fn invoice_lists_every_line_and_total() {
        let items = vec![
            line("Mens Cotton Jacket", Decimal::new(5599, 2), 2),
            line("Gold Ring", Decimal::new(16800, 2), 1),
        ];
        let html = render_invoice_html(
            42,
            "Alice",
            &items,
            Decimal::new(500, 2),
            Decimal::new(28498, 2),
        );

        assert!(html.contains("Order #42"));
        assert!(html.contains("Mens Cotton Jacket"));
        assert!(html.contains("Gold Ring"));
        assert!(html.contains("Total: $284.98"));
    }

    #[test]
    fn alert_carries_order_and_customer() {
        let text = render_order_alert(7, "Bob", "bob@example.com", Decimal::new(9900, 2), 3);
        assert!(text.contains("New order #7"));
        assert!(text.contains("Bob <bob@example.com>"));
        assert!(text.contains("Items: 3"));
        assert!(text.contains("$99.00"));
    }
}
