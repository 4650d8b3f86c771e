//! Order service - checkout intake and admin order management.
//!
//! Checkout never trusts client prices: every cart line is re-priced
//! against the catalog inside the order transaction, local stock is
//! checked and decremented in the same transaction, and the client's
//! grand total must match the server-side recomputation before anything
//! commits. Notifications are queued after commit and can only degrade
//! the confirmation flags, never the order.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::config::FEED_ID_OFFSET;
use crate::domain::{CartLine, CheckoutRequest, Order, OrderConfirmation, OrderDetails,
    OrderItem, OrderItemView, OrderSummary};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::feed;
use crate::infra::{NewOrder, NewOrderItem, UnitOfWork};
use crate::jobs::{EmailJob, TelegramJob};
use crate::services::notifier::{render_invoice_html, render_order_alert, NotificationDispatcher};

/// Order service trait for dependency injection.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Place an order for the authenticated customer.
    async fn place_order(
        &self,
        customer_id: i32,
        request: CheckoutRequest,
    ) -> AppResult<OrderConfirmation>;

    /// Admin: list orders, newest first, optionally filtered by status.
    async fn list_orders(&self, status: Option<String>) -> AppResult<Vec<OrderSummary>>;

    /// Admin: one order with its line items.
    async fn order_details(&self, id: i32) -> AppResult<OrderDetails>;

    /// Admin: overwrite an order's status.
    async fn update_status(&self, id: i32, status: String) -> AppResult<()>;
}

/// Price a feed cart line from the bundled snapshot.
///
/// Feed stock is nominal, so feed lines never decrement anything.
fn price_feed_line(line: &CartLine) -> AppResult<NewOrderItem> {
    let entry = feed::find(line.id - FEED_ID_OFFSET)
        .ok_or_else(|| AppError::validation(format!("Unknown product: {}", line.id)))?;

    let subtotal = entry.price * Decimal::from(line.qty);
    Ok(NewOrderItem {
        product_id: line.id,
        product_name: entry.title.to_string(),
        product_price: entry.price,
        quantity: line.qty,
        subtotal,
    })
}

/// Grand total for a set of priced lines plus shipping.
fn compute_total(items: &[NewOrderItem], shipping_fee: Decimal) -> Decimal {
    items.iter().map(|i| i.subtotal).sum::<Decimal>() + shipping_fee
}

/// Concrete implementation of OrderService using Unit of Work.
pub struct Orders<U: UnitOfWork> {
    uow: Arc<U>,
    notifier: Arc<dyn NotificationDispatcher>,
}

impl<U: UnitOfWork> Orders<U> {
    pub fn new(uow: Arc<U>, notifier: Arc<dyn NotificationDispatcher>) -> Self {
        Self { uow, notifier }
    }
}

#[async_trait]
impl<U: UnitOfWork> OrderService for Orders<U> {
    async fn place_order(
        &self,
        customer_id: i32,
        request: CheckoutRequest,
    ) -> AppResult<OrderConfirmation> {
        // Structural validation (non-empty cart, required fields) has
        // already run in the handler; everything here needs the catalog.
        let shipping_fee = request.shipping_fee.unwrap_or(Decimal::ZERO);
        let cart = request.cart.clone();
        let header = NewOrder {
            customer_id,
            customer_name: request.name.clone(),
            customer_email: request.email.clone(),
            customer_phone: request.phone.clone(),
            shipping_address: request.address.clone(),
            city: request.city.clone(),
            country: request.country.clone(),
            payment_method: request.payment.clone(),
            shipping_fee,
            total_amount: Decimal::ZERO,
        };
        let claimed_total = request.total;

        let (order_id, items, total) = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let mut items = Vec::with_capacity(cart.len());

                    for line in &cart {
                        if line.id >= FEED_ID_OFFSET {
                            items.push(price_feed_line(line)?);
                            continue;
                        }

                        let product =
                            ctx.products().find_by_id(line.id).await?.ok_or_else(|| {
                                AppError::validation(format!("Unknown product: {}", line.id))
                            })?;

                        if product.stock < line.qty {
                            return Err(AppError::validation(format!(
                                "Insufficient stock for {}",
                                product.name
                            )));
                        }

                        ctx.products().decrement_stock(line.id, line.qty).await?;

                        let subtotal = product.price * Decimal::from(line.qty);
                        items.push(NewOrderItem {
                            product_id: line.id,
                            product_name: product.name,
                            product_price: product.price,
                            quantity: line.qty,
                            subtotal,
                        });
                    }

                    let total = compute_total(&items, shipping_fee);
                    if total != claimed_total {
                        return Err(AppError::validation(format!(
                            "Order total mismatch: expected {}, got {}",
                            total, claimed_total
                        )));
                    }

                    let order_id = ctx
                        .orders()
                        .insert_order(NewOrder {
                            total_amount: total,
                            ..header
                        })
                        .await?;

                    for item in &items {
                        ctx.orders().insert_item(order_id, item.clone()).await?;
                    }

                    Ok((order_id, items, total))
                })
            })
            .await?;

        tracing::info!(order_id, customer_id, %total, "Order placed");

        // Post-commit: queue notifications. Failures are logged and
        // reflected in the flags, the order stands regardless.
        let invoice = EmailJob::new(
            request.email.clone(),
            format!("Your order #{} confirmation", order_id),
            render_invoice_html(order_id, &request.name, &items, shipping_fee, total),
        );
        let email_started = match self.notifier.dispatch_invoice(invoice).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(order_id, "Invoice email not queued: {}", e);
                false
            }
        };

        let alert = TelegramJob::new(render_order_alert(
            order_id,
            &request.name,
            &request.email,
            total,
            items.len(),
        ));
        let telegram_started = match self.notifier.dispatch_order_alert(alert).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(order_id, "Order alert not queued: {}", e);
                false
            }
        };

        Ok(OrderConfirmation {
            success: true,
            message: "Order placed successfully! Invoice and notifications are being sent."
                .to_string(),
            order_id,
            email_started,
            telegram_started,
        })
    }

    async fn list_orders(&self, status: Option<String>) -> AppResult<Vec<OrderSummary>> {
        let rows = self.uow.orders().list(status).await?;

        Ok(rows
            .into_iter()
            .map(|(order, items)| OrderSummary {
                id: order.id,
                customer_name: order.customer_name.clone(),
                customer_email: order.customer_email.clone(),
                total_amount: order.total_amount,
                status: order.status.to_string(),
                order_date: order.formatted_date(),
                item_count: items.len(),
            })
            .collect())
    }

    async fn order_details(&self, id: i32) -> AppResult<OrderDetails> {
        let (order, items) = self
            .uow
            .orders()
            .find_with_items(id)
            .await?
            .ok_or_not_found()?;

        Ok(build_details(order, &items))
    }

    async fn update_status(&self, id: i32, status: String) -> AppResult<()> {
        let status = status.trim().to_string();
        if status.is_empty() {
            return Err(AppError::validation("Status is required"));
        }

        self.uow.orders().update_status(id, status).await
    }
}

fn build_details(order: Order, items: &[OrderItem]) -> OrderDetails {
    OrderDetails {
        id: order.id,
        customer_name: order.customer_name.clone(),
        customer_email: order.customer_email.clone(),
        customer_phone: order.customer_phone.clone(),
        shipping_address: order.shipping_address.clone(),
        city: order.city.clone(),
        country: order.country.clone(),
        payment_method: order.payment_method.clone(),
        shipping_fee: order.shipping_fee,
        total_amount: order.total_amount,
        status: order.status.to_string(),
        order_date: order.formatted_date(),
        items: items.iter().map(OrderItemView::from).collect(),
    }
}
