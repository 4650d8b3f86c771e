//! Domain layer - Core business entities and logic
//!
//! Domain models represent business concepts independent of
//! infrastructure concerns. No sea-orm or axum types appear here.

pub mod category;
pub mod customer;
pub mod order;
pub mod password;
pub mod product;

pub use category::Category;
pub use customer::{CreateCustomer, Customer, CustomerResponse, UpdateCustomer};
pub use order::{
    CartLine, CheckoutRequest, Order, OrderConfirmation, OrderDetails, OrderItem, OrderItemView,
    OrderStatus, OrderSummary,
};
pub use password::Password;
pub use product::{CatalogItem, CatalogSource, Product};
