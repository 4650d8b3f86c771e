//! HTTP request handlers.

pub mod admin;
pub mod auth_handler;
pub mod order_handler;
pub mod storefront_handler;

pub use admin::admin_routes;
pub use auth_handler::{account_routes, auth_routes};
pub use order_handler::order_routes;
pub use storefront_handler::storefront_routes;
