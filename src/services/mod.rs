//! Service layer - application business logic.
//!
//! Each service is a trait (for dependency injection and test mocking)
//! with one concrete implementation over the Unit of Work.

pub mod auth_service;
pub mod catalog_service;
pub mod category_service;
pub mod customer_service;
pub mod dashboard_service;
pub mod notifier;
pub mod order_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use catalog_service::{Catalog, CatalogService};
pub use category_service::{Categories, CategoryService};
pub use customer_service::{Accounts, CustomerService};
pub use dashboard_service::{Dashboard, DashboardService, DashboardStats};
pub use notifier::{NotificationDispatcher, OutboxDispatcher};
pub use order_service::{OrderService, Orders};

#[cfg(any(test, feature = "test-utils"))]
pub use notifier::MockNotificationDispatcher;
