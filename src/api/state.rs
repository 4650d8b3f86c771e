//! Application state - Dependency injection container.
//!
//! All handlers reach services through this state; nothing is global.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, ImageStore, Persistence};
use crate::services::{
    Accounts, Authenticator, AuthService, Catalog, CatalogService, Categories, CategoryService,
    CustomerService, Dashboard, DashboardService, NotificationDispatcher, Orders, OrderService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub catalog_service: Arc<dyn CatalogService>,
    pub category_service: Arc<dyn CategoryService>,
    pub customer_service: Arc<dyn CustomerService>,
    pub dashboard_service: Arc<dyn DashboardService>,
    pub order_service: Arc<dyn OrderService>,
    /// Uploaded-image storage
    pub images: ImageStore,
    /// Database handle (health checks)
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the full service graph over one database connection.
    pub fn from_config(
        database: Arc<Database>,
        notifier: Arc<dyn NotificationDispatcher>,
        config: Config,
    ) -> Self {
        let uow = Arc::new(Persistence::new(database.get_connection()));
        let images = ImageStore::new(config.upload_root.clone());

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            catalog_service: Arc::new(Catalog::new(uow.clone())),
            category_service: Arc::new(Categories::new(uow.clone())),
            customer_service: Arc::new(Accounts::new(uow.clone())),
            dashboard_service: Arc::new(Dashboard::new(uow.clone())),
            order_service: Arc::new(Orders::new(uow, notifier)),
            images,
            database,
        }
    }

    /// Create application state with manually injected services (tests).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        catalog_service: Arc<dyn CatalogService>,
        category_service: Arc<dyn CategoryService>,
        customer_service: Arc<dyn CustomerService>,
        dashboard_service: Arc<dyn DashboardService>,
        order_service: Arc<dyn OrderService>,
        images: ImageStore,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            catalog_service,
            category_service,
            customer_service,
            dashboard_service,
            order_service,
            images,
            database,
        }
    }
}
