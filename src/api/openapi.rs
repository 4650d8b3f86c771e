//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::admin::{
    category_handler, customer_handler, dashboard_handler, order_handler as admin_order_handler,
    product_handler, user_handler,
};
use crate::api::handlers::{auth_handler, order_handler, storefront_handler};
use crate::domain::{
    CartLine, CatalogItem, Category, CheckoutRequest, CustomerResponse, OrderConfirmation,
    OrderDetails, OrderItemView, OrderSummary, Product, UpdateCustomer,
};
use crate::services::{DashboardStats, TokenResponse};

/// OpenAPI documentation for the Fox Store API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fox Store",
        version = "0.1.0",
        description = "E-commerce storefront and admin back-office API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Storefront
        storefront_handler::index,
        storefront_handler::list_products,
        storefront_handler::product_detail,
        // Authentication
        auth_handler::register,
        auth_handler::login,
        auth_handler::logout,
        auth_handler::profile,
        // Checkout
        order_handler::place_order,
        // Admin
        dashboard_handler::dashboard,
        category_handler::list_categories,
        category_handler::create_category,
        category_handler::update_category,
        category_handler::delete_category,
        product_handler::list_products,
        product_handler::create_product,
        product_handler::update_product,
        product_handler::delete_product,
        customer_handler::list_customers,
        customer_handler::create_customer,
        customer_handler::update_customer,
        customer_handler::delete_customer,
        user_handler::list_users,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        admin_order_handler::list_orders,
        admin_order_handler::order_details,
        admin_order_handler::update_status,
    ),
    components(
        schemas(
            // Domain types
            CatalogItem,
            Category,
            Product,
            CustomerResponse,
            UpdateCustomer,
            CartLine,
            CheckoutRequest,
            OrderConfirmation,
            OrderSummary,
            OrderDetails,
            OrderItemView,
            DashboardStats,
            // Handler types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::AuthResponse,
            auth_handler::LogoutResponse,
            customer_handler::CreateAccountRequest,
            admin_order_handler::UpdateStatusRequest,
            admin_order_handler::UpdateStatusResponse,
            TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Storefront", description = "Public catalog browsing"),
        (name = "Authentication", description = "Customer registration and login"),
        (name = "Orders", description = "Checkout"),
        (name = "Admin", description = "Back-office management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /login"))
                        .build(),
                ),
            );
        }
    }
}
