//! Fox Store - e-commerce storefront and admin back-office API.
//!
//! A storefront that merges locally managed products with a bundled
//! external feed, takes authenticated checkouts with server-side
//! re-pricing, and exposes an admin surface for categories, products,
//! accounts and orders. Order notifications go through a durable
//! Postgres-backed job queue.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, feed, uploads)
//! - **jobs**: Background notification jobs
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Start the notification worker
//! cargo run -- jobs work
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Customer, Password};
pub use errors::{AppError, AppResult};
