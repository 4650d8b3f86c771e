//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod category_repository;
mod customer_repository;
pub(crate) mod entities;
mod order_repository;
mod product_repository;

pub use category_repository::{CategoryChanges, CategoryRepository, CategoryStore};
pub use customer_repository::{
    CustomerChanges, CustomerRepository, CustomerStore, NewCustomer,
};
pub use order_repository::{OrderRepository, OrderStore};
pub use product_repository::{NewProduct, ProductChanges, ProductRepository, ProductStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use customer_repository::MockCustomerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use order_repository::MockOrderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
