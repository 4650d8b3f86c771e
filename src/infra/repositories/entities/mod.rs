//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod category;
pub mod customer;
pub mod order;
pub mod order_item;
pub mod product;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use category::Entity as CategoryEntity;
#[allow(unused_imports)]
pub use customer::Entity as CustomerEntity;
#[allow(unused_imports)]
pub use order::Entity as OrderEntity;
#[allow(unused_imports)]
pub use order_item::Entity as OrderItemEntity;
#[allow(unused_imports)]
pub use product::Entity as ProductEntity;
