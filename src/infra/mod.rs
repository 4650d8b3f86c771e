//! Infrastructure layer - database, repositories, external feed, uploads.

pub mod db;
pub mod feed;
pub mod repositories;
pub mod unit_of_work;
pub mod uploads;

pub use db::Database;
pub use unit_of_work::{
    NewOrder, NewOrderItem, Persistence, TransactionContext, TxOrderRepository, TxOrderStore,
    TxProductRepository, TxProductStore, UnitOfWork,
};
pub use uploads::ImageStore;
