//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories and manages database
//! transactions (begin, commit, rollback). Order placement is the one
//! workflow that spans several tables and must commit or roll back as a
//! unit; everything else is single-row and goes through the plain
//! repositories.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    AccessMode, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IsolationLevel, Set, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    CategoryRepository, CategoryStore, CustomerRepository, CustomerStore, OrderRepository,
    OrderStore, ProductRepository, ProductStore,
};
use crate::config::ORDER_STATUS_PENDING;
use crate::domain::Product;
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. The generic `transaction` method makes this trait
/// unmockable by mockall; tests mock the individual repositories or the
/// services instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn customers(&self) -> Arc<dyn CustomerRepository>;

    fn categories(&self) -> Arc<dyn CategoryRepository>;

    fn products(&self) -> Arc<dyn ProductRepository>;

    fn orders(&self) -> Arc<dyn OrderRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success and rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same unit of work. The repositories are trait objects so a
/// test unit of work can run the same closure over in-memory stores.
pub struct TransactionContext<'a> {
    products: &'a dyn TxProductRepository,
    orders: &'a dyn TxOrderRepository,
}

impl<'a> TransactionContext<'a> {
    pub fn new(
        products: &'a dyn TxProductRepository,
        orders: &'a dyn TxOrderRepository,
    ) -> Self {
        Self { products, orders }
    }

    /// Product access for this transaction
    pub fn products(&self) -> &'a dyn TxProductRepository {
        self.products
    }

    /// Order access for this transaction
    pub fn orders(&self) -> &'a dyn TxOrderRepository {
        self.orders
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    customer_repo: Arc<CustomerStore>,
    category_repo: Arc<CategoryStore>,
    product_repo: Arc<ProductStore>,
    order_repo: Arc<OrderStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        let customer_repo = Arc::new(CustomerStore::new(db.clone()));
        let category_repo = Arc::new(CategoryStore::new(db.clone()));
        let product_repo = Arc::new(ProductStore::new(db.clone()));
        let order_repo = Arc::new(OrderStore::new(db.clone()));
        Self {
            db,
            customer_repo,
            category_repo,
            product_repo,
            order_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn customers(&self) -> Arc<dyn CustomerRepository> {
        self.customer_repo.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.category_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.order_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let products = TxProductStore::new(&txn);
        let orders = TxOrderStore::new(&txn);
        let ctx = TransactionContext::new(&products, &orders);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-scoped product access.
///
/// Used by order intake to re-price cart lines and decrement stock in
/// the same unit of work that writes the order.
#[async_trait]
pub trait TxProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    /// Lower the stock count of a product by `quantity`.
    ///
    /// Caller has already verified availability; this just writes the
    /// new figure within the transaction.
    async fn decrement_stock(&self, id: i32, quantity: i32) -> AppResult<()>;
}

/// Transaction-scoped order access.
#[async_trait]
pub trait TxOrderRepository: Send + Sync {
    /// Insert the order header with status `pending` and return the
    /// generated identifier.
    async fn insert_order(&self, new: NewOrder) -> AppResult<i32>;

    /// Insert one line item under an already-inserted order.
    async fn insert_item(&self, order_id: i32, item: NewOrderItem) -> AppResult<()>;
}

/// Product store bound to a live database transaction.
pub struct TxProductStore<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxProductStore<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl TxProductRepository for TxProductStore<'_> {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        use super::repositories::entities::product::Entity as ProductEntity;

        let result = ProductEntity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn decrement_stock(&self, id: i32, quantity: i32) -> AppResult<()> {
        use super::repositories::entities::product::{ActiveModel, Entity as ProductEntity};

        let model = ProductEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let remaining = model.stock - quantity;
        let mut active: ActiveModel = model.into();
        active.stock = Set(remaining);

        active.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }
}

/// Fields needed to insert an order header within a transaction
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: String,
    pub city: String,
    pub country: String,
    pub payment_method: String,
    pub shipping_fee: Decimal,
    pub total_amount: Decimal,
}

/// One priced line ready for insertion under an order
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub product_name: String,
    pub product_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

/// Order store bound to a live database transaction.
pub struct TxOrderStore<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxOrderStore<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl TxOrderRepository for TxOrderStore<'_> {
    async fn insert_order(&self, new: NewOrder) -> AppResult<i32> {
        use super::repositories::entities::order::ActiveModel;

        let now = Utc::now();
        let active = ActiveModel {
            customer_id: Set(new.customer_id),
            customer_name: Set(new.customer_name),
            customer_email: Set(new.customer_email),
            customer_phone: Set(new.customer_phone),
            shipping_address: Set(new.shipping_address),
            city: Set(new.city),
            country: Set(new.country),
            payment_method: Set(new.payment_method),
            shipping_fee: Set(new.shipping_fee),
            total_amount: Set(new.total_amount),
            status: Set(ORDER_STATUS_PENDING.to_string()),
            order_date: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(self.txn).await.map_err(AppError::from)?;
        Ok(model.id)
    }

    async fn insert_item(&self, order_id: i32, item: NewOrderItem) -> AppResult<()> {
        use super::repositories::entities::order_item::ActiveModel;

        let active = ActiveModel {
            order_id: Set(order_id),
            product_id: Set(item.product_id),
            product_name: Set(item.product_name),
            product_price: Set(item.product_price),
            quantity: Set(item.quantity),
            subtotal: Set(item.subtotal),
            ..Default::default()
        };

        active.insert(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }
}
