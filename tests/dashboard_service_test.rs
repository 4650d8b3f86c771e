//! Dashboard service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use fox_store::errors::{AppError, AppResult};
use fox_store::infra::repositories::{
    CategoryRepository, CustomerRepository, MockCategoryRepository, MockCustomerRepository,
    MockOrderRepository, MockProductRepository, OrderRepository, ProductRepository,
};
use fox_store::infra::{TransactionContext, UnitOfWork};
use fox_store::services::{Dashboard, DashboardService};

struct TestUnitOfWork {
    customers: Arc<MockCustomerRepository>,
    categories: Arc<MockCategoryRepository>,
    products: Arc<MockProductRepository>,
    orders: Arc<MockOrderRepository>,
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn customers(&self) -> Arc<dyn CustomerRepository> {
        self.customers.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.categories.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.orders.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

/// Build a unit of work with fixed counts and per-status revenue sums.
fn stats_uow(delivered: Decimal, completed_like: Decimal, all: Decimal) -> TestUnitOfWork {
    let mut products = MockProductRepository::new();
    products.expect_count().returning(|| Ok(12));

    let mut categories = MockCategoryRepository::new();
    categories.expect_count().returning(|| Ok(3));

    let mut customers = MockCustomerRepository::new();
    customers.expect_count_non_admins().returning(|| Ok(40));
    customers.expect_count_admins().returning(|| Ok(2));

    let mut orders = MockOrderRepository::new();
    orders.expect_count().returning(|| Ok(9));
    orders.expect_count_by_status().returning(|_| Ok(4));
    orders.expect_sum_totals().returning(move |statuses| {
        Ok(match statuses {
            Some(s) if s == vec!["delivered".to_string()] => delivered,
            Some(_) => completed_like,
            None => all,
        })
    });

    TestUnitOfWork {
        customers: Arc::new(customers),
        categories: Arc::new(categories),
        products: Arc::new(products),
        orders: Arc::new(orders),
    }
}

#[tokio::test]
async fn stats_report_counts_and_delivered_revenue() {
    let uow = stats_uow(
        Decimal::new(30000, 2),
        Decimal::new(45000, 2),
        Decimal::new(90000, 2),
    );

    let stats = Dashboard::new(Arc::new(uow)).stats().await.unwrap();

    assert_eq!(stats.products, 12);
    assert_eq!(stats.categories, 3);
    assert_eq!(stats.customers, 40);
    assert_eq!(stats.admins, 2);
    assert_eq!(stats.orders, 9);
    assert_eq!(stats.pending_orders, 4);
    assert_eq!(stats.revenue, Decimal::new(30000, 2));
}

#[tokio::test]
async fn revenue_falls_back_to_completed_like_statuses() {
    let uow = stats_uow(Decimal::ZERO, Decimal::new(45000, 2), Decimal::new(90000, 2));

    let stats = Dashboard::new(Arc::new(uow)).stats().await.unwrap();
    assert_eq!(stats.revenue, Decimal::new(45000, 2));
}

#[tokio::test]
async fn revenue_falls_back_to_all_orders_last() {
    let uow = stats_uow(Decimal::ZERO, Decimal::ZERO, Decimal::new(90000, 2));

    let stats = Dashboard::new(Arc::new(uow)).stats().await.unwrap();
    assert_eq!(stats.revenue, Decimal::new(90000, 2));
}
