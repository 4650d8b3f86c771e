//! Catalog service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use fox_store::domain::{CatalogSource, Category, Product};
use fox_store::errors::{AppError, AppResult};
use fox_store::infra::repositories::{
    CategoryRepository, CustomerRepository, MockCategoryRepository, MockCustomerRepository,
    MockOrderRepository, MockProductRepository, NewProduct, OrderRepository, ProductRepository,
};
use fox_store::infra::{TransactionContext, UnitOfWork};
use fox_store::services::{Catalog, CatalogService};

/// Test mock for UnitOfWork over mockall repositories
struct TestUnitOfWork {
    customers: Arc<MockCustomerRepository>,
    categories: Arc<MockCategoryRepository>,
    products: Arc<MockProductRepository>,
    orders: Arc<MockOrderRepository>,
}

impl TestUnitOfWork {
    fn new(products: MockProductRepository, categories: MockCategoryRepository) -> Self {
        Self {
            customers: Arc::new(MockCustomerRepository::new()),
            categories: Arc::new(categories),
            products: Arc::new(products),
            orders: Arc::new(MockOrderRepository::new()),
        }
    }
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
        // Transaction not supported in test mock
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn local_product(id: i32, category_id: i32) -> Product {
    Product {
        id,
        name: format!("Product {}", id),
        cost: Decimal::new(500, 2),
        price: Decimal::new(999, 2),
        category_id,
        image: Some("shirt.png".to_string()),
        stock: 12,
    }
}

fn clothing_category() -> Category {
    Category {
        id: 1,
        name: "clothing".to_string(),
        image: None,
        description: None,
    }
}

#[tokio::test]
async fn merged_catalog_has_locals_first_then_feed() {
    let mut products = MockProductRepository::new();
    products
        .expect_list()
        .returning(|| Ok(vec![local_product(1, 1), local_product(2, 1)]));

    let mut categories = MockCategoryRepository::new();
    categories
        .expect_list()
        .returning(|| Ok(vec![clothing_category()]));

    let service = Catalog::new(Arc::new(TestUnitOfWork::new(products, categories)));
    let items = service.list_catalog().await.unwrap();

    let feed_len = fox_store::infra::feed::all().len();
    assert_eq!(items.len(), 2 + feed_len);

    // Local partition first, with local IDs and the category label
    assert_eq!(items[0].id, 1);
    assert_eq!(items[0].category, "clothing");
    assert!(matches!(items[0].source, CatalogSource::Local));

    // Feed partition after, all offset into the reserved ID range
    for item in &items[2..] {
        assert!(item.id >= 1000);
        assert!(matches!(item.source, CatalogSource::External));
        assert_eq!(item.stock, 50);
    }
}

#[tokio::test]
async fn catalog_degrades_to_feed_only_when_local_store_fails() {
    let mut products = MockProductRepository::new();
    products
        .expect_list()
        .returning(|| Err(AppError::internal("connection refused")));

    let mut categories = MockCategoryRepository::new();
    categories.expect_list().returning(|| Ok(vec![]));

    let service = Catalog::new(Arc::new(TestUnitOfWork::new(products, categories)));
    let items = service.list_catalog().await.unwrap();

    assert_eq!(items.len(), fox_store::infra::feed::all().len());
    assert!(items.iter().all(|i| i.id >= 1000));
}

#[tokio::test]
async fn get_item_resolves_both_partitions() {
    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(|id| Ok(Some(local_product(id, 1))));

    let mut categories = MockCategoryRepository::new();
    categories
        .expect_list()
        .returning(|| Ok(vec![clothing_category()]));

    let service = Catalog::new(Arc::new(TestUnitOfWork::new(products, categories)));

    let local = service.get_item(2).await.unwrap();
    assert_eq!(local.id, 2);
    assert!(matches!(local.source, CatalogSource::Local));

    // 1001 resolves feed entry 1, not local row 1001
    let feed = service.get_item(1001).await.unwrap();
    assert_eq!(feed.id, 1001);
    assert!(matches!(feed.source, CatalogSource::External));
}

#[tokio::test]
async fn get_item_unknown_ids_are_not_found() {
    let mut products = MockProductRepository::new();
    products.expect_find_by_id().returning(|_| Ok(None));

    let categories = MockCategoryRepository::new();
    let service = Catalog::new(Arc::new(TestUnitOfWork::new(products, categories)));

    assert!(matches!(
        service.get_item(77).await.unwrap_err(),
        AppError::NotFound
    ));
    // Feed partition miss: no such raw feed entry
    assert!(matches!(
        service.get_item(1999).await.unwrap_err(),
        AppError::NotFound
    ));
}

#[tokio::test]
async fn products_can_be_created_without_a_category_row() {
    // No category expectations: category_id is a loose reference and
    // nothing checks it on write
    let mut products = MockProductRepository::new();
    products.expect_create().returning(|new| {
        Ok(Product {
            id: 10,
            name: new.name,
            cost: new.cost,
            price: new.price,
            category_id: new.category_id,
            image: new.image,
            stock: new.stock,
        })
    });

    let categories = MockCategoryRepository::new();
    let service = Catalog::new(Arc::new(TestUnitOfWork::new(products, categories)));

    let created = service
        .create_product(NewProduct {
            name: "Orphan".to_string(),
            cost: Decimal::new(500, 2),
            price: Decimal::new(999, 2),
            category_id: 77,
            image: None,
            stock: 3,
        })
        .await
        .unwrap();

    assert_eq!(created.category_id, 77);
}

#[tokio::test]
async fn orphaned_products_are_labelled_uncategorized() {
    let mut products = MockProductRepository::new();
    products
        .expect_list()
        .returning(|| Ok(vec![local_product(1, 77)]));

    let mut categories = MockCategoryRepository::new();
    categories
        .expect_list()
        .returning(|| Ok(vec![clothing_category()]));

    let service = Catalog::new(Arc::new(TestUnitOfWork::new(products, categories)));
    let items = service.list_catalog().await.unwrap();

    assert_eq!(items[0].category, "uncategorized");
}

#[tokio::test]
async fn feed_items_cannot_be_deleted_or_updated() {
    // No repository expectations: the guard fires before any data access
    let products = MockProductRepository::new();
    let categories = MockCategoryRepository::new();
    let service = Catalog::new(Arc::new(TestUnitOfWork::new(products, categories)));

    assert!(matches!(
        service.delete_product(1001).await.unwrap_err(),
        AppError::BadRequest(_)
    ));
    assert!(matches!(
        service
            .update_product(1001, Default::default())
            .await
            .unwrap_err(),
        AppError::BadRequest(_)
    ));
}
