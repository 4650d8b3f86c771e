//! Order service unit tests (checkout, admin views, status updates).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rust_decimal::Decimal;
use validator::Validate;

use fox_store::domain::{CartLine, CheckoutRequest, Order, OrderItem, OrderStatus, Product};
use fox_store::errors::{AppError, AppResult};
use fox_store::infra::repositories::{
    CategoryRepository, CustomerRepository, MockCategoryRepository, MockCustomerRepository,
    MockOrderRepository, MockProductRepository, OrderRepository, ProductRepository,
};
use fox_store::infra::{
    NewOrder, NewOrderItem, TransactionContext, TxOrderRepository, TxProductRepository, UnitOfWork,
};
use fox_store::services::{MockNotificationDispatcher, Orders, OrderService};

struct TestUnitOfWork {
    customers: Arc<MockCustomerRepository>,
    categories: Arc<MockCategoryRepository>,
    products: Arc<MockProductRepository>,
    orders: Arc<MockOrderRepository>,
}

impl TestUnitOfWork {
    fn new(orders: MockOrderRepository) -> Self {
        Self {
            customers: Arc::new(MockCustomerRepository::new()),
            categories: Arc::new(MockCategoryRepository::new()),
            products: Arc::new(MockProductRepository::new()),
            orders: Arc::new(orders),
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
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn service(orders: MockOrderRepository) -> Orders<TestUnitOfWork> {
    Orders::new(
        Arc::new(TestUnitOfWork::new(orders)),
        Arc::new(MockNotificationDispatcher::new()),
    )
}

fn sample_order(id: i32) -> Order {
    Order {
        id,
        customer_id: 1,
        customer_name: "Alice".to_string(),
        customer_email: "alice@store.test".to_string(),
        customer_phone: None,
        shipping_address: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        country: "US".to_string(),
        payment_method: "cod".to_string(),
        shipping_fee: Decimal::new(500, 2),
        total_amount: Decimal::new(4500, 2),
        status: OrderStatus::Pending,
        order_date: Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap(),
    }
}

fn sample_item(order_id: i32) -> OrderItem {
    OrderItem {
        id: 1,
        order_id,
        product_id: 2,
        product_name: "Fox Hoodie".to_string(),
        product_price: Decimal::new(2000, 2),
        quantity: 2,
        subtotal: Decimal::new(4000, 2),
    }
}

#[tokio::test]
async fn order_listing_summarises_items_and_formats_dates() {
    let mut orders = MockOrderRepository::new();
    orders.expect_list().with(eq(None::<String>)).returning(|_| {
        Ok(vec![(
            sample_order(3),
            vec![sample_item(3), sample_item(3)],
        )])
    });

    let summaries = service(orders).list_orders(None).await.unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, 3);
    assert_eq!(summaries[0].item_count, 2);
    assert_eq!(summaries[0].status, "pending");
    assert_eq!(summaries[0].order_date, "2024-03-15 09:30");
}

#[tokio::test]
async fn order_details_include_line_items() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_find_with_items()
        .with(eq(3))
        .returning(|id| Ok(Some((sample_order(id), vec![sample_item(id)]))));

    let details = service(orders).order_details(3).await.unwrap();

    assert_eq!(details.id, 3);
    assert_eq!(details.items.len(), 1);
    assert_eq!(details.items[0].product_name, "Fox Hoodie");
    assert_eq!(details.total_amount, Decimal::new(4500, 2));
}

#[tokio::test]
async fn unknown_order_details_are_not_found() {
    let mut orders = MockOrderRepository::new();
    orders.expect_find_with_items().returning(|_| Ok(None));

    let err = service(orders).order_details(99).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn status_updates_trim_and_reject_blank() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_update_status()
        .with(eq(3), eq("shipping".to_string()))
        .returning(|_, _| Ok(()));

    let svc = service(orders);
    assert!(svc.update_status(3, "  shipping ".to_string()).await.is_ok());

    let err = svc.update_status(3, "   ".to_string()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

// Checkout request validation mirrors the storefront form rules.

fn checkout(cart: Vec<CartLine>) -> CheckoutRequest {
    CheckoutRequest {
        cart,
        name: "Alice".to_string(),
        email: "alice@store.test".to_string(),
        phone: None,
        address: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        country: "US".to_string(),
        payment: "cod".to_string(),
        total: Decimal::new(2000, 2),
        shipping_fee: None,
    }
}

fn line() -> CartLine {
    CartLine {
        id: 1,
        title: "Fox Hoodie".to_string(),
        price: Decimal::new(2000, 2),
        qty: 1,
    }
}

#[test]
fn empty_cart_fails_validation() {
    let request = checkout(vec![]);
    let errors = request.validate().unwrap_err();
    assert!(format!("{}", errors).contains("Cart is empty"));
}

#[test]
fn missing_required_field_is_named() {
    let mut request = checkout(vec![line()]);
    request.address = String::new();

    let errors = request.validate().unwrap_err();
    assert!(format!("{}", errors).contains("Missing required field: address"));
}

#[test]
fn zero_quantity_lines_fail_validation() {
    let mut bad = line();
    bad.qty = 0;

    let request = checkout(vec![bad]);
    assert!(request.validate().is_err());
}

#[test]
fn complete_checkout_passes_validation() {
    assert!(checkout(vec![line()]).validate().is_ok());
}

// Checkout proper runs against an in-memory unit of work whose
// transaction really executes the closure, committing only on success.

#[derive(Clone, Default)]
struct StoreState {
    products: HashMap<i32, Product>,
    orders: Vec<(i32, NewOrder)>,
    items: Vec<(i32, NewOrderItem)>,
    next_order_id: i32,
}

struct TxSession {
    state: Mutex<StoreState>,
}

#[async_trait]
impl TxProductRepository for TxSession {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        Ok(self.state.lock().unwrap().products.get(&id).cloned())
    }

    async fn decrement_stock(&self, id: i32, quantity: i32) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let product = state.products.get_mut(&id).ok_or(AppError::NotFound)?;
        product.stock -= quantity;
        Ok(())
    }
}

#[async_trait]
impl TxOrderRepository for TxSession {
    async fn insert_order(&self, new: NewOrder) -> AppResult<i32> {
        let mut state = self.state.lock().unwrap();
        state.next_order_id += 1;
        let id = state.next_order_id;
        state.orders.push((id, new));
        Ok(id)
    }

    async fn insert_item(&self, order_id: i32, item: NewOrderItem) -> AppResult<()> {
        self.state.lock().unwrap().items.push((order_id, item));
        Ok(())
    }
}

struct CheckoutUnitOfWork {
    committed: Mutex<StoreState>,
    customers: Arc<MockCustomerRepository>,
    categories: Arc<MockCategoryRepository>,
    products: Arc<MockProductRepository>,
    orders: Arc<MockOrderRepository>,
}

impl CheckoutUnitOfWork {
    fn with_products(products: Vec<Product>) -> Self {
        let committed = StoreState {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            ..StoreState::default()
        };
        Self {
            committed: Mutex::new(committed),
            customers: Arc::new(MockCustomerRepository::new()),
            categories: Arc::new(MockCategoryRepository::new()),
            products: Arc::new(MockProductRepository::new()),
            orders: Arc::new(MockOrderRepository::new()),
        }
    }

    fn snapshot(&self) -> StoreState {
        self.committed.lock().unwrap().clone()
    }
}

#[async_trait]
impl UnitOfWork for CheckoutUnitOfWork {
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

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let working = self.committed.lock().unwrap().clone();
        let session = TxSession {
            state: Mutex::new(working),
        };
        let result = f(TransactionContext::new(&session, &session)).await;
        if result.is_ok() {
            *self.committed.lock().unwrap() = session.state.into_inner().unwrap();
        }
        result
    }
}

fn stocked(id: i32, name: &str, price: Decimal, stock: i32) -> Product {
    Product {
        id,
        name: name.to_string(),
        cost: price,
        price,
        category_id: 1,
        image: None,
        stock,
    }
}

fn quiet_notifier() -> MockNotificationDispatcher {
    let mut notifier = MockNotificationDispatcher::new();
    notifier.expect_dispatch_invoice().returning(|_| Ok(()));
    notifier.expect_dispatch_order_alert().returning(|_| Ok(()));
    notifier
}

#[tokio::test]
async fn checkout_commits_order_items_and_stock_in_one_transaction() {
    let uow = Arc::new(CheckoutUnitOfWork::with_products(vec![stocked(
        1,
        "Fox Hoodie",
        Decimal::new(1000, 2),
        5,
    )]));
    let svc = Orders::new(uow.clone(), Arc::new(quiet_notifier()));

    // The client-side line price is stale on purpose; only the claimed
    // grand total has to match the catalog price.
    let mut request = checkout(vec![CartLine {
        id: 1,
        title: "Fox Hoodie".to_string(),
        price: Decimal::new(100, 2),
        qty: 2,
    }]);
    request.total = Decimal::new(2000, 2);

    let confirmation = svc.place_order(9, request).await.unwrap();

    assert!(confirmation.success);
    assert_eq!(confirmation.order_id, 1);
    assert!(confirmation.email_started);
    assert!(confirmation.telegram_started);

    let state = uow.snapshot();
    assert_eq!(state.orders.len(), 1);
    let (order_id, header) = &state.orders[0];
    assert_eq!(*order_id, 1);
    assert_eq!(header.customer_id, 9);
    assert_eq!(header.total_amount, Decimal::new(2000, 2));

    assert_eq!(state.items.len(), 1);
    let (_, item) = &state.items[0];
    assert_eq!(item.product_price, Decimal::new(1000, 2));
    assert_eq!(item.subtotal, Decimal::new(2000, 2));

    assert_eq!(state.products[&1].stock, 3);
}

#[tokio::test]
async fn total_mismatch_rolls_the_order_back() {
    let uow = Arc::new(CheckoutUnitOfWork::with_products(vec![stocked(
        1,
        "Fox Hoodie",
        Decimal::new(1000, 2),
        5,
    )]));
    let svc = Orders::new(uow.clone(), Arc::new(MockNotificationDispatcher::new()));

    let mut request = checkout(vec![CartLine {
        id: 1,
        title: "Fox Hoodie".to_string(),
        price: Decimal::new(1000, 2),
        qty: 2,
    }]);
    request.total = Decimal::new(1900, 2);

    let err = svc.place_order(9, request).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("total mismatch"));

    let state = uow.snapshot();
    assert!(state.orders.is_empty());
    assert!(state.items.is_empty());
    assert_eq!(state.products[&1].stock, 5);
}

#[tokio::test]
async fn unknown_product_rejects_the_whole_checkout() {
    let uow = Arc::new(CheckoutUnitOfWork::with_products(vec![]));
    let svc = Orders::new(uow.clone(), Arc::new(MockNotificationDispatcher::new()));

    let mut request = checkout(vec![CartLine {
        id: 42,
        title: "Ghost".to_string(),
        price: Decimal::new(2000, 2),
        qty: 1,
    }]);
    request.total = Decimal::new(2000, 2);

    let err = svc.place_order(9, request).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("Unknown product: 42"));
    assert!(uow.snapshot().orders.is_empty());
}

#[tokio::test]
async fn insufficient_stock_rejects_and_leaves_stock_untouched() {
    let uow = Arc::new(CheckoutUnitOfWork::with_products(vec![stocked(
        1,
        "Fox Hoodie",
        Decimal::new(1000, 2),
        5,
    )]));
    let svc = Orders::new(uow.clone(), Arc::new(MockNotificationDispatcher::new()));

    let mut request = checkout(vec![CartLine {
        id: 1,
        title: "Fox Hoodie".to_string(),
        price: Decimal::new(1000, 2),
        qty: 9,
    }]);
    request.total = Decimal::new(9000, 2);

    let err = svc.place_order(9, request).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("Insufficient stock for Fox Hoodie"));

    let state = uow.snapshot();
    assert!(state.orders.is_empty());
    assert_eq!(state.products[&1].stock, 5);
}

#[tokio::test]
async fn failed_notification_enqueue_keeps_the_order() {
    let uow = Arc::new(CheckoutUnitOfWork::with_products(vec![stocked(
        1,
        "Fox Hoodie",
        Decimal::new(1000, 2),
        5,
    )]));

    let mut notifier = MockNotificationDispatcher::new();
    notifier
        .expect_dispatch_invoice()
        .returning(|_| Err(AppError::internal("queue down")));
    notifier.expect_dispatch_order_alert().returning(|_| Ok(()));
    let svc = Orders::new(uow.clone(), Arc::new(notifier));

    let mut request = checkout(vec![CartLine {
        id: 1,
        title: "Fox Hoodie".to_string(),
        price: Decimal::new(1000, 2),
        qty: 1,
    }]);
    request.total = Decimal::new(1000, 2);

    let confirmation = svc.place_order(9, request).await.unwrap();

    assert!(confirmation.success);
    assert!(!confirmation.email_started);
    assert!(confirmation.telegram_started);
    assert_eq!(uow.snapshot().orders.len(), 1);
}
