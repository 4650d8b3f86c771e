//! Account management service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::predicate::eq;

use fox_store::domain::{CreateCustomer, Customer, CustomerResponse, UpdateCustomer};
use fox_store::errors::{AppError, AppResult};
use fox_store::infra::repositories::{
    CategoryRepository, CustomerRepository, MockCategoryRepository, MockCustomerRepository,
    MockOrderRepository, MockProductRepository, OrderRepository, ProductRepository,
};
use fox_store::infra::{TransactionContext, UnitOfWork};
use fox_store::services::{Accounts, CustomerService};

struct TestUnitOfWork {
    customers: Arc<MockCustomerRepository>,
    categories: Arc<MockCategoryRepository>,
    products: Arc<MockProductRepository>,
    orders: Arc<MockOrderRepository>,
}

impl TestUnitOfWork {
    fn new(customers: MockCustomerRepository) -> Self {
        Self {
            customers: Arc::new(customers),
            categories: Arc::new(MockCategoryRepository::new()),
            products: Arc::new(MockProductRepository::new()),
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
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn account(id: i32, email: &str, is_admin: bool) -> Customer {
    Customer {
        id,
        name: format!("Account {}", id),
        email: email.to_string(),
        password_hash: "hashed".to_string(),
        gender: "male".to_string(),
        profile: None,
        is_admin,
    }
}

#[tokio::test]
async fn listings_split_on_the_admin_flag() {
    let mut repo = MockCustomerRepository::new();
    repo.expect_list().returning(|| {
        Ok(vec![
            account(1, "admin@store.test", true),
            account(2, "alice@store.test", false),
            account(3, "bob@store.test", false),
        ])
    });

    let service = Accounts::new(Arc::new(TestUnitOfWork::new(repo)));

    let customers = service.list_customers().await.unwrap();
    assert_eq!(customers.len(), 2);
    assert!(customers.iter().all(|c| !c.is_admin));
}

#[tokio::test]
async fn admin_listing_is_the_complement() {
    let mut repo = MockCustomerRepository::new();
    repo.expect_list().returning(|| {
        Ok(vec![
            account(1, "admin@store.test", true),
            account(2, "alice@store.test", false),
        ])
    });

    let service = Accounts::new(Arc::new(TestUnitOfWork::new(repo)));

    let admins = service.list_admins().await.unwrap();
    assert_eq!(admins.len(), 1);
    assert!(admins[0].is_admin);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let mut repo = MockCustomerRepository::new();
    repo.expect_find_by_email()
        .with(eq("taken@store.test"))
        .returning(|email| Ok(Some(account(5, email, false))));

    let service = Accounts::new(Arc::new(TestUnitOfWork::new(repo)));

    let err = service
        .create(CreateCustomer {
            name: "New".to_string(),
            email: "taken@store.test".to_string(),
            password: "secret123".to_string(),
            gender: None,
            profile: None,
            is_admin: false,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn bootstrap_admin_creation_sets_the_flag() {
    let mut repo = MockCustomerRepository::new();
    repo.expect_find_by_email()
        .with(eq("root@store.test"))
        .returning(|_| Ok(None));
    repo.expect_create()
        .withf(|new| new.is_admin && new.email == "root@store.test")
        .returning(|new| {
            Ok(Customer {
                id: 1,
                name: new.name,
                email: new.email,
                password_hash: new.password_hash,
                gender: new.gender,
                profile: new.profile,
                is_admin: new.is_admin,
            })
        });

    let service = Accounts::new(Arc::new(TestUnitOfWork::new(repo)));

    let admin = service
        .create(CreateCustomer {
            name: "Root".to_string(),
            email: "root@store.test".to_string(),
            password: "secret123".to_string(),
            gender: None,
            profile: None,
            is_admin: true,
        })
        .await
        .unwrap();

    assert!(admin.is_admin);
}

#[tokio::test]
async fn profile_lookup_never_exposes_the_password_hash() {
    let mut repo = MockCustomerRepository::new();
    repo.expect_find_by_id()
        .with(eq(7))
        .returning(|id| Ok(Some(account(id, "me@store.test", false))));

    let service = Accounts::new(Arc::new(TestUnitOfWork::new(repo)));
    let me = service.get(7).await.unwrap();

    let body = serde_json::to_value(CustomerResponse::from(me)).unwrap();
    assert_eq!(body["email"], "me@store.test");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn updating_to_your_own_email_is_allowed() {
    let mut repo = MockCustomerRepository::new();
    repo.expect_find_by_id()
        .with(eq(7))
        .returning(|id| Ok(Some(account(id, "me@store.test", false))));
    repo.expect_find_by_email()
        .with(eq("me@store.test"))
        .returning(|email| Ok(Some(account(7, email, false))));
    repo.expect_update()
        .returning(|id, _| Ok(account(id, "me@store.test", false)));

    let service = Accounts::new(Arc::new(TestUnitOfWork::new(repo)));

    let result = service
        .update(
            7,
            UpdateCustomer {
                name: Some("Renamed".to_string()),
                email: Some("me@store.test".to_string()),
                gender: None,
                profile: None,
                password: None,
                is_admin: None,
            },
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn deleting_your_own_account_is_refused() {
    // No expectations: the guard fires before any repository call
    let repo = MockCustomerRepository::new();
    let service = Accounts::new(Arc::new(TestUnitOfWork::new(repo)));

    let err = service.delete(9, 9).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn deleting_another_account_works() {
    let mut repo = MockCustomerRepository::new();
    repo.expect_find_by_id()
        .with(eq(4))
        .returning(|id| Ok(Some(account(id, "gone@store.test", false))));
    repo.expect_delete().with(eq(4)).returning(|_| Ok(()));

    let service = Accounts::new(Arc::new(TestUnitOfWork::new(repo)));
    assert!(service.delete(1, 4).await.is_ok());
}

#[tokio::test]
async fn deleting_an_unknown_account_is_not_found() {
    let mut repo = MockCustomerRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = Accounts::new(Arc::new(TestUnitOfWork::new(repo)));
    let err = service.delete(1, 42).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
