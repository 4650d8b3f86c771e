//! Customer repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use super::entities::customer::{self, ActiveModel, Entity as CustomerEntity};
use crate::domain::Customer;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fields required to insert a customer row
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub gender: String,
    pub profile: Option<String>,
    pub is_admin: bool,
}

/// Partial update; only `Some` fields are written
#[derive(Debug, Clone, Default)]
pub struct CustomerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub profile: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: Option<bool>,
}

/// Customer repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>>;

    async fn list(&self) -> AppResult<Vec<Customer>>;

    async fn create(&self, new: NewCustomer) -> AppResult<Customer>;

    /// Apply a partial update; `NotFound` if the row does not exist
    async fn update(&self, id: i32, changes: CustomerChanges) -> AppResult<Customer>;

    /// Delete by ID; `NotFound` if the row does not exist
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Count accounts with the admin flag set
    async fn count_admins(&self) -> AppResult<u64>;

    /// Count accounts without the admin flag
    async fn count_non_admins(&self) -> AppResult<u64>;
}

/// Concrete implementation of CustomerRepository
pub struct CustomerStore {
    db: DatabaseConnection,
}

impl CustomerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for CustomerStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>> {
        let result = CustomerEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Customer::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        let result = CustomerEntity::find()
            .filter(customer::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Customer::from))
    }

    async fn list(&self) -> AppResult<Vec<Customer>> {
        let models = CustomerEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Customer::from).collect())
    }

    async fn create(&self, new: NewCustomer) -> AppResult<Customer> {
        let active = ActiveModel {
            name: Set(new.name),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            gender: Set(new.gender),
            profile: Set(new.profile),
            is_admin: Set(new.is_admin),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Customer::from(model))
    }

    async fn update(&self, id: i32, changes: CustomerChanges) -> AppResult<Customer> {
        let model = CustomerEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(gender) = changes.gender {
            active.gender = Set(gender);
        }
        if let Some(profile) = changes.profile {
            active.profile = Set(Some(profile));
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(is_admin) = changes.is_admin {
            active.is_admin = Set(is_admin);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Customer::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = CustomerEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn count_admins(&self) -> AppResult<u64> {
        CustomerEntity::find()
            .filter(customer::Column::IsAdmin.eq(true))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn count_non_admins(&self) -> AppResult<u64> {
        CustomerEntity::find()
            .filter(customer::Column::IsAdmin.eq(false))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
