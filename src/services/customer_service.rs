//! Customer service - admin account management.
//!
//! Backs both the "customer" and "user" admin surfaces; the only
//! difference between the two is the admin flag filter applied to the
//! listing. Deleting the account you are logged in as is refused.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::DEFAULT_GENDER;
use crate::domain::{CreateCustomer, Customer, Password, UpdateCustomer};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::{CustomerChanges, NewCustomer};
use crate::infra::UnitOfWork;

/// Customer account service trait for dependency injection.
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Non-admin accounts (the "customer" listing).
    async fn list_customers(&self) -> AppResult<Vec<Customer>>;

    /// Admin accounts (the "user" listing).
    async fn list_admins(&self) -> AppResult<Vec<Customer>>;

    async fn get(&self, id: i32) -> AppResult<Customer>;

    /// Create an account; `data.is_admin` decides which surface it
    /// appears on.
    async fn create(&self, data: CreateCustomer) -> AppResult<Customer>;

    async fn update(&self, id: i32, data: UpdateCustomer) -> AppResult<Customer>;

    /// Delete an account. `acting_id` is the authenticated admin making
    /// the call; deleting yourself is refused.
    async fn delete(&self, acting_id: i32, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CustomerService using Unit of Work.
pub struct Accounts<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Accounts<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_email_free(&self, email: &str, except_id: Option<i32>) -> AppResult<()> {
        if let Some(existing) = self.uow.customers().find_by_email(email).await? {
            if Some(existing.id) != except_id {
                return Err(AppError::conflict("Email"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> CustomerService for Accounts<U> {
    async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        let all = self.uow.customers().list().await?;
        Ok(all.into_iter().filter(|c| !c.is_admin).collect())
    }

    async fn list_admins(&self) -> AppResult<Vec<Customer>> {
        let all = self.uow.customers().list().await?;
        Ok(all.into_iter().filter(|c| c.is_admin).collect())
    }

    async fn get(&self, id: i32) -> AppResult<Customer> {
        self.uow.customers().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create(&self, data: CreateCustomer) -> AppResult<Customer> {
        self.ensure_email_free(&data.email, None).await?;

        let password_hash = Password::new(&data.password)?.into_string();
        self.uow
            .customers()
            .create(NewCustomer {
                name: data.name,
                email: data.email,
                password_hash,
                gender: data.gender.unwrap_or_else(|| DEFAULT_GENDER.to_string()),
                profile: data.profile,
                is_admin: data.is_admin,
            })
            .await
    }

    async fn update(&self, id: i32, data: UpdateCustomer) -> AppResult<Customer> {
        // Existence check up front so a bad ID is a 404, not a silent no-op
        self.get(id).await?;

        if let Some(email) = &data.email {
            self.ensure_email_free(email, Some(id)).await?;
        }

        let password_hash = match &data.password {
            Some(password) => Some(Password::new(password)?.into_string()),
            None => None,
        };

        self.uow
            .customers()
            .update(
                id,
                CustomerChanges {
                    name: data.name,
                    email: data.email,
                    gender: data.gender,
                    profile: data.profile,
                    password_hash,
                    is_admin: data.is_admin,
                },
            )
            .await
    }

    async fn delete(&self, acting_id: i32, id: i32) -> AppResult<()> {
        if acting_id == id {
            return Err(AppError::bad_request("You cannot delete your own account"));
        }

        self.get(id).await?;
        self.uow.customers().delete(id).await
    }
}
