//! Category service - admin category management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Category;
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::CategoryChanges;
use crate::infra::UnitOfWork;

/// Category service trait for dependency injection.
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Category>>;

    async fn get(&self, id: i32) -> AppResult<Category>;

    async fn create(
        &self,
        name: String,
        image: Option<String>,
        description: Option<String>,
    ) -> AppResult<Category>;

    async fn update(&self, id: i32, changes: CategoryChanges) -> AppResult<Category>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CategoryService using Unit of Work.
pub struct Categories<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Categories<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CategoryService for Categories<U> {
    async fn list(&self) -> AppResult<Vec<Category>> {
        self.uow.categories().list().await
    }

    async fn get(&self, id: i32) -> AppResult<Category> {
        self.uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create(
        &self,
        name: String,
        image: Option<String>,
        description: Option<String>,
    ) -> AppResult<Category> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Category name is required"));
        }

        self.uow.categories().create(name, image, description).await
    }

    async fn update(&self, id: i32, changes: CategoryChanges) -> AppResult<Category> {
        self.get(id).await?;
        self.uow.categories().update(id, changes).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.get(id).await?;
        // Products keep their category_id; orphaned products show as
        // "uncategorized" in the catalog
        self.uow.categories().delete(id).await
    }
}
