//! Category repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use super::entities::category::{ActiveModel, Entity as CategoryEntity};
use crate::domain::Category;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Partial update; only `Some` fields are written
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Category repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>>;

    async fn list(&self) -> AppResult<Vec<Category>>;

    async fn create(
        &self,
        name: String,
        image: Option<String>,
        description: Option<String>,
    ) -> AppResult<Category>;

    async fn update(&self, id: i32, changes: CategoryChanges) -> AppResult<Category>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of CategoryRepository
pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        let result = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Category::from))
    }

    async fn list(&self) -> AppResult<Vec<Category>> {
        let models = CategoryEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn create(
        &self,
        name: String,
        image: Option<String>,
        description: Option<String>,
    ) -> AppResult<Category> {
        let active = ActiveModel {
            name: Set(name),
            image: Set(image),
            description: Set(description),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Category::from(model))
    }

    async fn update(&self, id: i32, changes: CategoryChanges) -> AppResult<Category> {
        let model = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(image) = changes.image {
            active.image = Set(Some(image));
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Category::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = CategoryEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        CategoryEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
