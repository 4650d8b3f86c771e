//! Product repository for the local catalog partition.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use super::entities::product::{ActiveModel, Entity as ProductEntity};
use crate::domain::Product;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fields required to insert a product row
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub cost: Decimal,
    pub price: Decimal,
    pub category_id: i32,
    pub image: Option<String>,
    pub stock: i32,
}

/// Partial update; only `Some` fields are written
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub cost: Option<Decimal>,
    pub price: Option<Decimal>,
    pub category_id: Option<i32>,
    pub image: Option<String>,
    pub stock: Option<i32>,
}

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    async fn list(&self) -> AppResult<Vec<Product>>;

    async fn create(&self, new: NewProduct) -> AppResult<Product>;

    async fn update(&self, id: i32, changes: ProductChanges) -> AppResult<Product>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn list(&self) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn create(&self, new: NewProduct) -> AppResult<Product> {
        let active = ActiveModel {
            name: Set(new.name),
            cost: Set(new.cost),
            price: Set(new.price),
            category_id: Set(new.category_id),
            image: Set(new.image),
            stock: Set(new.stock),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Product::from(model))
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> AppResult<Product> {
        let model = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(cost) = changes.cost {
            active.cost = Set(cost);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(category_id) = changes.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(image) = changes.image {
            active.image = Set(Some(image));
        }
        if let Some(stock) = changes.stock {
            active.stock = Set(stock);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Product::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ProductEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        ProductEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
