//! Order repository.
//!
//! Order creation is transactional and lives in the unit of work; this
//! repository covers the admin read/update surface and the dashboard
//! aggregations.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::order::{self, ActiveModel, Entity as OrderEntity};
use super::entities::order_item::Entity as OrderItemEntity;
use crate::domain::{Order, OrderItem};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// List orders newest first, optionally filtered by exact status,
    /// each with its line items.
    async fn list(&self, status: Option<String>) -> AppResult<Vec<(Order, Vec<OrderItem>)>>;

    async fn find_with_items(&self, id: i32) -> AppResult<Option<(Order, Vec<OrderItem>)>>;

    /// Overwrite the status field; `NotFound` if the order does not exist
    async fn update_status(&self, id: i32, status: String) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;

    async fn count_by_status(&self, status: String) -> AppResult<u64>;

    /// Sum `total_amount` over orders whose status is in `statuses`,
    /// or over every order when `statuses` is `None`.
    async fn sum_totals(&self, statuses: Option<Vec<String>>) -> AppResult<Decimal>;
}

/// Concrete implementation of OrderRepository
pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn into_domain(rows: Vec<(order::Model, Vec<super::entities::order_item::Model>)>) -> Vec<(Order, Vec<OrderItem>)> {
    rows.into_iter()
        .map(|(o, items)| {
            (
                Order::from(o),
                items.into_iter().map(OrderItem::from).collect(),
            )
        })
        .collect()
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn list(&self, status: Option<String>) -> AppResult<Vec<(Order, Vec<OrderItem>)>> {
        let mut query = OrderEntity::find().order_by_desc(order::Column::OrderDate);

        if let Some(status) = status {
            query = query.filter(order::Column::Status.eq(status));
        }

        let rows = query
            .find_with_related(OrderItemEntity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(into_domain(rows))
    }

    async fn find_with_items(&self, id: i32) -> AppResult<Option<(Order, Vec<OrderItem>)>> {
        let rows = OrderEntity::find_by_id(id)
            .find_with_related(OrderItemEntity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(into_domain(rows).into_iter().next())
    }

    async fn update_status(&self, id: i32, status: String) -> AppResult<()> {
        let model = OrderEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now());

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        OrderEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn count_by_status(&self, status: String) -> AppResult<u64> {
        OrderEntity::find()
            .filter(order::Column::Status.eq(status))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn sum_totals(&self, statuses: Option<Vec<String>>) -> AppResult<Decimal> {
        let mut query = OrderEntity::find();

        if let Some(statuses) = statuses {
            query = query.filter(order::Column::Status.is_in(statuses));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;

        Ok(models.into_iter().map(|m| m.total_amount).sum())
    }
}
