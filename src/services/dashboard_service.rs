//! Dashboard service - admin overview counts and revenue.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{COMPLETED_LIKE_STATUSES, ORDER_STATUS_PENDING};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Aggregate figures shown on the admin dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    pub products: u64,
    pub categories: u64,
    pub customers: u64,
    pub admins: u64,
    pub orders: u64,
    pub pending_orders: u64,
    /// Recognized revenue; see the fallback rules on `pick_revenue`
    pub revenue: Decimal,
}

/// Dashboard service trait for dependency injection.
#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn stats(&self) -> AppResult<DashboardStats>;
}

/// Choose which revenue figure to report.
///
/// Delivered orders are the source of truth. Stores that use looser
/// status labels fall back to the completed-like set, and a store with
/// no recognizable completed orders at all reports the running total of
/// everything ever ordered rather than a misleading zero.
fn pick_revenue(delivered: Decimal, completed_like: Decimal, all_orders: Decimal) -> Decimal {
    if delivered > Decimal::ZERO {
        delivered
    } else if completed_like > Decimal::ZERO {
        completed_like
    } else {
        all_orders
    }
}

/// Concrete implementation of DashboardService using Unit of Work.
pub struct Dashboard<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Dashboard<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DashboardService for Dashboard<U> {
    async fn stats(&self) -> AppResult<DashboardStats> {
        let products = self.uow.products().count().await?;
        let categories = self.uow.categories().count().await?;
        let customers = self.uow.customers().count_non_admins().await?;
        let admins = self.uow.customers().count_admins().await?;
        let orders = self.uow.orders().count().await?;
        let pending_orders = self
            .uow
            .orders()
            .count_by_status(ORDER_STATUS_PENDING.to_string())
            .await?;

        let delivered = self
            .uow
            .orders()
            .sum_totals(Some(vec!["delivered".to_string()]))
            .await?;
        let completed_like = self
            .uow
            .orders()
            .sum_totals(Some(
                COMPLETED_LIKE_STATUSES.iter().map(|s| s.to_string()).collect(),
            ))
            .await?;
        let all_orders = self.uow.orders().sum_totals(None).await?;

        Ok(DashboardStats {
            products,
            categories,
            customers,
            admins,
            orders,
            pending_orders,
            revenue: pick_revenue(delivered, completed_like, all_orders),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivered_revenue_wins_when_present() {
        assert_eq!(
            pick_revenue(
                Decimal::new(10000, 2),
                Decimal::new(15000, 2),
                Decimal::new(20000, 2)
            ),
            Decimal::new(10000, 2)
        );
    }

    #[test]
    fn falls_back_to_completed_like_then_all() {
        assert_eq!(
            pick_revenue(Decimal::ZERO, Decimal::new(15000, 2), Decimal::new(20000, 2)),
            Decimal::new(15000, 2)
        );
        assert_eq!(
            pick_revenue(Decimal::ZERO, Decimal::ZERO, Decimal::new(20000, 2)),
            Decimal::new(20000, 2)
        );
        assert_eq!(
            pick_revenue(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
            Decimal::ZERO
        );
    }
}
