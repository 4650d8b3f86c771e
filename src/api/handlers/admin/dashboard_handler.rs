//! Admin dashboard handler.

use axum::{extract::State, response::Json};

use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::DashboardStats;

/// Store-wide counts and revenue.
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard figures", body = DashboardStats),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = state.dashboard_service.stats().await?;
    Ok(Json(stats))
}
