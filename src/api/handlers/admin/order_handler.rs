//! Admin order management handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{OrderDetails, OrderSummary};
use crate::errors::AppResult;

pub fn admin_order_routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list_orders))
        .route("/details/:id", get(order_details))
        .route("/update-status/:id", post(update_status))
}

/// Order list query string
#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderListQuery {
    /// Restrict to one status
    pub status: Option<String>,
}

/// Orders, newest first, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/admin/order/list",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(OrderListQuery),
    responses((status = 200, description = "Orders", body = [OrderSummary]))
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    let orders = state.order_service.list_orders(query.status).await?;
    Ok(Json(orders))
}

/// One order with its line items.
#[utoipa::path(
    get,
    path = "/admin/order/details/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = OrderDetails),
        (status = 404, description = "Unknown order")
    )
)]
pub async fn order_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<OrderDetails>> {
    let details = state.order_service.order_details(id).await?;
    Ok(Json(details))
}

/// Status update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    /// New status label (free text)
    #[validate(length(min = 1, message = "Status is required"))]
    #[schema(example = "shipping")]
    pub status: String,
}

/// Status update acknowledgement
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateStatusResponse {
    pub success: bool,
    pub status: String,
}

/// Overwrite an order's status.
#[utoipa::path(
    post,
    path = "/admin/order/update-status/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UpdateStatusResponse),
        (status = 404, description = "Unknown order")
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> AppResult<Json<UpdateStatusResponse>> {
    let status = payload.status.clone();
    state.order_service.update_status(id, payload.status).await?;

    Ok(Json(UpdateStatusResponse {
        success: true,
        status,
    }))
}
