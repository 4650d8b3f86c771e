//! Checkout handler.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Extension, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CheckoutRequest, OrderConfirmation};
use crate::errors::AppResult;

/// Create checkout routes (JWT required)
pub fn order_routes() -> Router<AppState> {
    Router::new().route("/placeOrder", post(place_order))
}

/// Place an order for the authenticated customer.
///
/// The cart is re-priced server-side and stock is checked inside the
/// order transaction; the submitted total must match the recomputation.
#[utoipa::path(
    post,
    path = "/placeOrder",
    tag = "Orders",
    request_body = CheckoutRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Order placed", body = OrderConfirmation),
        (status = 400, description = "Empty cart, missing field, bad product, stock or total mismatch"),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn place_order(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<OrderConfirmation>)> {
    let confirmation = state
        .order_service
        .place_order(current_user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(confirmation)))
}
