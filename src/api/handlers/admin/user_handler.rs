//! Admin user management handlers (admin accounts).
//!
//! Same underlying accounts as the customer surface, filtered to the
//! admin flag; created accounts here are admins.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};

use super::customer_handler::CreateAccountRequest;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CustomerResponse, UpdateCustomer};
use crate::errors::AppResult;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list_users))
        .route("/create", post(create_user))
        .route("/update/:id", post(update_user))
        .route("/delete/:id", post(delete_user))
}

/// Admin accounts.
#[utoipa::path(
    get,
    path = "/admin/user/list",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Admin accounts", body = [CustomerResponse]))
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<CustomerResponse>>> {
    let admins = state.customer_service.list_admins().await?;
    Ok(Json(
        admins.into_iter().map(CustomerResponse::from).collect(),
    ))
}

/// Create an admin account.
#[utoipa::path(
    post,
    path = "/admin/user/create",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Admin created", body = CustomerResponse),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<CustomerResponse>)> {
    let admin = state
        .customer_service
        .create(payload.into_domain(true))
        .await?;

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(admin))))
}

/// Update an admin account.
#[utoipa::path(
    post,
    path = "/admin/user/update/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Admin updated", body = CustomerResponse),
        (status = 404, description = "Unknown account")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCustomer>,
) -> AppResult<Json<CustomerResponse>> {
    let admin = state.customer_service.update(id, payload).await?;
    Ok(Json(CustomerResponse::from(admin)))
}

/// Delete an admin account. Deleting your own account is refused.
#[utoipa::path(
    post,
    path = "/admin/user/delete/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 204, description = "Admin deleted"),
        (status = 400, description = "Attempted self-delete"),
        (status = 404, description = "Unknown account")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.customer_service.delete(current_user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
