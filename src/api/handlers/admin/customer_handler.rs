//! Admin customer management handlers (non-admin accounts).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateCustomer, CustomerResponse, UpdateCustomer};
use crate::errors::AppResult;

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list_customers))
        .route("/create", post(create_customer))
        .route("/update/:id", post(update_customer))
        .route("/delete/:id", post(delete_customer))
}

/// Account creation form shared by the customer and user surfaces
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

impl CreateAccountRequest {
    pub(crate) fn into_domain(self, is_admin: bool) -> CreateCustomer {
        CreateCustomer {
            name: self.name,
            email: self.email,
            password: self.password,
            gender: self.gender,
            profile: self.profile,
            is_admin,
        }
    }
}

/// Non-admin accounts.
#[utoipa::path(
    get,
    path = "/admin/customer/list",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Customers", body = [CustomerResponse]))
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CustomerResponse>>> {
    let customers = state.customer_service.list_customers().await?;
    Ok(Json(
        customers.into_iter().map(CustomerResponse::from).collect(),
    ))
}

/// Create a customer account.
#[utoipa::path(
    post,
    path = "/admin/customer/create",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<CustomerResponse>)> {
    let customer = state
        .customer_service
        .create(payload.into_domain(false))
        .await?;

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

/// Update a customer account; a provided password is re-hashed.
#[utoipa::path(
    post,
    path = "/admin/customer/update/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 404, description = "Unknown account"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCustomer>,
) -> AppResult<Json<CustomerResponse>> {
    let customer = state.customer_service.update(id, payload).await?;
    Ok(Json(CustomerResponse::from(customer)))
}

/// Delete a customer account. Deleting your own account is refused.
#[utoipa::path(
    post,
    path = "/admin/customer/delete/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 400, description = "Attempted self-delete"),
        (status = 404, description = "Unknown account")
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.customer_service.delete(current_user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
