//! Authentication handlers - register, login, logout, profile.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateCustomer, CustomerResponse};
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// Customer registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "John Doe")]
    pub name: String,
    /// E-mail address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Password (minimum 6 characters, also enforced by the domain)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "hunter2!", min_length = 6)]
    pub password: String,
    /// Gender, defaults to "male" when omitted
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

/// Customer login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "hunter2!")]
    pub password: String,
}

/// Registration / login response: account plus bearer token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub customer: CustomerResponse,
    pub token: TokenResponse,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

/// Routes that need an authenticated customer (JWT layered in the router)
pub fn account_routes() -> Router<AppState> {
    Router::new().route("/profile", get(profile))
}

/// Register a new customer account and log it in
#[utoipa::path(
    post,
    path = "/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and logged in", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let (customer, token) = state
        .auth_service
        .register(CreateCustomer {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            gender: payload.gender,
            profile: payload.profile,
            is_admin: false,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            customer: CustomerResponse::from(customer),
            token,
        }),
    ))
}

/// Login and get a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (customer, token) = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(AuthResponse {
        customer: CustomerResponse::from(customer),
        token,
    }))
}

/// Logout acknowledgement body
#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
}

/// Logout.
///
/// Tokens are stateless; the client discards its copy and this endpoint
/// just acknowledges.
#[utoipa::path(
    get,
    path = "/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Logged out", body = LogoutResponse)
    )
)]
pub async fn logout() -> Json<LogoutResponse> {
    Json(LogoutResponse {
        message: "Logged out".to_string(),
    })
}

/// Current account profile.
///
/// Reads the row fresh rather than echoing token claims, so renames and
/// admin-flag changes show up immediately.
#[utoipa::path(
    get,
    path = "/profile",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated account", body = CustomerResponse),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<CustomerResponse>> {
    let account = state.customer_service.get(current_user.id).await?;
    Ok(Json(CustomerResponse::from(account)))
}
