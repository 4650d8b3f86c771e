//! Admin product management handlers.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;

use super::UploadForm;
use crate::api::AppState;
use crate::config::UPLOAD_KIND_PRODUCT;
use crate::domain::Product;
use crate::errors::AppResult;
use crate::infra::repositories::{NewProduct, ProductChanges};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list_products))
        .route("/create", post(create_product))
        .route("/update/:id", post(update_product))
        .route("/delete/:id", post(delete_product))
}

/// Local products (the feed partition is not managed here).
#[utoipa::path(
    get,
    path = "/admin/product/list",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Local products", body = [Product]))
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.catalog_service.list_products().await?;
    Ok(Json(products))
}

/// Create a product from a multipart form (`name`, `cost`, `price`,
/// `category_id`, `stock`, optional `image` file).
#[utoipa::path(
    post,
    path = "/admin/product/create",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Product>)> {
    let form = UploadForm::parse(&state.images, UPLOAD_KIND_PRODUCT, multipart).await?;

    let product = state
        .catalog_service
        .create_product(NewProduct {
            name: form.require("name")?,
            cost: form.require_parsed::<Decimal>("cost")?,
            price: form.require_parsed::<Decimal>("price")?,
            category_id: form.require_parsed("category_id")?,
            image: form.image(),
            stock: form.parsed("stock")?.unwrap_or(0),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product; only submitted fields change. Feed items cannot
/// be updated.
#[utoipa::path(
    post,
    path = "/admin/product/update/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Feed item or validation error"),
        (status = 404, description = "Unknown product")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<Product>> {
    let form = UploadForm::parse(&state.images, UPLOAD_KIND_PRODUCT, multipart).await?;

    let product = state
        .catalog_service
        .update_product(
            id,
            ProductChanges {
                name: form.text("name"),
                cost: form.parsed::<Decimal>("cost")?,
                price: form.parsed::<Decimal>("price")?,
                category_id: form.parsed("category_id")?,
                image: form.image(),
                stock: form.parsed("stock")?,
            },
        )
        .await?;

    Ok(Json(product))
}

/// Delete a local product. Feed items cannot be deleted.
#[utoipa::path(
    post,
    path = "/admin/product/delete/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Feed item"),
        (status = 404, description = "Unknown product")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.catalog_service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
