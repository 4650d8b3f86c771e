//! Public storefront handlers - merged catalog browsing.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::AppState;
use crate::domain::CatalogItem;
use crate::errors::AppResult;

/// Create public storefront routes
pub fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/api/products", get(list_products))
        .route("/product", get(product_detail))
}

/// Storefront index: the merged catalog, local products first.
#[utoipa::path(
    get,
    path = "/",
    tag = "Storefront",
    responses(
        (status = 200, description = "Merged catalog", body = [CatalogItem])
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Json<Vec<CatalogItem>>> {
    let items = state.catalog_service.list_catalog().await?;
    Ok(Json(items))
}

/// Merged catalog as consumed by the storefront frontend.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Storefront",
    responses(
        (status = 200, description = "Merged catalog", body = [CatalogItem])
    )
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<CatalogItem>>> {
    let items = state.catalog_service.list_catalog().await?;
    Ok(Json(items))
}

/// Product detail query string
#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductQuery {
    /// Catalog item ID; the feed partition starts at 1000
    pub pro_id: i32,
}

/// One catalog item, local or feed.
#[utoipa::path(
    get,
    path = "/product",
    tag = "Storefront",
    params(ProductQuery),
    responses(
        (status = 200, description = "Catalog item", body = CatalogItem),
        (status = 404, description = "Unknown item")
    )
)]
pub async fn product_detail(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<CatalogItem>> {
    let item = state.catalog_service.get_item(query.pro_id).await?;
    Ok(Json(item))
}
