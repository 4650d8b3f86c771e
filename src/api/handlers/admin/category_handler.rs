//! Admin category management handlers.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use super::UploadForm;
use crate::api::AppState;
use crate::config::UPLOAD_KIND_CATEGORY;
use crate::domain::Category;
use crate::errors::AppResult;
use crate::infra::repositories::CategoryChanges;

pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list_categories))
        .route("/create", post(create_category))
        .route("/update/:id", post(update_category))
        .route("/delete/:id", post(delete_category))
}

/// All categories.
#[utoipa::path(
    get,
    path = "/admin/category/list",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Categories", body = [Category]))
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.category_service.list().await?;
    Ok(Json(categories))
}

/// Create a category from a multipart form (`name`, `description`,
/// optional `image` file).
#[utoipa::path(
    post,
    path = "/admin/category/create",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Category>)> {
    let form = UploadForm::parse(&state.images, UPLOAD_KIND_CATEGORY, multipart).await?;

    let category = state
        .category_service
        .create(form.require("name")?, form.image(), form.text("description"))
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category; only submitted fields change.
#[utoipa::path(
    post,
    path = "/admin/category/update/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Unknown category")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<Category>> {
    let form = UploadForm::parse(&state.images, UPLOAD_KIND_CATEGORY, multipart).await?;

    let category = state
        .category_service
        .update(
            id,
            CategoryChanges {
                name: form.text("name"),
                description: form.text("description"),
                image: form.image(),
            },
        )
        .await?;

    Ok(Json(category))
}

/// Delete a category. Categories still referenced by products are
/// refused by the database.
#[utoipa::path(
    post,
    path = "/admin/category/delete/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Unknown category")
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.category_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
