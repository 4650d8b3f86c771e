//! Admin back-office handlers.
//!
//! All routes in here sit behind the JWT middleware plus the admin gate.

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::routing::get;
use axum::Router;

use crate::api::AppState;
use crate::errors::{AppError, AppResult};
use crate::infra::ImageStore;

pub mod category_handler;
pub mod customer_handler;
pub mod dashboard_handler;
pub mod order_handler;
pub mod product_handler;
pub mod user_handler;

/// Create the admin router, one sub-tree per managed entity.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler::dashboard))
        .route("/dashboard", get(dashboard_handler::dashboard))
        .nest("/category", category_handler::category_routes())
        .nest("/product", product_handler::product_routes())
        .nest("/customer", customer_handler::customer_routes())
        .nest("/user", user_handler::user_routes())
        .nest("/order", order_handler::admin_order_routes())
}

/// Parsed multipart form: text fields plus an optionally stored image.
///
/// The image field (named `image`) is written to the image store as it
/// is read; everything else is collected as text.
pub(crate) struct UploadForm {
    fields: HashMap<String, String>,
    image: Option<String>,
}

impl UploadForm {
    pub async fn parse(
        images: &ImageStore,
        kind: &str,
        mut multipart: Multipart,
    ) -> AppResult<Self> {
        let mut fields = HashMap::new();
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Malformed form data: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(filename) if name == "image" => {
                    if filename.is_empty() {
                        // Empty file input on an unchanged form
                        continue;
                    }
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Upload failed: {}", e)))?;
                    image = Some(images.save(kind, &filename, &bytes).await?);
                }
                _ => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Malformed form data: {}", e)))?;
                    fields.insert(name, value);
                }
            }
        }

        Ok(Self { fields, image })
    }

    /// Stored image filename, when a file was uploaded.
    pub fn image(&self) -> Option<String> {
        self.image.clone()
    }

    /// A text field, trimmed; empty strings count as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// A required text field.
    pub fn require(&self, name: &str) -> AppResult<String> {
        self.text(name)
            .ok_or_else(|| AppError::validation(format!("Missing required field: {}", name)))
    }

    /// A required numeric field.
    pub fn require_parsed<T: std::str::FromStr>(&self, name: &str) -> AppResult<T> {
        self.require(name)?
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid value for field: {}", name)))
    }

    /// An optional numeric field.
    pub fn parsed<T: std::str::FromStr>(&self, name: &str) -> AppResult<Option<T>> {
        match self.text(name) {
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::validation(format!("Invalid value for field: {}", name))),
            None => Ok(None),
        }
    }
}
