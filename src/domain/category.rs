//! Category domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "men's clothing")]
    pub name: String,
    /// Uploaded image filename, if any
    pub image: Option<String>,
    pub description: Option<String>,
}
