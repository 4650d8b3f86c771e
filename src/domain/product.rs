//! Product and merged-catalog domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Locally stored product row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub cost: Decimal,
    pub price: Decimal,
    pub category_id: i32,
    /// Uploaded image filename, if any
    pub image: Option<String>,
    pub stock: i32,
}

/// Where a catalog item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Stored in the local product table
    Local,
    /// Served from the fixed external feed (IDs offset by +1000)
    External,
}

/// One entry in the merged storefront catalog.
///
/// Local products and external feed items are normalised into this shape;
/// the `source` tag and the ID partition tell them apart.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogItem {
    /// Catalog-wide identifier (feed items carry their offset ID)
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Shirt")]
    pub title: String,
    #[schema(example = 10.0)]
    pub price: Decimal,
    /// Wholesale cost (feed items: price scaled by a fixed ratio)
    pub cost: Decimal,
    pub description: String,
    pub category: String,
    /// Image URL or path
    pub image: String,
    pub stock: i32,
    pub source: CatalogSource,
}
