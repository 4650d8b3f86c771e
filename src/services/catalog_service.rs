//! Catalog service - merged storefront catalog and product management.
//!
//! The public catalog is the union of locally managed products and the
//! bundled external feed. Feed items are shifted above the local ID
//! range so one identifier space covers both partitions: IDs below
//! `FEED_ID_OFFSET` are local rows, IDs at or above it are feed items
//! addressed by `id - FEED_ID_OFFSET`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{FEED_DEFAULT_STOCK, FEED_ID_OFFSET};
use crate::domain::{CatalogItem, CatalogSource, Product};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::feed::{self, FeedProduct};
use crate::infra::repositories::{NewProduct, ProductChanges};
use crate::infra::UnitOfWork;

/// Margin applied to feed items whose feed carries no cost figure.
fn feed_cost(price: Decimal) -> Decimal {
    price * Decimal::new(7, 1)
}

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Full merged catalog: local products first, then the feed.
    async fn list_catalog(&self) -> AppResult<Vec<CatalogItem>>;

    /// Resolve one catalog item by merged identifier.
    async fn get_item(&self, id: i32) -> AppResult<CatalogItem>;

    /// Local products only (admin listing).
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    async fn get_product(&self, id: i32) -> AppResult<Product>;

    async fn create_product(&self, new: NewProduct) -> AppResult<Product>;

    async fn update_product(&self, id: i32, changes: ProductChanges) -> AppResult<Product>;

    async fn delete_product(&self, id: i32) -> AppResult<()>;
}

/// Build a catalog item from a local product row.
fn local_item(product: Product, category_name: Option<&str>) -> CatalogItem {
    CatalogItem {
        id: product.id,
        title: product.name,
        price: product.price,
        cost: product.cost,
        description: String::new(),
        category: category_name.unwrap_or("uncategorized").to_string(),
        image: product.image.unwrap_or_default(),
        stock: product.stock,
        source: CatalogSource::Local,
    }
}

/// Build a catalog item from a feed entry, applying the ID offset.
fn feed_item(entry: &FeedProduct) -> CatalogItem {
    CatalogItem {
        id: entry.id + FEED_ID_OFFSET,
        title: entry.title.to_string(),
        price: entry.price,
        cost: feed_cost(entry.price),
        description: entry.description.to_string(),
        category: entry.category.to_string(),
        image: entry.image.to_string(),
        stock: FEED_DEFAULT_STOCK,
        source: CatalogSource::External,
    }
}

/// Concrete implementation of CatalogService using Unit of Work.
pub struct Catalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Catalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Category id to name map for labelling local items.
    async fn category_names(&self) -> HashMap<i32, String> {
        match self.uow.categories().list().await {
            Ok(categories) => categories.into_iter().map(|c| (c.id, c.name)).collect(),
            Err(e) => {
                tracing::warn!("Failed to load categories for catalog: {}", e);
                HashMap::new()
            }
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for Catalog<U> {
    async fn list_catalog(&self) -> AppResult<Vec<CatalogItem>> {
        // The feed partition stays available even when the local store
        // is unreachable; local failures degrade rather than error.
        let locals = match self.uow.products().list().await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!("Local products unavailable, serving feed only: {}", e);
                Vec::new()
            }
        };

        let names = self.category_names().await;

        let mut items: Vec<CatalogItem> = locals
            .into_iter()
            .map(|p| {
                let name = names.get(&p.category_id).map(String::as_str);
                local_item(p, name)
            })
            .collect();

        items.extend(feed::all().iter().map(feed_item));
        Ok(items)
    }

    async fn get_item(&self, id: i32) -> AppResult<CatalogItem> {
        if id >= FEED_ID_OFFSET {
            let entry = feed::find(id - FEED_ID_OFFSET).ok_or_not_found()?;
            return Ok(feed_item(entry));
        }

        let product = self.uow.products().find_by_id(id).await?.ok_or_not_found()?;

        let names = self.category_names().await;
        let name = names.get(&product.category_id).map(String::as_str);
        Ok(local_item(product, name))
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.uow.products().list().await
    }

    async fn get_product(&self, id: i32) -> AppResult<Product> {
        self.uow.products().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_product(&self, new: NewProduct) -> AppResult<Product> {
        // category_id is a loose reference; items with a missing
        // category are labelled "uncategorized" at read time
        self.uow.products().create(new).await
    }

    async fn update_product(&self, id: i32, changes: ProductChanges) -> AppResult<Product> {
        if id >= FEED_ID_OFFSET {
            return Err(AppError::bad_request("Feed items cannot be modified"));
        }

        self.uow.products().update(id, changes).await
    }

    async fn delete_product(&self, id: i32) -> AppResult<()> {
        if id >= FEED_ID_OFFSET {
            return Err(AppError::bad_request("Feed items cannot be deleted"));
        }

        self.uow.products().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32) -> Product {
        Product {
            id,
            name: "Fox Hoodie".to_string(),
            cost: Decimal::new(1200, 2),
            price: Decimal::new(2500, 2),
            category_id: 1,
            image: None,
            stock: 10,
        }
    }

    #[test]
    fn local_items_keep_their_ids() {
        let item = local_item(product(3), Some("clothing"));
        assert_eq!(item.id, 3);
        assert_eq!(item.category, "clothing");
        assert!(matches!(item.source, CatalogSource::Local));
    }

    #[test]
    fn feed_items_are_offset_with_default_stock() {
        let entry = &feed::all()[0];
        let item = feed_item(entry);
        assert_eq!(item.id, entry.id + FEED_ID_OFFSET);
        assert_eq!(item.stock, FEED_DEFAULT_STOCK);
        assert!(matches!(item.source, CatalogSource::External));
    }

    #[test]
    fn feed_cost_is_seventy_percent_of_price() {
        assert_eq!(feed_cost(Decimal::new(1000, 2)), Decimal::new(700, 2));
    }

    #[test]
    fn missing_category_label_falls_back() {
        let item = local_item(product(1), None);
        assert_eq!(item.category, "uncategorized");
    }
}
