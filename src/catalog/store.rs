//! In-memory product catalog
//!
//! Products are kept in a `DashMap` keyed by id so handlers can read and
//! write concurrently without an outer lock.

use super::helpers::new_product_id;
use super::models::{Product, ProductInput, ProductQuery, SortOrder};
use crate::error::{Result, StorefrontError};
use dashmap::DashMap;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct Catalog {
    products: DashMap<String, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Inserts or replaces a product after validating it.
    pub fn insert(&self, product: Product) -> Result<()> {
        product.validate()?;
        self.products.insert(product.id.clone(), product);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.products.get(id).map(|p| p.value().clone())
    }

    /// Creates a product under a freshly generated id.
    pub fn create(&self, input: ProductInput) -> Result<Product> {
        let product = input.into_product(new_product_id())?;
        self.products.insert(product.id.clone(), product.clone());
        info!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    /// Replaces every editable field of an existing product.
    pub fn update(&self, id: &str, input: ProductInput) -> Result<Product> {
        let mut entry = self
            .products
            .get_mut(id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.to_string()))?;

        let updated = input.into_product(id.to_string())?;
        *entry = updated.clone();
        info!("Updated product {}", id);
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.products
            .remove(id)
            .map(|_| info!("Deleted product {}", id))
            .ok_or_else(|| StorefrontError::ProductNotFound(id.to_string()))
    }

    /// Lists products matching `query`.
    ///
    /// Filters are case-insensitive. Without a known `sort` the listing is
    /// ordered by id, and sorting is stable so ties keep that order.
    pub fn list(&self, query: &ProductQuery) -> Vec<Product> {
        let search = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        let category = query
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase);
        let metal_type = query
            .metal_type
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(str::to_lowercase);

        let mut products: Vec<Product> = self
            .products
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|p| {
                search
                    .as_deref()
                    .map_or(true, |needle| p.name.to_lowercase().contains(needle))
            })
            .filter(|p| {
                category
                    .as_deref()
                    .map_or(true, |c| p.category.to_lowercase() == c)
            })
            .filter(|p| {
                metal_type
                    .as_deref()
                    .map_or(true, |m| p.metal_type.to_lowercase() == m)
            })
            .collect();

        products.sort_by(|a, b| a.id.cmp(&b.id));

        match query.sort_order() {
            Some(SortOrder::PriceLowToHigh) => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
            Some(SortOrder::PriceHighToLow) => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
            Some(SortOrder::NameAsc) => {
                products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
            Some(SortOrder::NameDesc) => {
                products.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()))
            }
            None => {}
        }

        if let Some(limit) = query.limit {
            products.truncate(limit);
        }

        debug!("Catalog query {:?} matched {} product(s)", query, products.len());
        products
    }

    /// Loads a JSON array of products from `path`, returning how many were
    /// inserted.
    pub async fn load_seed(&self, path: &Path) -> Result<usize> {
        let raw = tokio::fs::read_to_string(path).await?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        let count = products.len();
        for product in products {
            self.insert(product)?;
        }
        Ok(count)
    }
}
