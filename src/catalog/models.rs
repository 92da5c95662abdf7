//! Catalog Domain Models
//!
//! This module contains the normalized product entity and the query and
//! input shapes accepted by the catalog endpoints.

use crate::error::{Result, StorefrontError};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product Entity
// =============================================================================

/// A catalog product. `price` is the cost of one gram.
///
/// `id` is the only identifier. Older payloads spell it `_id`; that spelling
/// is accepted on the way in and never written back out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub metal_type: String,

    /// Price per gram
    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,

    /// Grams shown by default on the product page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Checks the invariants every product must satisfy before it enters the
    /// catalog or a cart.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(StorefrontError::InvalidInput(
                "Product id must not be empty.".into(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(StorefrontError::InvalidInput(format!(
                "Product {} has no name.",
                self.id
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(StorefrontError::InvalidInput(format!(
                "Product {} has an invalid price.",
                self.id
            )));
        }
        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(StorefrontError::InvalidInput(format!(
                    "Product {} has an invalid weight.",
                    self.id
                )));
            }
        }
        Ok(())
    }

    /// Grams used when the shopper has not picked a weight.
    pub fn default_grams(&self) -> f64 {
        self.weight.filter(|w| w.is_finite() && *w > 0.0).unwrap_or(1.0)
    }

    /// Price of one unit at `grams`.
    pub fn price_for(&self, grams: f64) -> f64 {
        self.price * grams
    }
}

// =============================================================================
// Inputs
// =============================================================================

/// Body of the admin create/update endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub metal_type: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductInput {
    /// Builds a validated product carrying `id`.
    pub fn into_product(self, id: String) -> Result<Product> {
        let product = Product {
            id,
            name: self.name,
            category: self.category,
            metal_type: self.metal_type,
            price: self.price,
            original_price: self.original_price,
            weight: self.weight,
            badge: self.badge,
            image: self.image,
            description: self.description,
        };
        product.validate()?;
        Ok(product)
    }
}

/// Ordering accepted by the `sort` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceLowToHigh,
    PriceHighToLow,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    /// Unknown names yield `None` and leave the listing order alone.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "priceLowToHigh" => Some(Self::PriceLowToHigh),
            "priceHighToLow" => Some(Self::PriceHighToLow),
            "nameAsc" => Some(Self::NameAsc),
            "nameDesc" => Some(Self::NameDesc),
            _ => None,
        }
    }
}

/// Query parameters of `GET /api/products`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metal_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ProductQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort.as_deref().and_then(SortOrder::parse)
    }
}
