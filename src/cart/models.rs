//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain: the wire record exchanged with the cart endpoints, the
//! entries the server stores, and the priced lines shown to the shopper.

use super::pricing::compute_line_total;
use crate::catalog::Product;
use crate::error::{Result, StorefrontError};
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Wire Record
// =============================================================================

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A user's cart as returned by `GET /api/cart/:userId`.
///
/// The four arrays are index-aligned: position `i` of each describes the
/// same line. Any of them may be shorter than `product_ids`, missing, or
/// `null`, and single elements may be `null` too.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_ids: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub quantities: Vec<Option<u32>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub grams: Vec<Option<f64>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub final_prices: Vec<Option<f64>>,
}

impl CartRecord {
    pub fn from_entries(entries: &[CartEntry]) -> Self {
        Self {
            product_ids: entries.iter().map(|e| e.product_id.clone()).collect(),
            quantities: entries.iter().map(|e| Some(e.quantity)).collect(),
            grams: entries.iter().map(|e| Some(e.grams)).collect(),
            final_prices: entries.iter().map(|e| Some(e.final_price)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.product_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }
}

/// One stored cart line on the server side
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product_id: String,
    pub quantity: u32,
    pub grams: f64,
    /// Price of one unit at `grams`
    pub final_price: f64,
}

// =============================================================================
// Priced Line
// =============================================================================

/// A cart line joined with its catalog product.
///
/// Fields are private so that `item_total` can only ever be
/// `final_price * quantity`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    product: Product,
    quantity: u32,
    grams: f64,
    final_price: f64,
    item_total: f64,
}

impl CartLine {
    pub fn new(product: Product, quantity: u32, grams: f64, final_price: f64) -> Result<Self> {
        if quantity < 1 {
            return Err(StorefrontError::InvalidQuantity(quantity));
        }
        if !grams.is_finite() || grams <= 0.0 {
            return Err(StorefrontError::InvalidInput(format!(
                "Grams must be positive for product {}.",
                product.id
            )));
        }
        if !final_price.is_finite() || final_price < 0.0 {
            return Err(StorefrontError::InvalidInput(format!(
                "Price must not be negative for product {}.",
                product.id
            )));
        }

        Ok(Self {
            item_total: compute_line_total(final_price, quantity),
            product,
            quantity,
            grams,
            final_price,
        })
    }

    /// Copy of this line at a different quantity.
    pub fn with_quantity(&self, quantity: u32) -> Result<Self> {
        if quantity < 1 {
            return Err(StorefrontError::InvalidQuantity(quantity));
        }
        Ok(Self {
            quantity,
            item_total: compute_line_total(self.final_price, quantity),
            ..self.clone()
        })
    }

    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn grams(&self) -> f64 {
        self.grams
    }

    pub fn final_price(&self) -> f64 {
        self.final_price
    }

    pub fn item_total(&self) -> f64 {
        self.item_total
    }
}

// =============================================================================
// Endpoint Inputs
// =============================================================================

/// Query parameters of `POST /api/cart/add`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub user_id: String,

    pub product_id: String,

    /// Defaults to 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Defaults to the product weight, then 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grams: Option<f64>,

    /// Defaults to `price * grams`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
}

/// Query parameters of `PUT /api/cart/update`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantity {
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
}

/// Query parameters of `DELETE /api/cart/remove`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCart {
    pub user_id: String,
    pub product_id: String,
}
