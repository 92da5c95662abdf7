//! Shopping Cart State Management
//!
//! This module manages the application state shared by every handler: the
//! product catalog and the per-user carts.

use super::helpers::{format_cart_summary, merge_entry};
use super::models::{AddToCart, CartEntry, CartRecord};
use crate::catalog::Catalog;
use crate::error::{Result, StorefrontError};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state containing the catalog and carts
#[derive(Debug, Default)]
pub struct AppState {
    pub catalog: Catalog,

    /// In-memory storage for carts, keyed by user id.
    /// DashMap allows concurrent access without external Mutexes.
    pub carts: DashMap<String, Vec<CartEntry>>,
}

fn require_user(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(StorefrontError::InvalidInput("A user id is required.".into()));
    }
    Ok(())
}

impl AppState {
    /// Creates a new AppState with an empty catalog and no carts
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            carts: DashMap::new(),
        }
    }

    /// The user's cart in wire form; empty when the user has none.
    pub fn cart_record(&self, user_id: &str) -> CartRecord {
        self.carts
            .get(user_id)
            .map(|entries| CartRecord::from_entries(&entries))
            .unwrap_or_default()
    }

    /// Adds a product to the user's cart, filling in defaults from the
    /// catalog.
    pub fn add_to_cart(&self, request: AddToCart) -> Result<CartRecord> {
        require_user(&request.user_id)?;

        let product = self
            .catalog
            .get(&request.product_id)
            .ok_or_else(|| StorefrontError::ProductNotFound(request.product_id.clone()))?;

        let quantity = request.quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(StorefrontError::InvalidQuantity(quantity));
        }

        let grams = request.grams.unwrap_or_else(|| product.default_grams());
        if !grams.is_finite() || grams <= 0.0 {
            return Err(StorefrontError::InvalidInput(
                "Grams must be a positive number.".into(),
            ));
        }

        let final_price = request
            .final_price
            .unwrap_or_else(|| product.price_for(grams));
        if !final_price.is_finite() || final_price < 0.0 {
            return Err(StorefrontError::InvalidInput(
                "Price must not be negative.".into(),
            ));
        }

        let mut entries = self.carts.entry(request.user_id.clone()).or_default();
        merge_entry(
            &mut entries,
            CartEntry {
                product_id: product.id,
                quantity,
                grams,
                final_price,
            },
        );

        info!(
            "Cart {} now holds: {}",
            request.user_id,
            format_cart_summary(&entries)
        );
        Ok(CartRecord::from_entries(&entries))
    }

    /// Sets the quantity of an existing cart line.
    pub fn update_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<CartRecord> {
        require_user(user_id)?;
        if quantity < 1 {
            return Err(StorefrontError::InvalidQuantity(quantity));
        }

        let mut entries = self
            .carts
            .get_mut(user_id)
            .ok_or_else(|| StorefrontError::LineNotFound(product_id.to_string()))?;

        let entry = entries
            .iter_mut()
            .find(|e| e.product_id == product_id)
            .ok_or_else(|| StorefrontError::LineNotFound(product_id.to_string()))?;
        entry.quantity = quantity;

        info!("Cart {}: {} set to quantity {}", user_id, product_id, quantity);
        Ok(CartRecord::from_entries(&entries))
    }

    /// Removes a product from the cart. Removing something that is not
    /// there succeeds and changes nothing.
    pub fn remove_from_cart(&self, user_id: &str, product_id: &str) -> Result<CartRecord> {
        require_user(user_id)?;

        let Some(mut entries) = self.carts.get_mut(user_id) else {
            return Ok(CartRecord::default());
        };

        let before = entries.len();
        entries.retain(|e| e.product_id != product_id);
        if entries.len() != before {
            info!("Cart {}: removed {}", user_id, product_id);
        }

        Ok(CartRecord::from_entries(&entries))
    }
}
