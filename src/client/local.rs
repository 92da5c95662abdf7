//! In-process storefront: the cart view calls the shared state directly.

use super::StorefrontApi;
use crate::cart::{AddToCart, AppState, CartRecord, ProductLookup};
use crate::catalog::{Product, ProductQuery};
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;

#[async_trait]
impl ProductLookup for AppState {
    async fn product(&self, product_id: &str) -> Result<Product> {
        self.catalog
            .get(product_id)
            .ok_or_else(|| StorefrontError::ProductNotFound(product_id.to_string()))
    }
}

#[async_trait]
impl StorefrontApi for AppState {
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        Ok(self.catalog.list(query))
    }

    async fn cart(&self, user_id: &str) -> Result<CartRecord> {
        Ok(self.cart_record(user_id))
    }

    async fn add_to_cart(&self, request: &AddToCart) -> Result<()> {
        AppState::add_to_cart(self, request.clone()).map(|_| ())
    }

    async fn update_quantity(&self, user_id: &str, product_id: &str, quantity: u32) -> Result<()> {
        AppState::update_quantity(self, user_id, product_id, quantity).map(|_| ())
    }

    async fn remove_from_cart(&self, user_id: &str, product_id: &str) -> Result<()> {
        AppState::remove_from_cart(self, user_id, product_id).map(|_| ())
    }
}
