//! Storefront API Clients
//!
//! The cart view talks to the catalog and cart endpoints through
//! [`StorefrontApi`]. Two implementations exist:
//! - [`HttpStorefront`], speaking the REST contract over HTTP
//! - [`AppState`](crate::cart::AppState) itself, for in-process use

pub mod http;
pub mod local;

use crate::cart::{AddToCart, CartRecord};
use crate::catalog::{Product, ProductQuery};
use crate::error::Result;
use async_trait::async_trait;

pub use crate::cart::ProductLookup;
pub use http::HttpStorefront;

/// Request/response operations against the storefront backend.
///
/// Product resolution comes from the [`ProductLookup`] supertrait.
#[async_trait]
pub trait StorefrontApi: ProductLookup {
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>>;

    async fn cart(&self, user_id: &str) -> Result<CartRecord>;

    async fn add_to_cart(&self, request: &AddToCart) -> Result<()>;

    async fn update_quantity(&self, user_id: &str, product_id: &str, quantity: u32) -> Result<()>;

    async fn remove_from_cart(&self, user_id: &str, product_id: &str) -> Result<()>;
}
