//! Product Catalog Module
//!
//! This module contains everything the storefront knows about products:
//! - Domain models (Product, ProductInput, ProductQuery)
//! - The in-memory catalog store with search, filtering and sorting
//! - REST API handlers for browsing and admin CRUD

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Product, ProductInput, ProductQuery, SortOrder};
pub use store::Catalog;
