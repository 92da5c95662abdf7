//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (CartRecord, CartEntry, CartLine, endpoint inputs)
//! - Line pricing and order aggregation
//! - Reconciliation of fetched cart records into priced lines
//! - Application state management
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod pricing;
pub mod reconcile;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{AddToCart, CartEntry, CartLine, CartRecord};
pub use pricing::{
    apply_addition, apply_quantity_change, apply_removal, compute_line_total, compute_order_total,
};
pub use reconcile::{reconcile_after_fetch, ProductLookup};
pub use state::{AppState, SharedState};
