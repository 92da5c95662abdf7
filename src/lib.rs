//! Jewellery Mart storefront library
//!
//! Cart pricing and reconciliation for the jewellery storefront, together
//! with the catalog and cart REST service it talks to and typed clients for
//! that service.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod session;

// Infrastructure
pub mod client;
pub mod config;
pub mod error;
pub mod router;
pub mod telemetry;

pub use error::{ErrorKind, Result, StorefrontError};
