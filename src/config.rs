//! Runtime configuration
//!
//! Values come from the environment, after `main` has loaded any `.env`
//! file with `dotenvy`.

use crate::error::{Result, StorefrontError};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `STOREFRONT_ADDR`: where the REST service listens
    pub bind_addr: SocketAddr,

    /// `STOREFRONT_CATALOG`: optional JSON file of products loaded at startup
    pub catalog_path: Option<PathBuf>,

    /// `STOREFRONT_API_URL`: base URL used by HTTP clients of the service
    pub api_base_url: String,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = get("STOREFRONT_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr.parse::<SocketAddr>().map_err(|e| {
            StorefrontError::Config(format!("STOREFRONT_ADDR {addr:?} is not a socket address: {e}"))
        })?;

        let config = Self {
            bind_addr,
            catalog_path: get("STOREFRONT_CATALOG").map(PathBuf::from),
            api_base_url: get("STOREFRONT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        };

        info!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}
