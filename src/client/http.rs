//! HTTP client for the storefront REST endpoints.

use super::StorefrontApi;
use crate::cart::{AddToCart, CartRecord, ProductLookup};
use crate::catalog::{Product, ProductQuery};
use crate::config::AppConfig;
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

/// Storefront backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStorefront {
    base_url: Url,
    http: Client,
}

impl HttpStorefront {
    /// Create a client rooted at `base_url`, e.g. `"http://localhost:8080"`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Config`] when the URL does not parse or
    /// cannot carry a path.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StorefrontError::Config(format!("invalid API URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StorefrontError::Config(format!(
                "API URL {base_url} cannot carry a path"
            )));
        }

        Ok(Self {
            base_url,
            http: Client::new(),
        })
    }

    /// Client for the backend named by `STOREFRONT_API_URL`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.api_base_url)
    }

    /// Appends percent-encoded `segments` to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                StorefrontError::Config(format!("API URL {} cannot carry a path", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Turns a non-success response into an error carrying its body.
///
/// A 400 means the server refused the input, so it surfaces as
/// [`StorefrontError::InvalidInput`] with the server's message.
async fn unexpected(response: Response) -> StorefrontError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::BAD_REQUEST {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        return StorefrontError::InvalidInput(message);
    }
    StorefrontError::UnexpectedStatus {
        status: status.as_u16(),
        body,
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(unexpected(response).await)
    }
}

#[async_trait]
impl ProductLookup for HttpStorefront {
    async fn product(&self, product_id: &str) -> Result<Product> {
        let url = self.endpoint(&["api", "products", product_id])?;
        debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorefrontError::ProductNotFound(product_id.to_string()));
        }

        let product: Product = ensure_success(response).await?.json().await?;
        product.validate()?;
        Ok(product)
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefront {
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let url = self.endpoint(&["api", "products"])?;
        let response = self.http.get(url).query(query).send().await?;
        let products: Vec<Product> = ensure_success(response).await?.json().await?;
        Ok(products)
    }

    async fn cart(&self, user_id: &str) -> Result<CartRecord> {
        let url = self.endpoint(&["api", "cart", user_id])?;
        debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        let record: CartRecord = ensure_success(response).await?.json().await?;
        Ok(record)
    }

    async fn add_to_cart(&self, request: &AddToCart) -> Result<()> {
        let url = self.endpoint(&["api", "cart", "add"])?;
        let response = self.http.post(url).query(request).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorefrontError::ProductNotFound(request.product_id.clone()));
        }
        ensure_success(response).await?;
        Ok(())
    }

    async fn update_quantity(&self, user_id: &str, product_id: &str, quantity: u32) -> Result<()> {
        let url = self.endpoint(&["api", "cart", "update"])?;
        let param = quantity.to_string();
        let response = self
            .http
            .put(url)
            .query(&[
                ("userId", user_id),
                ("productId", product_id),
                ("quantity", param.as_str()),
            ])
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(StorefrontError::LineNotFound(product_id.to_string()))
            }
            StatusCode::BAD_REQUEST if quantity < 1 => {
                return Err(StorefrontError::InvalidQuantity(quantity))
            }
            _ => {}
        }
        ensure_success(response).await?;
        Ok(())
    }

    async fn remove_from_cart(&self, user_id: &str, product_id: &str) -> Result<()> {
        let url = self.endpoint(&["api", "cart", "remove"])?;
        let response = self
            .http
            .delete(url)
            .query(&[("userId", user_id), ("productId", product_id)])
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
