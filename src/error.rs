//! Storefront error types
//!
//! Every failure in the crate is a [`StorefrontError`]. None of them are fatal
//! to the process: callers classify them with [`StorefrontError::kind`] and show
//! [`StorefrontError::user_message`] as a transient notice.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Broad classes of failure, used to pick a notice and an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input, recovered locally.
    Validation,
    /// A referenced product could not be resolved.
    Resolution,
    /// The cart or catalog endpoint could not be reached or answered badly.
    Transport,
    /// Startup problems (configuration, files).
    Startup,
}

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Cart has no line for product {0}")]
    LineNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorefrontError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidQuantity(_) | Self::InvalidInput(_) | Self::LineNotFound(_) => {
                ErrorKind::Validation
            }
            Self::ProductNotFound(_) => ErrorKind::Resolution,
            Self::Transport(_) | Self::UnexpectedStatus { .. } | Self::Decode(_) => {
                ErrorKind::Transport
            }
            Self::Config(_) | Self::Io(_) => ErrorKind::Startup,
        }
    }

    /// Short text suitable for a toast shown to the shopper.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidQuantity(_) => "Quantity must be at least 1.".to_string(),
            Self::InvalidInput(reason) => reason.clone(),
            Self::LineNotFound(_) => "That item is no longer in your cart.".to_string(),
            Self::ProductNotFound(_) => "That product is no longer available.".to_string(),
            Self::Transport(_) | Self::UnexpectedStatus { .. } | Self::Decode(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            Self::Config(_) | Self::Io(_) => self.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, StorefrontError>;

// Malformed request parameters are the caller's fault, so they answer with
// the same JSON error body as any other validation failure.
impl From<QueryRejection> for StorefrontError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<JsonRejection> for StorefrontError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = match (&self, self.kind()) {
            (Self::ProductNotFound(_) | Self::LineNotFound(_), _) => StatusCode::NOT_FOUND,
            (_, ErrorKind::Validation) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
