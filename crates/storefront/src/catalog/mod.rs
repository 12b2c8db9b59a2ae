//! Remote product catalog.
//!
//! # Endpoints
//!
//! - `GET /products` - every product
//! - `GET /products/categories` - category names
//! - `GET /products/{id}` - one product
//!
//! Each call is a single request with no retry and no timeout. Results are
//! mirrored into a [`CatalogCache`], which only keeps the latest snapshot.

mod cache;

pub use cache::{CatalogCache, ProductFilter};

use std::sync::Arc;

use fakestore_core::{Product, ProductId};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Status { status: u16 },

    /// No product has this ID.
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// The API answered with an empty body where a list was expected.
    #[error("Empty response body")]
    EmptyResponse,

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the remote catalog API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for the API rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            }),
        }
    }

    /// The API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// List every product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_json::<Vec<Product>>("/products")
            .await?
            .ok_or(CatalogError::EmptyResponse)
    }

    /// List every category name.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        self.get_json::<Vec<String>>("/products/categories")
            .await?
            .ok_or(CatalogError::EmptyResponse)
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this ID.
    /// Returns `CatalogError` if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        match self.get_json::<Product>(&format!("/products/{id}")).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) | Err(CatalogError::Status { status: 404 }) => Err(CatalogError::NotFound(id)),
            Err(e) => Err(e),
        }
    }

    /// GET `path` and parse the body as JSON.
    ///
    /// An empty or `null` body is `Ok(None)`; the public catalog answers
    /// unknown product IDs that way instead of with a 404.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, CatalogError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            debug!(%url, "Empty catalog response");
            return Ok(None);
        }

        match serde_json::from_str(trimmed) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = CatalogClient::new(&Url::parse("https://fakestoreapi.com/").unwrap());
        assert_eq!(client.base_url(), "https://fakestoreapi.com");
    }

    #[test]
    fn test_catalog_error_display() {
        assert_eq!(
            CatalogError::NotFound(ProductId::new(99)).to_string(),
            "Product 99 not found"
        );
        assert_eq!(
            CatalogError::Status { status: 500 }.to_string(),
            "Request failed with status code 500"
        );
    }
}
