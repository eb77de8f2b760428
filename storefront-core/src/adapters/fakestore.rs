//! Catalog HTTP client
//!
//! Talks to a Fake Store API compatible catalog:
//! - `GET /products` returns a JSON array of products
//! - `GET /products/{id}` returns a single product
//!
//! Every failure (transport, status, body) is logged here and collapsed into
//! a single `Error::Fetch` for the caller.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::result::{Error as DomainError, Result as DomainResult};
use crate::domain::Product;
use crate::ports::CatalogApi;

/// Default production API URL
pub const FAKESTORE_PRODUCTION_URL: &str = "https://fakestoreapi.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// HTTP client for the remote product catalog
#[derive(Debug, Clone)]
pub struct FakeStoreClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl FakeStoreClient {
    /// Create a client for the given base URL
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url).context("Invalid catalog base URL")?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            anyhow::bail!("Catalog base URL must use http or https");
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(&response)?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse catalog response from {}", path))
    }

    /// Map request errors to readable messages for the log
    fn map_request_error(&self, error: reqwest::Error) -> anyhow::Error {
        if error.is_timeout() {
            anyhow::anyhow!("Connection timed out after {}ms", self.timeout.as_millis())
        } else if error.is_connect() {
            anyhow::anyhow!("Unable to connect to catalog at {}", self.base_url)
        } else {
            anyhow::anyhow!("Catalog request failed: {}", error)
        }
    }

    fn check_response_status(&self, response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            anyhow::bail!("Catalog API error: HTTP {}", status.as_u16())
        }
    }
}

#[async_trait]
impl CatalogApi for FakeStoreClient {
    async fn get_products(&self) -> DomainResult<Vec<Product>> {
        self.get_json("/products").await.map_err(|e| {
            tracing::error!(error = %e, "error fetching products");
            DomainError::fetch("failed to fetch products")
        })
    }

    async fn get_product(&self, id: u64) -> DomainResult<Product> {
        self.get_json(&format!("/products/{}", id)).await.map_err(|e| {
            tracing::error!(product_id = id, error = %e, "error fetching product");
            DomainError::fetch("failed to fetch product")
        })
    }
}
