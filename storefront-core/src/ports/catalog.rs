//! Catalog API port

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::Product;

/// Remote product catalog
///
/// Implementations return `Error::Fetch` for every kind of failure; callers
/// never need to tell a 404 from a timeout.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /products`
    async fn get_products(&self) -> Result<Vec<Product>>;

    /// `GET /products/{id}`
    async fn get_product(&self, id: u64) -> Result<Product>;
}
