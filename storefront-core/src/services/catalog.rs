//! Catalog service - product listing, search and details through the cache

use std::sync::Arc;
use std::time::Duration;

use crate::domain::result::Result;
use crate::domain::Product;
use crate::ports::CatalogApi;
use crate::services::cache::{CacheKey, ResponseCache};

/// Catalog reads, memoized for the configured freshness window
///
/// The caches live in memory only. Each `sf` run is a fresh process, so
/// there they start empty and every command goes to the network; reuse
/// happens only when one context serves several reads.
pub struct CatalogService {
    api: Arc<dyn CatalogApi>,
    listing: ResponseCache<CacheKey, Vec<Product>>,
    products: ResponseCache<CacheKey, Product>,
}

impl CatalogService {
    pub fn new(api: Arc<dyn CatalogApi>, cache_ttl: Duration) -> Self {
        Self {
            api,
            listing: ResponseCache::new(cache_ttl),
            products: ResponseCache::new(cache_ttl),
        }
    }

    /// Every product in the catalog
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let api = Arc::clone(&self.api);
        self.listing
            .fetch(CacheKey::Products, move || async move { api.get_products().await })
            .await
    }

    /// One product by id
    pub async fn get_product(&self, id: u64) -> Result<Product> {
        let api = Arc::clone(&self.api);
        self.products
            .fetch(CacheKey::Product(id), move || async move {
                api.get_product(id).await
            })
            .await
    }

    /// Products whose title contains `query`, ignoring case
    ///
    /// A blank query returns the full listing. Otherwise the query is matched
    /// as typed, surrounding whitespace included.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>> {
        let products = self.list_products().await?;
        if query.trim().is_empty() {
            return Ok(products);
        }
        Ok(products
            .into_iter()
            .filter(|product| product.title_matches(query))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::result::Error;
    use crate::services::cache::DEFAULT_CACHE_TTL;

    /// Catalog double that counts calls
    #[derive(Default)]
    struct CountingCatalog {
        list_calls: AtomicUsize,
        product_calls: AtomicUsize,
        fail: bool,
    }

    fn sample() -> Vec<Product> {
        vec![
            Product::new(1, "Foldsack No. 1 Backpack", Decimal::new(10995, 2)),
            Product::new(2, "Mens Casual Premium Slim Fit T-Shirts", Decimal::new(2230, 2)),
            Product::new(3, "Mens Cotton Jacket", Decimal::new(5599, 2)),
        ]
    }

    #[async_trait]
    impl CatalogApi for CountingCatalog {
        async fn get_products(&self) -> Result<Vec<Product>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::fetch("failed to fetch products"));
            }
            Ok(sample())
        }

        async fn get_product(&self, id: u64) -> Result<Product> {
            self.product_calls.fetch_add(1, Ordering::SeqCst);
            sample()
                .into_iter()
                .find(|p| p.id == id)
                .ok_or_else(|| Error::fetch("failed to fetch product"))
        }
    }

    fn service(api: Arc<CountingCatalog>) -> CatalogService {
        CatalogService::new(api, DEFAULT_CACHE_TTL)
    }

    #[tokio::test(start_paused = true)]
    async fn test_listing_is_cached_within_window() {
        let api = Arc::new(CountingCatalog::default());
        let catalog = service(api.clone());

        assert_eq!(catalog.list_products().await.unwrap().len(), 3);
        assert_eq!(catalog.list_products().await.unwrap().len(), 3);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(DEFAULT_CACHE_TTL).await;
        catalog.list_products().await.unwrap();
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_products_cached_per_id() {
        let api = Arc::new(CountingCatalog::default());
        let catalog = service(api.clone());

        assert_eq!(catalog.get_product(2).await.unwrap().id, 2);
        assert_eq!(catalog.get_product(2).await.unwrap().id, 2);
        assert_eq!(catalog.get_product(3).await.unwrap().id, 3);
        assert_eq!(api.product_calls.load(Ordering::SeqCst), 2);

        // the listing is its own key
        catalog.list_products().await.unwrap();
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_product_not_cached() {
        let api = Arc::new(CountingCatalog::default());
        let catalog = service(api.clone());

        assert!(catalog.get_product(99).await.is_err());
        assert!(catalog.get_product(99).await.is_err());
        assert_eq!(api.product_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_propagates() {
        let api = Arc::new(CountingCatalog {
            fail: true,
            ..CountingCatalog::default()
        });
        let catalog = service(api);

        let err = catalog.list_products().await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search() {
        let api = Arc::new(CountingCatalog::default());
        let catalog = service(api.clone());

        let mens: Vec<u64> = catalog
            .search("MENS")
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(mens, vec![2, 3]);

        assert_eq!(catalog.search("   ").await.unwrap().len(), 3);
        assert_eq!(catalog.search("jacket").await.unwrap().len(), 1);
        assert!(catalog.search("jacket ").await.unwrap().is_empty());
        assert!(catalog.search("laptop").await.unwrap().is_empty());
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
    }
}
