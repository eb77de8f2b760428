//! Storefront Core - product catalog client logic
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Core entities (Product, User) and the error type
//! - **ports**: Trait definitions for external collaborators (KeyValueStorage, CatalogApi)
//! - **services**: Token codec, session, mock auth, cart/favorites lists, cached catalog
//! - **adapters**: Concrete implementations (DuckDB storage, in-memory storage, HTTP catalog)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::duckdb::DuckDbStorage;
use adapters::fakestore::FakeStoreClient;
use config::Config;
use ports::{CatalogApi, KeyValueStorage};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{Product, Rating, User};

/// File name of the local storage database
pub const STORAGE_DB_FILE: &str = "storefront.duckdb";

/// Main context for storefront operations
///
/// Owns every store and service for one process. Nothing is global: tests
/// build isolated contexts from their own storage and catalog.
pub struct StorefrontContext {
    pub config: Config,
    pub storage: Arc<dyn KeyValueStorage>,
    pub session: SessionStore,
    pub auth: AuthService,
    pub catalog: CatalogService,
    pub cart: ListStore,
    pub favorites: ListStore,
}

impl StorefrontContext {
    /// Create a context backed by `storefront.duckdb` and the HTTP catalog
    pub fn new(storefront_dir: &Path) -> Result<Self> {
        let config = Config::load(storefront_dir)?;

        let db_path = storefront_dir.join(STORAGE_DB_FILE);
        let storage = DuckDbStorage::new(&db_path)
            .with_context(|| format!("Failed to open storage at {:?}", db_path))?;

        let api = FakeStoreClient::new(&config.api_base_url, config.api_timeout)?;

        Ok(Self::from_parts(config, Arc::new(storage), Arc::new(api)))
    }

    /// Assemble a context from explicit collaborators
    ///
    /// Lists are hydrated and the session is readable as soon as this returns.
    pub fn from_parts(
        config: Config,
        storage: Arc<dyn KeyValueStorage>,
        api: Arc<dyn CatalogApi>,
    ) -> Self {
        let session = SessionStore::new(Arc::clone(&storage));
        let auth = AuthService::new(MockAuthenticator::from_config(&config), session.clone());
        let catalog = CatalogService::new(api, config.cache_ttl);
        let cart = ListStore::cart(Arc::clone(&storage));
        let favorites = ListStore::favorites(Arc::clone(&storage));

        Self {
            config,
            storage,
            session,
            auth,
            catalog,
            cart,
            favorites,
        }
    }

    /// The list store for `kind`
    pub fn list(&self, kind: ListKind) -> &ListStore {
        match kind {
            ListKind::Cart => &self.cart,
            ListKind::Favorites => &self.favorites,
        }
    }

    pub fn list_mut(&mut self, kind: ListKind) -> &mut ListStore {
        match kind {
            ListKind::Cart => &mut self.cart,
            ListKind::Favorites => &mut self.favorites,
        }
    }
}
