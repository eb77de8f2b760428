//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for the external collaborators: the local
//! key/value storage that stands in for browser storage, and the remote
//! product catalog. Services depend only on these traits.

mod catalog;
mod storage;

pub use catalog::CatalogApi;
pub use storage::KeyValueStorage;
