//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the KeyValueStorage port
//! - An in-memory map for the KeyValueStorage port
//! - Fake Store API HTTP client for the CatalogApi port

pub mod duckdb;
pub mod fakestore;
pub mod memory;

#[cfg(test)]
pub mod fakestore_mock;
