//! CLI command implementations

pub mod auth;
pub mod config;
pub mod list;
pub mod product;
pub mod products;

use std::path::PathBuf;

use anyhow::{Context, Result};
use storefront_core::StorefrontContext;

/// Get the storefront directory from environment or default
pub fn get_storefront_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("STOREFRONT_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".storefront"))
}

/// Create the storefront context, creating the directory if needed
pub fn get_context() -> Result<StorefrontContext> {
    let storefront_dir = get_storefront_dir()?;

    std::fs::create_dir_all(&storefront_dir).with_context(|| {
        format!("Failed to create storefront directory: {:?}", storefront_dir)
    })?;

    StorefrontContext::new(&storefront_dir).context("Failed to initialize storefront context")
}
