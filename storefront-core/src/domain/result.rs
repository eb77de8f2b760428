//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Expected negative outcomes (wrong password, empty lists, missing token)
/// are never errors; they are `None` or empty collections.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(String),

    /// Any failure talking to the catalog API. Transport errors, bad status
    /// codes and undecodable bodies all collapse into this one variant.
    #[error("{0}")]
    Fetch(String),

    #[error("You must be logged in to view this page")]
    Unauthorized,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
