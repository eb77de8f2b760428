//! DuckDB key/value storage
//!
//! Persists the storage slots (session token, cart, favorites) in a single
//! table of `storefront.duckdb`. Each write replaces the whole value.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::Utc;
use duckdb::{params, Connection};

use crate::domain::result::{Error as DomainError, Result as DomainResult};
use crate::ports::KeyValueStorage;

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS sys_local_storage (
    key VARCHAR PRIMARY KEY,
    value VARCHAR NOT NULL,
    updated_at VARCHAR NOT NULL
)";

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

/// DuckDB-backed implementation of [`KeyValueStorage`]
pub struct DuckDbStorage {
    conn: Mutex<Connection>,
}

impl DuckDbStorage {
    /// Open (or create) the storage database and make sure the table exists
    ///
    /// Opening retries with exponential backoff when another process holds
    /// the file lock, e.g. two `sf` invocations started at the same time.
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    let storage = Self {
                        conn: Mutex::new(conn),
                    };
                    storage.ensure_schema()?;
                    return Ok(storage);
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        tracing::warn!(
                            attempt = attempt + 1,
                            max = MAX_RETRIES,
                            delay_ms = delay.as_millis() as u64,
                            "storage database busy, retrying: {}",
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow!("Failed to open database after {} retries", MAX_RETRIES)))
    }

    /// Open a throwaway in-memory database (useful for previews and tests)
    pub fn in_memory() -> Result<Self> {
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_in_memory_with_flags(config)?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.ensure_schema()?;
        Ok(storage)
    }

    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // Extension autoloading stays off; nothing here needs extensions
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        Ok(Connection::open_with_flags(db_path, config)?)
    }

    fn ensure_schema(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(CREATE_TABLE_SQL)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT value FROM sys_local_storage WHERE key = ?")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT OR REPLACE INTO sys_local_storage (key, value, updated_at) VALUES (?, ?, ?)",
            params![key, value, now],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM sys_local_storage WHERE key = ?", params![key])?;
        Ok(())
    }
}

impl KeyValueStorage for DuckDbStorage {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        self.read(key)
            .map_err(|e| DomainError::storage(format!("failed to read '{}': {}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.write(key, value)
            .map_err(|e| DomainError::storage(format!("failed to write '{}': {}", key, e)))
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        self.delete(key)
            .map_err(|e| DomainError::storage(format!("failed to remove '{}': {}", key, e)))
    }
}
