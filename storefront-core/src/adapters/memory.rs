//! In-memory key/value storage

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStorage;

/// Volatile [`KeyValueStorage`], handy for tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        slots.remove(key);
        Ok(())
    }
}

/// Storage whose reads or writes always fail, wrapping a [`MemoryStorage`]
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FailingStorage {
    pub inner: MemoryStorage,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

#[cfg(test)]
impl FailingStorage {
    pub fn reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl KeyValueStorage for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(Error::storage("read failed"));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::storage("disk full"));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::storage("disk full"));
        }
        self.inner.remove(key)
    }
}
