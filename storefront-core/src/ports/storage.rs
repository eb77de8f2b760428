//! Key/value storage port

use crate::domain::result::Result;

/// Persistent string slots, keyed by name
///
/// Semantics follow browser local storage: `set` overwrites, `remove` on a
/// missing key is a no-op, and there is no cross-process coordination.
pub trait KeyValueStorage: Send + Sync {
    /// Read a slot, `None` if it was never written or has been removed
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a slot
    fn remove(&self, key: &str) -> Result<()>;
}
