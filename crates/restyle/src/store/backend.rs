use crate::error::Result;
use serde_json::Value;
use std::collections::BTreeMap;

/// Abstract interface for the host's key-value persistence.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::RuleStore`] handles the "what" (canonical writes, empty-record
/// removal, per-domain locking). Values are opaque JSON: backends never
/// interpret them, which is what lets legacy shapes survive untouched until
/// the next write.
///
/// Backends are shared between execution contexts, so every method takes
/// `&self` and implementations bring their own interior locking.
pub trait StorageBackend: Send + Sync {
    /// Raw value stored under `key`, `Ok(None)` if there is none.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Every stored key with its raw value.
    fn get_all(&self) -> Result<BTreeMap<String, Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    /// MUST be atomic with respect to other keys: a failed write never
    /// damages unrelated records.
    fn set(&self, key: &str, value: &Value) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
