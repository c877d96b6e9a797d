use super::backend::StorageBackend;
use super::locks::{DomainGuard, DomainLocks};
use super::DataStore;
use crate::error::Result;
use crate::model::Rule;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, error};

pub struct RuleStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    locks: DomainLocks,
}

impl<B: StorageBackend> RuleStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            locks: DomainLocks::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

fn log_failure<T>(op: &str, domain: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        error!(domain, op, error = %e, "storage operation failed");
    }
    result
}

impl<B: StorageBackend> DataStore for RuleStore<B> {
    fn get(&self, domain: &str) -> Result<Option<Value>> {
        log_failure("get", domain, self.backend.get(domain))
    }

    fn get_all(&self) -> Result<BTreeMap<String, Value>> {
        log_failure("get_all", "*", self.backend.get_all())
    }

    fn set(&self, domain: &str, rules: &[Rule]) -> Result<()> {
        // Empty records are never persisted
        if rules.is_empty() {
            return self.remove(domain);
        }
        let value = serde_json::to_value(rules)?;
        log_failure("set", domain, self.backend.set(domain, &value))?;
        debug!(domain, rules = rules.len(), "rules written");
        Ok(())
    }

    fn remove(&self, domain: &str) -> Result<()> {
        log_failure("remove", domain, self.backend.remove(domain))?;
        debug!(domain, "domain removed");
        Ok(())
    }

    fn lock_domain(&self, domain: &str) -> DomainGuard<'_> {
        self.locks.lock(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestyleError;
    use crate::store::mem_backend::MemBackend;
    use serde_json::json;

    fn make_store() -> RuleStore<MemBackend> {
        RuleStore::with_backend(MemBackend::new())
    }

    #[test]
    fn test_set_writes_canonical_array() {
        let store = make_store();
        store.set("a.com", &[Rule::new("x", "p{}")]).unwrap();
        assert_eq!(
            store.get("a.com").unwrap(),
            Some(json!([{"tag": "x", "css": "p{}", "enabled": true}]))
        );
    }

    #[test]
    fn test_set_empty_removes_record() {
        let store = make_store();
        store.set("a.com", &[Rule::new("x", "p{}")]).unwrap();
        store.set("a.com", &[]).unwrap();
        assert_eq!(store.get("a.com").unwrap(), None);
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_set_empty_on_missing_domain_is_ok() {
        let store = make_store();
        assert!(store.set("never.saved", &[]).is_ok());
    }

    #[test]
    fn test_rules_normalizes_legacy_values() {
        let store = make_store();
        store.backend.set("a.com", &json!("color: red;")).unwrap();
        assert_eq!(
            store.rules("a.com").unwrap(),
            vec![Rule::untagged("color: red;", true)]
        );
    }

    #[test]
    fn test_rules_for_missing_domain_is_empty() {
        let store = make_store();
        assert!(store.rules("nothing.com").unwrap().is_empty());
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let store = make_store();
        store.backend.set_simulate_write_error(true);
        let err = store.set("a.com", &[Rule::new("", "p{}")]).unwrap_err();
        assert!(matches!(err, RestyleError::Store(_)));
        assert!(err.is_storage_failure());
    }

    #[test]
    fn test_remove_failure_is_surfaced() {
        let store = make_store();
        store.set("a.com", &[Rule::new("", "p{}")]).unwrap();
        store.backend.set_simulate_write_error(true);
        assert!(store.remove("a.com").is_err());
        assert!(store.set("a.com", &[]).is_err());
    }
}
