use super::fs_backend::FsBackend;
use super::mem_backend::MemBackend;
use super::rule_store::RuleStore;
use std::path::PathBuf;

pub type InMemoryStore = RuleStore<MemBackend>;
pub type FileStore = RuleStore<FsBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RuleStore::with_backend(MemBackend::new())
    }
}

impl FileStore {
    pub fn at(root: PathBuf) -> Self {
        RuleStore::with_backend(FsBackend::new(root))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Rule;
    use crate::store::backend::StorageBackend;
    use crate::store::DataStore;
    use serde_json::Value;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_rule(self, domain: &str, tag: &str, css: &str) -> Self {
            let mut rules = self.store.rules(domain).unwrap();
            rules.push(Rule::new(tag, css));
            self.store.set(domain, &rules).unwrap();
            self
        }

        pub fn with_disabled_rule(self, domain: &str, tag: &str, css: &str) -> Self {
            let mut rules = self.store.rules(domain).unwrap();
            let mut rule = Rule::new(tag, css);
            rule.enabled = false;
            rules.push(rule);
            self.store.set(domain, &rules).unwrap();
            self
        }

        /// Stores a raw value as is, bypassing canonical writes.
        pub fn with_raw(self, domain: &str, raw: Value) -> Self {
            self.store.backend().set(domain, &raw).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use crate::model::Rule;
    use crate::store::DataStore;
    use serde_json::json;

    #[test]
    fn test_fixtures_coverage() {
        let fixture = StoreFixture::default()
            .with_rule("a.com", "x", "p{}")
            .with_disabled_rule("a.com", "y", "q{}")
            .with_raw("legacy.com", json!("body{}"));

        let rules = fixture.store.rules("a.com").unwrap();
        assert_eq!(rules.len(), 2);
        assert!(rules[0].enabled);
        assert!(!rules[1].enabled);

        assert_eq!(
            fixture.store.rules("legacy.com").unwrap(),
            vec![Rule::untagged("body{}", true)]
        );
        assert_eq!(fixture.store.get_all().unwrap().len(), 2);
    }
}
