//! # Storage Layer
//!
//! This module defines the storage abstraction for restyle. The [`DataStore`]
//! trait is what commands talk to; [`RuleStore`] implements it on top of any
//! [`backend::StorageBackend`].
//!
//! ## Split of Responsibilities
//!
//! 1. **Backend** (`StorageBackend`): raw key → JSON value I/O. Knows nothing
//!    about rules.
//! 2. **Store** (`RuleStore`): writes the canonical tagged array, turns an empty
//!    write into a removal, logs failures, hands out per-domain locks.
//! 3. **Normalizer** ([`crate::model::normalize`]): turns whatever was read into
//!    rules.
//!
//! ## Invariants
//!
//! - A domain with zero rules has no stored value at all. `set(domain, &[])` is
//!   a `remove(domain)`, so callers never special-case it.
//! - Reads never fail on unexpected *data*; they only fail on *I/O*.
//! - Every storage failure is logged where it happens and returned to the
//!   caller. Nothing is swallowed.
//!
//! ## Concurrency
//!
//! Editor operations run read → normalize → mutate → write while holding the
//! [`locks::DomainGuard`] for their domain, see [`locks`].
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production, one `rules.json` in the data dir.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! └── rules.json    # { "<domain key>": <stored value>, ... }
//! ```

use crate::error::Result;
use crate::model::{normalize, Rule};
use serde_json::Value;
use std::collections::BTreeMap;

pub mod backend;
pub mod fs_backend;
pub mod locks;
pub mod mem_backend;
pub mod memory;
pub mod rule_store;

pub use locks::{DomainGuard, DomainLocks};
pub use rule_store::RuleStore;

/// Abstract interface for the domain-scoped rule store.
pub trait DataStore {
    /// Raw stored value for a domain, in whatever shape it was written.
    fn get(&self, domain: &str) -> Result<Option<Value>>;

    /// Raw stored values for every domain.
    fn get_all(&self) -> Result<BTreeMap<String, Value>>;

    /// Replaces a domain's rules. An empty slice removes the domain.
    fn set(&self, domain: &str, rules: &[Rule]) -> Result<()>;

    /// Removes a domain and all its rules.
    fn remove(&self, domain: &str) -> Result<()>;

    /// Serializes mutations of one domain. Hold the guard across the whole
    /// read-modify-write.
    fn lock_domain(&self, domain: &str) -> DomainGuard<'_>;

    /// A domain's rules in canonical form.
    fn rules(&self, domain: &str) -> Result<Vec<Rule>> {
        Ok(normalize(self.get(domain)?.as_ref()))
    }
}
