//! Per-domain mutation serialization.
//!
//! The persistence layer has no compare-and-swap, so two editor operations on
//! the same domain that overlap would both read the old rules and the second
//! write would drop the first one's change. [`DomainLocks`] admits one
//! read-modify-write per domain key at a time; operations on other domains are
//! not held up.

use std::collections::HashSet;
use std::sync::{Condvar, Mutex, PoisonError};

#[derive(Default)]
pub struct DomainLocks {
    busy: Mutex<HashSet<String>>,
    released: Condvar,
}

/// Held for the duration of one editor operation. Dropping it lets the next
/// waiter for the same domain in.
pub struct DomainGuard<'a> {
    locks: &'a DomainLocks,
    domain: String,
}

impl DomainLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until no other guard for `domain` is alive.
    pub fn lock(&self, domain: &str) -> DomainGuard<'_> {
        let mut busy = self.busy.lock().unwrap_or_else(PoisonError::into_inner);
        while busy.contains(domain) {
            busy = self
                .released
                .wait(busy)
                .unwrap_or_else(PoisonError::into_inner);
        }
        busy.insert(domain.to_string());

        DomainGuard {
            locks: self,
            domain: domain.to_string(),
        }
    }

    pub fn is_locked(&self, domain: &str) -> bool {
        self.busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(domain)
    }
}

impl DomainGuard<'_> {
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl Drop for DomainGuard<'_> {
    fn drop(&mut self) {
        let mut busy = self
            .locks
            .busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        busy.remove(&self.domain);
        self.locks.released.notify_all();
    }
}
