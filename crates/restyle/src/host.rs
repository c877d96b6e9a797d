//! The host side of injection.
//!
//! Restyle decides *what* to inject; the embedding host (a browser extension
//! background worker, a headless renderer, the CLI's dry run) decides *how*.
//! Calls are fire-and-forget: an injection error is logged by the caller and
//! the remaining fragments are still attempted.

use crate::error::Result;
use std::fmt;

/// Identifies the loaded page an injection targets (a tab id, a window
/// handle, a file name; opaque to restyle).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageId(pub String);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        PageId(id.to_string())
    }
}

pub trait StyleInjector {
    fn insert_css(&self, page: &PageId, css: &str) -> Result<()>;
}

#[cfg(any(test, feature = "test_utils"))]
pub mod testing {
    use super::*;
    use crate::error::RestyleError;
    use std::cell::RefCell;

    /// Records every injection; optionally fails on CSS containing a marker.
    #[derive(Default)]
    pub struct RecordingInjector {
        pub calls: RefCell<Vec<(PageId, String)>>,
        pub fail_on: Option<String>,
    }

    impl RecordingInjector {
        pub fn failing_on(marker: &str) -> Self {
            Self {
                fail_on: Some(marker.to_string()),
                ..Default::default()
            }
        }

        pub fn injected(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|(_, css)| css.clone()).collect()
        }
    }

    impl StyleInjector for RecordingInjector {
        fn insert_css(&self, page: &PageId, css: &str) -> Result<()> {
            if let Some(marker) = &self.fail_on {
                if css.contains(marker.as_str()) {
                    return Err(RestyleError::Injection(format!("page {page} is gone")));
                }
            }
            self.calls.borrow_mut().push((page.clone(), css.to_string()));
            Ok(())
        }
    }
}
