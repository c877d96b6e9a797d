//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every client: the CLI, a browser extension's background worker, or
//! anything else that embeds restyle.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the appropriate command function
//! - **Normalizes page URLs** into domain keys for the page-load path
//! - **Drives the host injector** when a page finishes loading
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic and no terminal or page I/O of its own.
//!
//! ## Two Paths
//!
//! ```text
//! page loaded ──► on_page_loaded(page, url) ──► domain_key ──► inject::run ──► StyleInjector
//! editing     ──► save_rule / set_rule_enabled / delete_* ──► commands ──► store
//!             ──► list_rules(filter with active domain) ──► commands::list
//! ```
//!
//! On the page-load path a URL that cannot be parsed is not an error: it is
//! logged and the page simply gets no styles.
//!
//! ## Sharing
//!
//! Every method takes `&self`; wrap the API in an `Arc` to share one store
//! between the page-load handler and the editing surface. Editor operations
//! on the same domain are serialized by the store.

use crate::commands;
use crate::domain::domain_key;
use crate::error::{RestyleError, Result};
use crate::host::{PageId, StyleInjector};
use crate::store::DataStore;
use tracing::{debug, info, warn};

/// The main API facade for restyle operations.
///
/// Generic over `DataStore` to allow different storage backends.
pub struct RestyleApi<S: DataStore> {
    store: S,
}

impl<S: DataStore> RestyleApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save_rule(&self, domain: &str, tag: &str, css: &str) -> Result<CmdResult> {
        commands::save::run(&self.store, domain, tag, css)
    }

    pub fn set_rule_enabled(&self, domain: &str, tag: &str, enabled: bool) -> Result<CmdResult> {
        commands::toggle::run(&self.store, domain, tag, enabled)
    }

    pub fn delete_rule(&self, domain: &str, tag: &str) -> Result<CmdResult> {
        commands::delete::run(&self.store, domain, tag)
    }

    pub fn delete_domain(&self, domain: &str) -> Result<CmdResult> {
        commands::delete::run_domain(&self.store, domain)
    }

    pub fn list_rules(&self, filter: &ListFilter) -> Result<CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn show_domain(&self, domain: &str) -> Result<CmdResult> {
        commands::list::show(&self.store, domain)
    }

    /// Styles to inject for a page URL. Unparsable URLs yield no styles.
    pub fn styles_for_url(&self, url: &str) -> Result<CmdResult> {
        match domain_key(url) {
            Ok(domain) => commands::inject::run(&self.store, &domain),
            Err(RestyleError::InvalidUrl(detail)) => {
                warn!(%detail, "skipping page with unparsable URL");
                Ok(CmdResult::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Handles the host's page-load signal: matches the page's domain and
    /// hands each style to `injector`. Returns how many were injected.
    ///
    /// Injector failures are logged and do not stop the remaining styles.
    /// Storage failures are returned.
    pub fn on_page_loaded<I: StyleInjector>(
        &self,
        page: &PageId,
        url: &str,
        injector: &I,
    ) -> Result<usize> {
        let styles = self.styles_for_url(url)?.styles;
        if styles.is_empty() {
            debug!(%page, url, "no styles for page");
            return Ok(0);
        }

        let mut injected = 0;
        for css in &styles {
            match injector.insert_css(page, css) {
                Ok(()) => injected += 1,
                Err(e) => warn!(%page, error = %e, "style injection failed"),
            }
        }
        info!(%page, injected, total = styles.len(), "styles injected");
        Ok(injected)
    }
}

pub use crate::commands::list::ListFilter;
pub use commands::{CmdMessage, CmdResult, DomainRule, MessageLevel};
