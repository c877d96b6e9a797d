//! # Domain Keys
//!
//! Every rule lives under a **domain key**: the lowercase host of a page URL,
//! plus the port when the URL spells out a non-default one (`localhost:3000`).
//! Path, query, fragment, scheme and userinfo never take part in the key, so
//! every page of a site resolves to the same record.
//!
//! Two entry points produce keys:
//!
//! - [`domain_key`]: the page-load path. Input is always a full URL.
//! - [`normalize_domain_input`]: the editing path. Users type either a full URL
//!   or a bare host (`Example.COM`), both of which end up in [`domain_key`].
//!
//! [`active_domain`] is the lenient form of the editing path, used to pin the
//! current page's domain to the top of a listing.

use crate::error::{RestyleError, Result};
use tracing::debug;
use url::Url;

/// Scheme assumed when the user types a bare host.
const ASSUMED_SCHEME: &str = "https://";

/// Canonicalizes a page URL into its domain key.
///
/// ```
/// use restyle::domain::domain_key;
///
/// assert_eq!(domain_key("https://News.Example.com/a?b#c").unwrap(), "news.example.com");
/// assert_eq!(domain_key("http://localhost:3000/").unwrap(), "localhost:3000");
/// assert!(domain_key("not a url").is_err());
/// ```
pub fn domain_key(url: &str) -> Result<String> {
    let parsed =
        Url::parse(url.trim()).map_err(|e| RestyleError::InvalidUrl(format!("{url}: {e}")))?;

    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| RestyleError::InvalidUrl(format!("{url}: no host")))?
        .to_lowercase();

    Ok(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    })
}

/// Canonicalizes user-typed domain text into a domain key.
///
/// Empty text is a validation error, since saving requires a domain.
pub fn normalize_domain_input(text: &str) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(RestyleError::Validation("Please enter a domain.".to_string()));
    }

    if text.contains("://") {
        domain_key(text)
    } else {
        domain_key(&format!("{ASSUMED_SCHEME}{text}"))
    }
}

/// Domain key of the page the user is looking at, for [`crate::api::ListFilter`].
///
/// Accepts a URL or a bare host. Pages without a host (`about:blank`) have no
/// active domain, which is not an error.
pub fn active_domain(text: &str) -> Option<String> {
    normalize_domain_input(text)
        .inspect_err(|e| debug!(error = %e, "active page has no domain"))
        .ok()
}
