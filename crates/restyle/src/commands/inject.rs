//! The injection matcher.
//!
//! Given a domain key, produces the CSS bodies to inject when a page from that
//! domain finishes loading: every enabled rule with non-blank CSS, in stored
//! order. Rules are additive. None shadows another; where two fragments set the
//! same property the later one wins through the normal cascade.

use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Rule;
use crate::store::DataStore;
use tracing::debug;

pub fn matching_styles(rules: &[Rule]) -> Vec<String> {
    rules
        .iter()
        .filter(|r| r.is_injectable())
        .map(|r| r.css.clone())
        .collect()
}

/// Styles to inject for an already-normalized domain key.
pub fn run<S: DataStore>(store: &S, domain: &str) -> Result<CmdResult> {
    let rules = store.rules(domain)?;
    let styles = matching_styles(&rules);
    debug!(
        domain,
        stored = rules.len(),
        matched = styles.len(),
        "matched styles"
    );
    Ok(CmdResult::default().with_styles(styles))
}
