//! # Listing
//!
//! Produces the editing surface's view of the store: every stored rule paired
//! with its domain, search-filtered and display-ordered.
//!
//! ## Filtering
//!
//! A search term keeps a rule when its **domain** or its **tag** contains the
//! term (case-insensitive substring). A domain match keeps all of that
//! domain's rules, even those whose tags do not match. A blank term keeps
//! everything.
//!
//! ## Ordering
//!
//! 1. Rules of the active page's domain come first.
//! 2. Then by domain, case-folded, falling back to byte order.
//! 3. Within one domain, rules keep their stored order.
//!
//! The active domain is passed in by the caller; there is no "current tab"
//! state anywhere in the library.

use crate::commands::{CmdMessage, CmdResult, DomainRule};
use crate::domain::normalize_domain_input;
use crate::error::Result;
use crate::model::normalize;
use crate::store::DataStore;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub search_term: Option<String>,
    /// Domain key of the page the editing surface was opened on, as
    /// produced by [`crate::domain::active_domain`].
    pub active_domain: Option<String>,
}

impl ListFilter {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn active(mut self, domain: impl Into<String>) -> Self {
        self.active_domain = Some(domain.into());
        self
    }
}

pub fn run<S: DataStore>(store: &S, filter: &ListFilter) -> Result<CmdResult> {
    let snapshot = store.get_all()?;
    let stored_domains = snapshot.len();

    let pairs: Vec<DomainRule> = snapshot
        .iter()
        .flat_map(|(domain, raw)| {
            normalize(Some(raw))
                .into_iter()
                .map(move |rule| DomainRule::new(domain.clone(), rule))
        })
        .collect();

    let listed = sort_rules(
        filter_rules(pairs, filter.search_term.as_deref()),
        filter.active_domain.as_deref(),
    );

    let mut result = CmdResult::default();
    if listed.is_empty() {
        let message = match filter.search_term.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() && stored_domains > 0 => {
                format!("No rules match \"{}\".", term)
            }
            _ => "No domains saved yet.".to_string(),
        };
        result.add_message(CmdMessage::info(message));
    }
    Ok(result.with_listed_rules(listed))
}

/// The rules of a single domain, in stored order.
pub fn show<S: DataStore>(store: &S, domain: &str) -> Result<CmdResult> {
    let domain = normalize_domain_input(domain)?;
    let listed: Vec<DomainRule> = store
        .rules(&domain)?
        .into_iter()
        .map(|rule| DomainRule::new(domain.clone(), rule))
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(format!("No CSS saved for \"{}\"", domain)));
    }
    Ok(result.with_listed_rules(listed))
}

pub fn filter_rules(pairs: Vec<DomainRule>, term: Option<&str>) -> Vec<DomainRule> {
    let term = match term.map(|t| t.trim().to_lowercase()) {
        Some(t) if !t.is_empty() => t,
        _ => return pairs,
    };

    pairs
        .into_iter()
        .filter(|dr| {
            dr.domain.to_lowercase().contains(&term) || dr.rule.tag.to_lowercase().contains(&term)
        })
        .collect()
}

pub fn sort_rules(mut pairs: Vec<DomainRule>, active_domain: Option<&str>) -> Vec<DomainRule> {
    // Stable: rules of one domain keep their stored order
    pairs.sort_by(|a, b| {
        let a_active = active_domain == Some(a.domain.as_str());
        let b_active = active_domain == Some(b.domain.as_str());
        b_active
            .cmp(&a_active)
            .then_with(|| compare_domains(&a.domain, &b.domain))
    });
    pairs
}

/// Locale-style order: case-folded, punctuation before digits before
/// letters. Exact ties fall back to byte order.
fn compare_domains(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> Vec<(u8, char)> {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            let class = if c.is_alphabetic() {
                2
            } else if c.is_numeric() {
                1
            } else {
                0
            };
            (class, c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    fn domains(result: &CmdResult) -> Vec<&str> {
        result
            .listed_rules
            .iter()
            .map(|dr| dr.domain.as_str())
            .collect()
    }

    fn tags(result: &CmdResult) -> Vec<&str> {
        result
            .listed_rules
            .iter()
            .map(|dr| dr.rule.tag.as_str())
            .collect()
    }

    fn three_domains() -> StoreFixture {
        StoreFixture::new()
            .with_rule("b.com", "", "b{}")
            .with_rule("a.com", "", "a{}")
            .with_rule("active.com", "", "x{}")
    }

    #[test]
    fn active_domain_sorts_first() {
        let fixture = three_domains();
        let filter = ListFilter::default().search("").active("active.com");
        let result = run(&fixture.store, &filter).unwrap();
        assert_eq!(domains(&result), vec!["active.com", "a.com", "b.com"]);
    }

    #[test]
    fn without_active_domain_sorts_by_domain() {
        let fixture = three_domains();
        let result = run(&fixture.store, &ListFilter::default()).unwrap();
        assert_eq!(domains(&result), vec!["a.com", "active.com", "b.com"]);
    }

    #[test]
    fn rules_within_domain_keep_insertion_order() {
        let fixture = StoreFixture::new()
            .with_rule("a.com", "zeta", "1{}")
            .with_rule("a.com", "alpha", "2{}")
            .with_rule("a.com", "mid", "3{}");
        let result = run(&fixture.store, &ListFilter::default()).unwrap();
        assert_eq!(tags(&result), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn search_matches_domain_and_keeps_all_its_rules() {
        let fixture = StoreFixture::new()
            .with_rule("news.site", "dark", "1{}")
            .with_rule("news.site", "print", "2{}")
            .with_rule("other.com", "wide", "3{}");
        let filter = ListFilter::default().search("NEWS");
        let result = run(&fixture.store, &filter).unwrap();
        assert_eq!(tags(&result), vec!["dark", "print"]);
    }

    #[test]
    fn search_matches_tag_only_rules() {
        let fixture = StoreFixture::new()
            .with_rule("a.com", "dark", "1{}")
            .with_rule("a.com", "print", "2{}")
            .with_rule("b.com", "darker", "3{}");
        let filter = ListFilter::default().search("dark");
        let result = run(&fixture.store, &filter).unwrap();
        assert_eq!(domains(&result), vec!["a.com", "b.com"]);
        assert_eq!(tags(&result), vec!["dark", "darker"]);
    }

    #[test]
    fn search_term_is_trimmed() {
        let fixture = three_domains();
        let filter = ListFilter::default().search("  b.c ");
        let result = run(&fixture.store, &filter).unwrap();
        assert_eq!(domains(&result), vec!["b.com"]);
    }

    #[test]
    fn legacy_values_are_listed() {
        let fixture = StoreFixture::new()
            .with_raw("s.com", json!("color: red;"))
            .with_raw("bad.com", json!(17));
        let result = run(&fixture.store, &ListFilter::default()).unwrap();
        assert_eq!(domains(&result), vec!["s.com"]);
        assert_eq!(result.listed_rules[0].rule.css, "color: red;");
    }

    #[test]
    fn empty_store_is_not_an_error() {
        let store = InMemoryStore::new();
        let result = run(&store, &ListFilter::default()).unwrap();
        assert!(result.listed_rules.is_empty());
        assert_eq!(result.messages[0].content, "No domains saved yet.");
    }

    #[test]
    fn filter_excluding_everything_is_not_an_error() {
        let fixture = three_domains();
        let filter = ListFilter::default().search("zzz");
        let result = run(&fixture.store, &filter).unwrap();
        assert!(result.listed_rules.is_empty());
        assert!(result.messages[0].content.contains("zzz"));
    }

    #[test]
    fn compare_domains_folds_case() {
        assert_eq!(compare_domains("B.com", "a.com"), Ordering::Greater);
        assert_eq!(compare_domains("a.com", "A.com"), Ordering::Greater);
    }

    #[test]
    fn compare_domains_puts_punctuation_before_digits_before_letters() {
        assert_eq!(compare_domains("a_b.com", "a1.com"), Ordering::Less);
        assert_eq!(compare_domains("a-b.com", "a1.com"), Ordering::Less);
        assert_eq!(compare_domains("a9.com", "aa.com"), Ordering::Less);
        assert_eq!(compare_domains("a.com", "a1.com"), Ordering::Less);
    }

    #[test]
    fn listing_uses_collated_domain_order() {
        let fixture = StoreFixture::new()
            .with_rule("ab.com", "", "p{}")
            .with_rule("a1.com", "", "p{}")
            .with_rule("a_b.com", "", "p{}");
        let result = run(&fixture.store, &ListFilter::default()).unwrap();
        assert_eq!(domains(&result), vec!["a_b.com", "a1.com", "ab.com"]);
    }

    #[test]
    fn show_lists_one_domain() {
        let fixture = three_domains().with_rule("a.com", "extra", "e{}");
        let result = show(&fixture.store, "https://A.com/page").unwrap();
        assert_eq!(tags(&result), vec!["", "extra"]);
        assert!(result.listed_rules.iter().all(|dr| dr.domain == "a.com"));
    }

    #[test]
    fn show_unknown_domain_is_empty() {
        let store = InMemoryStore::new();
        let result = show(&store, "ghost.com").unwrap();
        assert!(result.listed_rules.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
