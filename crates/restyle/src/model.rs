//! # Rules and Stored Shapes
//!
//! A [`Rule`] is one named fragment of CSS for a domain. A domain's record is an
//! ordered `Vec<Rule>` in which tags are unique. Tags are trimmed and
//! lowercased on every read and write, so stored and typed tags compare equal.
//! The empty tag is a valid tag: it is the default, untagged fragment.
//!
//! ## Stored Shapes
//!
//! Storage has held three different shapes over time, modelled by [`StoredRules`]:
//!
//! | Shape | Example | Reads as |
//! |-------|---------|----------|
//! | Legacy string | `"color: red;"` | one untagged, enabled rule |
//! | Legacy object | `{"css": "a{}", "enabled": false}` | one untagged rule |
//! | Tagged array | `[{"tag": "x", "css": "p{}", "enabled": true}]` | as is |
//!
//! [`normalize`] is the only place that knows about the legacy shapes. It is
//! total: anything it cannot make sense of reads as "no rules", so a corrupted or
//! foreign value can never break the read path.
//!
//! `enabled` is fail-open. Only a literal `false` disables a rule; a missing
//! flag, `null`, `0` or `"no"` all read as enabled.
//!
//! Writes always produce the tagged array (see [`crate::store::RuleStore::set`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub tag: String,
    pub css: String,
    pub enabled: bool,
}

impl Rule {
    /// Creates an enabled rule. The tag is normalized.
    pub fn new(tag: &str, css: impl Into<String>) -> Self {
        Self {
            tag: normalize_tag(tag),
            css: css.into(),
            enabled: true,
        }
    }

    /// The untagged rule legacy shapes read as.
    pub fn untagged(css: impl Into<String>, enabled: bool) -> Self {
        Self {
            tag: String::new(),
            css: css.into(),
            enabled,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        normalize_tag(&self.tag) == normalize_tag(tag)
    }

    /// True when this rule contributes something at injection time.
    pub fn is_injectable(&self) -> bool {
        self.enabled && !self.css.trim().is_empty()
    }
}

/// Tags are trimmed and compared lowercase.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// The shapes a stored value can take.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoredRules {
    LegacyString(String),
    TaggedArray(Vec<Value>),
    LegacyObject(LegacyObject),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyObject {
    #[serde(default)]
    css: Option<Value>,
    #[serde(default)]
    enabled: Option<Value>,
}

/// One entry of a tagged array, before coercion.
#[derive(Deserialize)]
struct RawRule {
    #[serde(default)]
    tag: Option<Value>,
    #[serde(default)]
    css: Option<Value>,
    #[serde(default)]
    enabled: Option<Value>,
}

impl StoredRules {
    /// Recognizes the shape of a raw value. `None` means the value matches no
    /// known shape (numbers, booleans, null).
    pub fn classify(raw: &Value) -> Option<Self> {
        StoredRules::deserialize(raw).ok()
    }

    pub fn into_rules(self) -> Vec<Rule> {
        match self {
            StoredRules::LegacyString(css) => vec![Rule::untagged(css, true)],
            StoredRules::LegacyObject(obj) => match obj.css {
                Some(Value::String(css)) => vec![Rule::untagged(css, is_enabled(&obj.enabled))],
                _ => Vec::new(),
            },
            StoredRules::TaggedArray(entries) => dedupe_tags(entries.iter().filter_map(coerce_entry)),
        }
    }
}

/// Converts whatever is stored for a domain into canonical rules. Never fails.
pub fn normalize(raw: Option<&Value>) -> Vec<Rule> {
    raw.and_then(StoredRules::classify)
        .map(StoredRules::into_rules)
        .unwrap_or_default()
}

fn is_enabled(flag: &Option<Value>) -> bool {
    !matches!(flag, Some(Value::Bool(false)))
}

fn coerce_entry(entry: &Value) -> Option<Rule> {
    // serde would happily read a positional array into RawRule
    if !entry.is_object() {
        return None;
    }
    let raw = RawRule::deserialize(entry).ok()?;
    if raw.tag.is_none() && raw.css.is_none() {
        return None;
    }

    let tag = match raw.tag {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(tag)) => normalize_tag(&tag),
        Some(_) => return None,
    };
    let css = match raw.css {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(css)) => css,
        Some(_) => return None,
    };

    Some(Rule {
        tag,
        css,
        enabled: is_enabled(&raw.enabled),
    })
}

/// First occurrence of a tag wins.
fn dedupe_tags(rules: impl Iterator<Item = Rule>) -> Vec<Rule> {
    let mut seen = HashSet::new();
    rules.filter(|r| seen.insert(normalize_tag(&r.tag))).collect()
}
