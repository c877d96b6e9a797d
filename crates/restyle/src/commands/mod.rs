//! # Command Layer
//!
//! This module contains the **core business logic** of restyle. Each command
//! lives in its own submodule as plain functions over a [`DataStore`].
//!
//! ## Role and Responsibilities
//!
//! - Normalize user input (domain text, tags) before touching storage
//! - Validate, then run read → normalize → mutate → write as one unit
//! - Return a structured [`CmdResult`] with affected rules and messages
//! - Stay completely UI-agnostic: no stdout, no prompts, no exit codes
//!
//! ## Editor Operations and Locking
//!
//! [`save`], [`toggle`] and [`delete`] hold the domain's
//! [`crate::store::DomainGuard`] from the read until the write has completed.
//! Reads ([`inject`], [`list`]) take no lock: at worst they see the state just
//! before a concurrent write.
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Tests use
//! `InMemoryStore` and its fixtures.
//!
//! ## Command Modules
//!
//! - [`save`]: Upsert a rule by tag
//! - [`toggle`]: Enable or disable a rule
//! - [`delete`]: Delete a rule by tag, or a whole domain
//! - [`inject`]: The injection matcher
//! - [`list`]: Search, filter and sort all stored rules; show one domain

use crate::model::Rule;
use serde::Serialize;

pub mod delete;
pub mod inject;
pub mod list;
pub mod save;
pub mod toggle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A rule paired with the domain it belongs to, as shown by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainRule {
    pub domain: String,
    pub rule: Rule,
}

impl DomainRule {
    pub fn new(domain: impl Into<String>, rule: Rule) -> Self {
        Self {
            domain: domain.into(),
            rule,
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Rules created or changed by the command, post-operation.
    pub affected_rules: Vec<DomainRule>,
    /// Rules to display, in display order.
    pub listed_rules: Vec<DomainRule>,
    /// CSS bodies to inject, in injection order.
    pub styles: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_rules(mut self, rules: Vec<DomainRule>) -> Self {
        self.affected_rules = rules;
        self
    }

    pub fn with_listed_rules(mut self, rules: Vec<DomainRule>) -> Self {
        self.listed_rules = rules;
        self
    }

    pub fn with_styles(mut self, styles: Vec<String>) -> Self {
        self.styles = styles;
        self
    }
}

/// Display form of a tag; the empty tag is the default fragment.
pub fn tag_label(tag: &str) -> &str {
    if tag.is_empty() {
        "(default)"
    } else {
        tag
    }
}
