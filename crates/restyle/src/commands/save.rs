use crate::commands::{tag_label, CmdMessage, CmdResult, DomainRule};
use crate::domain::normalize_domain_input;
use crate::error::{RestyleError, Result};
use crate::model::{normalize_tag, Rule};
use crate::store::DataStore;
use tracing::info;

/// Upserts the rule `tag` on `domain`.
///
/// An existing rule with the same tag (case-insensitive) has its CSS replaced
/// and is re-enabled: editing a disabled fragment means the user wants it back.
/// Otherwise a new enabled rule is appended.
pub fn run<S: DataStore>(store: &S, domain: &str, tag: &str, css: &str) -> Result<CmdResult> {
    let domain = normalize_domain_input(domain)?;
    let tag = normalize_tag(tag);
    if css.trim().is_empty() {
        return Err(RestyleError::Validation(
            "Please enter some CSS.".to_string(),
        ));
    }

    let _guard = store.lock_domain(&domain);
    let mut rules = store.rules(&domain)?;

    let (saved, created) = match rules.iter_mut().find(|r| r.has_tag(&tag)) {
        Some(existing) => {
            existing.tag = tag.clone();
            existing.css = css.to_string();
            existing.enabled = true;
            (existing.clone(), false)
        }
        None => {
            let rule = Rule::new(&tag, css);
            rules.push(rule.clone());
            (rule, true)
        }
    };

    store.set(&domain, &rules)?;
    info!(domain = %domain, tag = %tag, created, "rule saved");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Saved CSS for \"{}\" [{}]",
        domain,
        tag_label(&tag)
    )));
    result.affected_rules.push(DomainRule::new(domain, saved));
    Ok(result)
}
