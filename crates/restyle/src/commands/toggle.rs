use crate::commands::{tag_label, CmdMessage, CmdResult, DomainRule};
use crate::domain::normalize_domain_input;
use crate::error::Result;
use crate::model::normalize_tag;
use crate::store::DataStore;
use tracing::{debug, info};

/// Sets `enabled` on the rule `tag` of `domain`.
///
/// A missing rule is not an error: the listing that offered the checkbox may
/// be older than a deletion made elsewhere. Nothing is written in that case.
pub fn run<S: DataStore>(store: &S, domain: &str, tag: &str, enabled: bool) -> Result<CmdResult> {
    let domain = normalize_domain_input(domain)?;
    let tag = normalize_tag(tag);
    let mut result = CmdResult::default();

    let _guard = store.lock_domain(&domain);
    let mut rules = store.rules(&domain)?;

    let Some(rule) = rules.iter_mut().find(|r| r.has_tag(&tag)) else {
        debug!(domain = %domain, tag = %tag, "toggle on missing rule ignored");
        result.add_message(CmdMessage::info(format!(
            "No rule [{}] on \"{}\"",
            tag_label(&tag),
            domain
        )));
        return Ok(result);
    };
    rule.enabled = enabled;
    let toggled = rule.clone();

    store.set(&domain, &rules)?;
    info!(domain = %domain, tag = %tag, enabled, "rule toggled");

    let verb = if enabled { "enabled" } else { "disabled" };
    result.add_message(CmdMessage::success(format!(
        "Rule [{}] {} on \"{}\"",
        tag_label(&tag),
        verb,
        domain
    )));
    result.affected_rules.push(DomainRule::new(domain, toggled));
    Ok(result)
}
