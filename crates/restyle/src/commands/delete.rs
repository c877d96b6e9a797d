use crate::commands::{tag_label, CmdMessage, CmdResult, DomainRule};
use crate::domain::normalize_domain_input;
use crate::error::Result;
use crate::model::{normalize, normalize_tag};
use crate::store::DataStore;
use tracing::info;

/// Deletes the rule `tag` from `domain`. Deleting the last rule removes the
/// domain from the store. A missing rule is a no-op.
pub fn run<S: DataStore>(store: &S, domain: &str, tag: &str) -> Result<CmdResult> {
    let domain = normalize_domain_input(domain)?;
    let tag = normalize_tag(tag);
    let mut result = CmdResult::default();

    let _guard = store.lock_domain(&domain);
    let mut rules = store.rules(&domain)?;

    let Some(pos) = rules.iter().position(|r| r.has_tag(&tag)) else {
        result.add_message(CmdMessage::info(format!(
            "No rule [{}] on \"{}\"",
            tag_label(&tag),
            domain
        )));
        return Ok(result);
    };
    let removed = rules.remove(pos);

    store.set(&domain, &rules)?;
    info!(domain = %domain, tag = %tag, remaining = rules.len(), "rule deleted");

    result.add_message(CmdMessage::success(format!(
        "Deleted rule [{}] from \"{}\"",
        tag_label(&tag),
        domain
    )));
    if rules.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "\"{}\" has no rules left and was removed",
            domain
        )));
    }
    result.affected_rules.push(DomainRule::new(domain, removed));
    Ok(result)
}

/// Deletes every rule of `domain`.
pub fn run_domain<S: DataStore>(store: &S, domain: &str) -> Result<CmdResult> {
    let domain = normalize_domain_input(domain)?;
    let mut result = CmdResult::default();

    let _guard = store.lock_domain(&domain);
    let Some(raw) = store.get(&domain)? else {
        result.add_message(CmdMessage::info(format!("No CSS saved for \"{}\"", domain)));
        return Ok(result);
    };
    let rules = normalize(Some(&raw));

    store.remove(&domain)?;
    info!(domain = %domain, rules = rules.len(), "domain deleted");

    result.add_message(CmdMessage::success(format!("Deleted CSS for \"{}\"", domain)));
    result.affected_rules = rules
        .into_iter()
        .map(|rule| DomainRule::new(domain.clone(), rule))
        .collect();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rule;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    #[test]
    fn removes_only_the_tag() {
        let fixture = StoreFixture::new()
            .with_rule("a.com", "x", "p{}")
            .with_rule("a.com", "y", "q{}");

        let result = run(&fixture.store, "a.com", "X").unwrap();

        assert_eq!(result.affected_rules[0].rule.tag, "x");
        assert_eq!(
            fixture.store.rules("a.com").unwrap(),
            vec![Rule::new("y", "q{}")]
        );
    }

    #[test]
    fn untrimmed_stored_tag_is_deleted() {
        let fixture = StoreFixture::new().with_raw(
            "a.com",
            json!([
                {"tag": " Dark ", "css": "old{}", "enabled": true},
                {"tag": "print", "css": "p{}", "enabled": true},
            ]),
        );

        let result = run(&fixture.store, "a.com", "dark").unwrap();

        assert_eq!(result.affected_rules.len(), 1);
        assert_eq!(
            fixture.store.rules("a.com").unwrap(),
            vec![Rule::new("print", "p{}")]
        );
    }

    #[test]
    fn deleting_last_rule_removes_domain() {
        let fixture = StoreFixture::new().with_rule("a.com", "x", "p{}");
        run(&fixture.store, "a.com", "x").unwrap();
        assert_eq!(fixture.store.get("a.com").unwrap(), None);
        assert!(fixture.store.get_all().unwrap().is_empty());
    }

    #[test]
    fn deleting_untagged_legacy_rule_removes_domain() {
        let fixture = StoreFixture::new().with_raw("a.com", json!({"css": "a{}"}));
        run(&fixture.store, "a.com", "").unwrap();
        assert_eq!(fixture.store.get("a.com").unwrap(), None);
    }

    #[test]
    fn missing_tag_is_noop() {
        let fixture = StoreFixture::new().with_rule("a.com", "x", "p{}");
        let before = fixture.store.get("a.com").unwrap();
        let result = run(&fixture.store, "a.com", "zzz").unwrap();
        assert!(result.affected_rules.is_empty());
        assert_eq!(fixture.store.get("a.com").unwrap(), before);
    }

    #[test]
    fn delete_domain_removes_everything() {
        let fixture = StoreFixture::new()
            .with_rule("a.com", "x", "p{}")
            .with_rule("a.com", "y", "q{}")
            .with_rule("b.com", "", "r{}");

        let result = run_domain(&fixture.store, "A.com").unwrap();

        assert_eq!(result.affected_rules.len(), 2);
        assert_eq!(fixture.store.get("a.com").unwrap(), None);
        assert!(fixture.store.get("b.com").unwrap().is_some());
    }

    #[test]
    fn delete_missing_domain_is_noop() {
        let store = InMemoryStore::new();
        let result = run_domain(&store, "ghost.com").unwrap();
        assert!(result.affected_rules.is_empty());
    }

    #[test]
    fn delete_domain_with_malformed_value() {
        let fixture = StoreFixture::new().with_raw("a.com", json!(42));
        run_domain(&fixture.store, "a.com").unwrap();
        assert_eq!(fixture.store.get("a.com").unwrap(), None);
    }

    #[test]
    fn storage_failure_is_returned() {
        let fixture = StoreFixture::new().with_rule("a.com", "x", "p{}");
        fixture.store.backend().set_simulate_write_error(true);
        assert!(run(&fixture.store, "a.com", "x").is_err());
        assert!(run_domain(&fixture.store, "a.com").is_err());
        assert_eq!(fixture.store.rules("a.com").unwrap().len(), 1);
    }
}
