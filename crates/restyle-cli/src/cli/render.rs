use colored::Colorize;
use restyle::api::{CmdMessage, DomainRule, MessageLevel};
use restyle::commands::tag_label;

const PREVIEW_WIDTH: usize = 60;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per rule, grouped under a domain heading. Input order is kept.
pub fn print_rule_list(rules: &[DomainRule], active_domain: Option<&str>) {
    let mut current: Option<&str> = None;
    for dr in rules {
        if current != Some(dr.domain.as_str()) {
            if current.is_some() {
                println!();
            }
            let heading = if active_domain == Some(dr.domain.as_str()) {
                format!("{} {}", dr.domain.bold(), "(this page)".cyan())
            } else {
                dr.domain.bold().to_string()
            };
            println!("{}", heading);
            current = Some(dr.domain.as_str());
        }
        println!("{}", rule_line(dr));
    }
}

/// Full CSS of each rule, for `show`.
pub fn print_full_rules(rules: &[DomainRule]) {
    for (i, dr) in rules.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} {}", status_marker(dr.rule.enabled), tag_label(&dr.rule.tag).yellow());
        println!("--------------------------------");
        println!("{}", dr.rule.css);
    }
}

fn rule_line(dr: &DomainRule) -> String {
    format!(
        "  {} {:<12} {}",
        status_marker(dr.rule.enabled),
        tag_label(&dr.rule.tag).yellow(),
        preview(&dr.rule.css).dimmed()
    )
}

fn status_marker(enabled: bool) -> String {
    if enabled {
        "[on ]".green().to_string()
    } else {
        "[off]".red().to_string()
    }
}

/// Single-line CSS preview, collapsed whitespace, truncated with an ellipsis.
pub fn preview(css: &str) -> String {
    let flat = css.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_WIDTH {
        return flat;
    }
    let mut cut: String = flat.chars().take(PREVIEW_WIDTH - 1).collect();
    cut.push('…');
    cut
}
