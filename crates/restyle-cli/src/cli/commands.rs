//! # CLI Layer
//!
//! This module is **one possible UI client** for restyle. It is the only
//! place that knows about terminal I/O, argument parsing and exit codes.
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve paths and config through `restyle::init`
//! 3. **Logging**: Install the `tracing` subscriber (stderr, filtered)
//! 4. **API Dispatch**: Call the appropriate `RestyleApi` method
//! 5. **Output Formatting**: Convert `CmdResult` into terminal output
//!
//! Business logic lives in the library; nothing here decides what a rule is.

use super::render::{print_full_rules, print_messages, print_rule_list};
use super::setup::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use restyle::api::ListFilter;
use restyle::domain::active_domain;
use restyle::host::{PageId, StyleInjector};
use restyle::init::{initialize, RestyleContext};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = initialize(cli.data.clone())?;
    init_tracing(cli.verbose, &ctx.config.log_filter);
    debug!(command = ?cli.command, data_dir = %ctx.data_dir.display(), "dispatching");

    match cli.command {
        Some(Commands::Save {
            domain,
            tag,
            css,
            file,
        }) => handle_save(&ctx, &domain, &tag.tag, css, file),
        Some(Commands::Enable { domain, tag }) => handle_toggle(&ctx, &domain, &tag.tag, true),
        Some(Commands::Disable { domain, tag }) => handle_toggle(&ctx, &domain, &tag.tag, false),
        Some(Commands::Delete { domain, tag, all }) => handle_delete(&ctx, &domain, &tag.tag, all),
        Some(Commands::List { search, active }) => handle_list(&ctx, search, active),
        Some(Commands::Show { domain }) => handle_show(&ctx, &domain),
        Some(Commands::Inject { url, page }) => handle_inject(&ctx, &url, &page),
        Some(Commands::Config) => handle_config(&ctx),
        None => handle_list(&ctx, None, None),
    }
}

fn init_tracing(verbose: bool, configured: &str) {
    let filter = if verbose {
        EnvFilter::new("restyle=debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(configured))
            .unwrap_or_else(|_| EnvFilter::new("restyle=warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_save(
    ctx: &RestyleContext,
    domain: &str,
    tag: &str,
    css: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let css = match (css, file) {
        (Some(css), _) => css,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => read_stdin()?,
    };
    let result = ctx.api.save_rule(domain, tag, &css)?;
    print_messages(&result.messages);
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("No CSS given: pass --css, --file, or pipe it on stdin");
    }
    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("reading CSS from stdin")?;
    Ok(buffer)
}

fn handle_toggle(ctx: &RestyleContext, domain: &str, tag: &str, enabled: bool) -> Result<()> {
    let result = ctx.api.set_rule_enabled(domain, tag, enabled)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &RestyleContext, domain: &str, tag: &str, all: bool) -> Result<()> {
    let result = if all {
        ctx.api.delete_domain(domain)?
    } else {
        ctx.api.delete_rule(domain, tag)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(
    ctx: &RestyleContext,
    search: Option<String>,
    active: Option<String>,
) -> Result<()> {
    let filter = ListFilter {
        search_term: search,
        active_domain: active.as_deref().and_then(active_domain),
    };
    let result = ctx.api.list_rules(&filter)?;
    print_rule_list(&result.listed_rules, filter.active_domain.as_deref());
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &RestyleContext, domain: &str) -> Result<()> {
    let result = ctx.api.show_domain(domain)?;
    print_full_rules(&result.listed_rules);
    print_messages(&result.messages);
    Ok(())
}

/// Writes each injected fragment to stdout as a `<style>` element.
struct StdoutInjector;

impl StyleInjector for StdoutInjector {
    fn insert_css(&self, page: &PageId, css: &str) -> restyle::error::Result<()> {
        println!("<style data-restyle-page=\"{}\">\n{}\n</style>", page, css);
        Ok(())
    }
}

fn handle_inject(ctx: &RestyleContext, url: &str, page: &str) -> Result<()> {
    let count = ctx
        .api
        .on_page_loaded(&PageId::from(page), url, &StdoutInjector)?;
    if count == 0 {
        eprintln!("No styles for {}", url);
    }
    Ok(())
}

fn handle_config(ctx: &RestyleContext) -> Result<()> {
    println!("data_dir    = {}", ctx.data_dir.display());
    println!("data_file   = {}", ctx.data_file().display());
    match &ctx.config_file {
        Some(path) => println!("config_file = {}", path.display()),
        None => println!("config_file = (none)"),
    }
    println!("log_filter  = {}", ctx.config.log_filter);
    Ok(())
}
