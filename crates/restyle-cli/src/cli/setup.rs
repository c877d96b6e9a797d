use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "restyle", bin_name = "restyle", version)]
#[command(about = "Per-domain CSS overrides", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the rules file (defaults to the OS data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save CSS for a domain (creates or replaces the tagged rule)
    Save {
        /// Domain or URL, e.g. example.com or https://example.com/page
        domain: String,

        #[command(flatten)]
        tag: TagArg,

        /// CSS text; read from --file or stdin when omitted
        #[arg(long, conflicts_with = "file")]
        css: Option<String>,

        /// Read CSS from a file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Enable a rule
    Enable {
        domain: String,
        #[command(flatten)]
        tag: TagArg,
    },

    /// Disable a rule without deleting it
    Disable {
        domain: String,
        #[command(flatten)]
        tag: TagArg,
    },

    /// Delete a rule, or every rule of a domain with --all
    Delete {
        domain: String,
        #[command(flatten)]
        tag: TagArg,

        /// Delete every rule of the domain
        #[arg(long, conflicts_with = "tag")]
        all: bool,
    },

    /// List saved rules
    #[command(alias = "ls")]
    List {
        /// Keep rules whose domain or tag contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// URL of the page being edited; its domain is listed first
        #[arg(long, value_name = "URL")]
        active: Option<String>,
    },

    /// Show every rule of one domain, with full CSS
    Show { domain: String },

    /// Print the styles a page at URL would receive
    Inject {
        url: String,

        /// Identifier of the target page
        #[arg(long, default_value = "stdout")]
        page: String,
    },

    /// Show resolved paths and configuration
    Config,
}

#[derive(Args, Debug, Default)]
pub struct TagArg {
    /// Rule tag; omit for the default (untagged) rule
    #[arg(short, long, default_value = "")]
    pub tag: String,
}
