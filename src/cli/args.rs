//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// recents - Persisted history lists for converter widgets.
#[derive(Debug, Parser)]
#[command(name = "recents")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default ~/.recents/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a history, newest first
    Show(ShowArgs),

    /// Save a conversion into a history
    Save(SaveArgs),

    /// Show one entry of a history
    Replay(ReplayArgs),

    /// Delete a history
    Clear(ClearArgs),

    /// List histories that hold entries
    Keys(KeysArgs),

    /// Read "FROM => TO" lines from stdin and save them debounced
    Watch(WatchArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShowArgs {
    /// History key (e.g. length-converter-history)
    pub key: String,

    /// Number of entries to show
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `save` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SaveArgs {
    /// History key
    pub key: String,

    /// Conversion input (e.g. "10 m")
    #[arg(long)]
    pub from: String,

    /// Conversion result (e.g. "1000 cm")
    #[arg(long)]
    pub to: String,

    /// Date to record (defaults to now, RFC 3339)
    #[arg(long)]
    pub date: Option<String>,

    /// Maximum entries kept (overrides config)
    #[arg(long)]
    pub max_items: Option<usize>,
}

/// Arguments for the `replay` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ReplayArgs {
    /// History key
    pub key: String,

    /// Entry index, 0 = newest
    #[arg(default_value_t = 0)]
    pub index: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `clear` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ClearArgs {
    /// History key
    pub key: String,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `keys` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct KeysArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `watch` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct WatchArgs {
    /// History key
    pub key: String,

    /// Quiet period in milliseconds (overrides config)
    #[arg(long)]
    pub quiet_ms: Option<u64>,

    /// Maximum entries kept (overrides config)
    #[arg(long)]
    pub max_items: Option<usize>,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long, conflicts_with = "yaml")]
    pub json: bool,

    /// Output as YAML (default)
    #[arg(long)]
    pub yaml: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
