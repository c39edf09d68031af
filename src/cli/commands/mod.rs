//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`recents show`, `recents watch`)
//! - Shared configuration handling
//! - Consistent global flag handling

pub mod clear;
pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod display;
pub mod keys;
pub mod replay;
pub mod save;
pub mod show;
pub mod watch;

pub use dispatcher::{open_history, CliHistory, Command, CommandDispatcher, CommandResult};
