//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use serde_json::Value;

use crate::cli::args::{Cli, Commands};
use crate::config::RecentsConfig;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::storage::FileStorage;
use crate::ui::UserInterface;

/// History as the CLI sees it: untyped records in file storage, so any
/// widget's record shape can be shown.
pub type CliHistory = HistoryStore<Value, FileStorage>;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Exit status for the process. Codes outside `0..=255` map to 1.
    pub fn process_exit_code(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Open the history under `key` using the configured storage directory.
pub fn open_history(
    config: &RecentsConfig,
    key: &str,
    max_items: Option<usize>,
) -> Result<CliHistory> {
    let storage = FileStorage::new(config.storage_dir());
    HistoryStore::initialize(key, max_items.unwrap_or(config.max_items), storage)
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config: RecentsConfig,
}

impl CommandDispatcher {
    /// Create a new dispatcher with the resolved configuration.
    pub fn new(config: RecentsConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &RecentsConfig {
        &self.config
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.config.clone();
        match &cli.command {
            Commands::Show(args) => super::show::ShowCommand::new(config, args.clone()).execute(ui),
            Commands::Save(args) => super::save::SaveCommand::new(config, args.clone()).execute(ui),
            Commands::Replay(args) => {
                super::replay::ReplayCommand::new(config, args.clone()).execute(ui)
            }
            Commands::Clear(args) => {
                super::clear::ClearCommand::new(config, args.clone()).execute(ui)
            }
            Commands::Keys(args) => super::keys::KeysCommand::new(config, args.clone()).execute(ui),
            Commands::Watch(args) => {
                super::watch::WatchCommand::new(config, args.clone()).execute(ui)
            }
            Commands::Config(args) => {
                super::config::ConfigCommand::new(config, args.clone()).execute(ui)
            }
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn process_exit_code_stays_in_range() {
        assert_eq!(CommandResult::success().process_exit_code(), 0);
        assert_eq!(CommandResult::failure(2).process_exit_code(), 2);
        assert_eq!(CommandResult::failure(256).process_exit_code(), 1);
        assert_eq!(CommandResult::failure(-1).process_exit_code(), 1);
    }

    #[test]
    fn open_history_uses_config_capacity() {
        let temp = TempDir::new().unwrap();
        let config = RecentsConfig {
            storage_dir: Some(temp.path().to_path_buf()),
            max_items: 4,
            ..Default::default()
        };

        let history = open_history(&config, "len", None).unwrap();
        assert_eq!(history.max_items(), 4);

        let history = open_history(&config, "len", Some(2)).unwrap();
        assert_eq!(history.max_items(), 2);
    }

    #[test]
    fn open_history_rejects_blank_key() {
        let temp = TempDir::new().unwrap();
        let config = RecentsConfig {
            storage_dir: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        assert!(open_history(&config, " ", None).is_err());
    }

    #[test]
    fn dispatches_show() {
        let temp = TempDir::new().unwrap();
        let config = RecentsConfig {
            storage_dir: Some(temp.path().to_path_buf()),
            ..Default::default()
        };
        let dispatcher = CommandDispatcher::new(config);
        let cli = Cli::parse_from(["recents", "show", "len"]);
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("No history"));
    }
}
