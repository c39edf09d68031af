//! Replay command implementation.
//!
//! The `recents replay` command prints one entry of a history so a widget
//! (or a script) can restore it.

use crate::cli::args::ReplayArgs;
use crate::config::RecentsConfig;
use crate::error::{RecentsError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{open_history, Command, CommandResult};
use super::display::entry_line;

/// The replay command implementation.
pub struct ReplayCommand {
    config: RecentsConfig,
    args: ReplayArgs,
}

impl ReplayCommand {
    /// Create a new replay command.
    pub fn new(config: RecentsConfig, args: ReplayArgs) -> Self {
        Self { config, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ReplayArgs {
        &self.args
    }
}

impl Command for ReplayCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let history = open_history(&self.config, &self.args.key, None)?;

        let entry = history
            .get(self.args.index)
            .ok_or_else(|| RecentsError::EntryNotFound {
                key: history.key().to_string(),
                index: self.args.index,
                len: history.len(),
            })?;

        if self.args.json {
            let json =
                serde_json::to_string_pretty(entry).map_err(|e| RecentsError::Other(e.into()))?;
            ui.message(&json);
        } else {
            ui.message(&entry_line(entry));
        }

        Ok(CommandResult::success())
    }
}
