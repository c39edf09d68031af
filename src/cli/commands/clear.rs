//! Clear command implementation.
//!
//! The `recents clear` command empties a history and removes its key from
//! storage.

use crate::cli::args::ClearArgs;
use crate::config::RecentsConfig;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{open_history, Command, CommandResult};

/// The clear command implementation.
pub struct ClearCommand {
    config: RecentsConfig,
    args: ClearArgs,
}

impl ClearCommand {
    /// Create a new clear command.
    pub fn new(config: RecentsConfig, args: ClearArgs) -> Self {
        Self { config, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ClearArgs {
        &self.args
    }
}

impl Command for ClearCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut history = open_history(&self.config, &self.args.key, None)?;
        let count = history.len();

        if !self.args.yes {
            let question = format!("Clear {} entries from '{}'?", count, history.key());
            if !ui.confirm(&question, false)? {
                ui.warning("History not cleared.");
                return Ok(CommandResult::failure(1));
            }
        }

        history.clear();

        if ui.output_mode().shows_status() {
            ui.success(&format!("Cleared '{}'", history.key()));
        }

        Ok(CommandResult::success())
    }
}
