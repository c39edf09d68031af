//! Show command implementation.
//!
//! The `recents show` command lists a history, newest first.

use crate::cli::args::ShowArgs;
use crate::config::RecentsConfig;
use crate::error::{RecentsError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{open_history, Command, CommandResult};
use super::display::indexed_line;

/// The show command implementation.
pub struct ShowCommand {
    config: RecentsConfig,
    args: ShowArgs,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(config: RecentsConfig, args: ShowArgs) -> Self {
        Self { config, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ShowArgs {
        &self.args
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let history = open_history(&self.config, &self.args.key, None)?;
        let limit = self.args.limit.unwrap_or(history.len());
        let entries = &history.entries()[..limit.min(history.len())];

        if self.args.json {
            let json =
                serde_json::to_string_pretty(entries).map_err(|e| RecentsError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if history.is_empty() {
            ui.message(&format!("No history for '{}'.", history.key()));
            return Ok(CommandResult::success());
        }

        if ui.output_mode().shows_status() {
            ui.show_header(&format!(
                "{} ({} of {})",
                history.key(),
                history.len(),
                history.max_items()
            ));
        }

        for (index, entry) in entries.iter().enumerate() {
            ui.message(&indexed_line(index, entry));
        }

        Ok(CommandResult::success())
    }
}
