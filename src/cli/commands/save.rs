//! Save command implementation.
//!
//! The `recents save` command records one conversion at the front of a
//! history. Saving a conversion already present moves it to the front.

use crate::cli::args::SaveArgs;
use crate::config::RecentsConfig;
use crate::error::{RecentsError, Result};
use crate::history::ConversionRecord;
use crate::ui::UserInterface;

use super::dispatcher::{open_history, Command, CommandResult};
use super::display::entry_line;

/// The save command implementation.
pub struct SaveCommand {
    config: RecentsConfig,
    args: SaveArgs,
}

impl SaveCommand {
    /// Create a new save command.
    pub fn new(config: RecentsConfig, args: SaveArgs) -> Self {
        Self { config, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &SaveArgs {
        &self.args
    }

    fn record(&self) -> ConversionRecord {
        match &self.args.date {
            Some(date) => ConversionRecord::new(&self.args.from, &self.args.to, date),
            None => ConversionRecord::now(&self.args.from, &self.args.to),
        }
    }
}

impl Command for SaveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut history = open_history(&self.config, &self.args.key, self.args.max_items)?;

        let record = serde_json::to_value(self.record()).map_err(|e| {
            RecentsError::RecordNotSerializable {
                message: e.to_string(),
            }
        })?;
        let line = entry_line(&record);
        let count = history.save(record)?.len();

        if ui.output_mode().shows_status() {
            ui.success(&format!(
                "Saved to '{}' ({} {})",
                history.key(),
                count,
                if count == 1 { "entry" } else { "entries" }
            ));
        }
        if ui.output_mode().shows_detail() {
            ui.message(&format!("  {}", line));
        }

        Ok(CommandResult::success())
    }
}
