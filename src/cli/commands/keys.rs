//! Keys command implementation.
//!
//! The `recents keys` command lists every history key present in the
//! storage directory.

use crate::cli::args::KeysArgs;
use crate::config::RecentsConfig;
use crate::error::{RecentsError, Result};
use crate::storage::{DurableStorage, FileStorage};
use crate::ui::UserInterface;

use super::dispatcher::{open_history, Command, CommandResult};

/// The keys command implementation.
pub struct KeysCommand {
    config: RecentsConfig,
    args: KeysArgs,
}

impl KeysCommand {
    /// Create a new keys command.
    pub fn new(config: RecentsConfig, args: KeysArgs) -> Self {
        Self { config, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &KeysArgs {
        &self.args
    }
}

impl Command for KeysCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let storage = FileStorage::new(self.config.storage_dir());
        let keys = storage.keys()?;

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&keys).map_err(|e| RecentsError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if keys.is_empty() {
            if ui.output_mode().shows_status() {
                ui.message(&format!(
                    "No histories in {}",
                    storage.root().display()
                ));
            }
            return Ok(CommandResult::success());
        }

        for key in &keys {
            if ui.output_mode().shows_detail() {
                let count = open_history(&self.config, key, None)
                    .map(|history| history.len())
                    .unwrap_or(0);
                ui.message(&format!("{}  ({} entries)", key, count));
            } else {
                ui.message(key);
            }
        }

        Ok(CommandResult::success())
    }
}
