//! Config command implementation.
//!
//! The `recents config` command shows the resolved configuration after the
//! config file and environment overrides are applied.

use serde::Serialize;

use crate::cli::args::ConfigArgs;
use crate::config::{user_config_path, RecentsConfig};
use crate::error::{RecentsError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    config: RecentsConfig,
    args: ConfigArgs,
}

/// Configuration as displayed, with derived values filled in.
#[derive(Debug, Serialize)]
struct ResolvedConfig {
    storage_dir: std::path::PathBuf,
    max_items: usize,
    debounce_ms: u64,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(config: RecentsConfig, args: ConfigArgs) -> Self {
        Self { config, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }

    fn resolved(&self) -> ResolvedConfig {
        ResolvedConfig {
            storage_dir: self.config.storage_dir(),
            max_items: self.config.max_items,
            debounce_ms: self.config.debounce_ms,
        }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolved = self.resolved();

        if self.args.json {
            let json = serde_json::to_string_pretty(&resolved)
                .map_err(|e| RecentsError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if ui.output_mode().shows_status() {
            if let Some(path) = user_config_path() {
                ui.message(&format!("# {}", path.display()));
            }
        }

        let yaml = serde_yaml::to_string(&resolved).map_err(|e| RecentsError::Other(e.into()))?;
        ui.message(yaml.trim_end());

        Ok(CommandResult::success())
    }
}
