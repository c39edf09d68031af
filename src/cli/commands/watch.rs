//! Watch command implementation.
//!
//! The `recents watch` command reads `FROM => TO` lines from stdin, one per
//! keystroke-level update of a converter, and saves only the conversion
//! that stays unchanged for the quiet period. Whatever is still waiting
//! when input ends, or fails to read, is saved immediately.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use serde_json::Value;
use tracing::debug;

use crate::cli::args::WatchArgs;
use crate::config::RecentsConfig;
use crate::debounce::DebouncedSaver;
use crate::error::{RecentsError, Result};
use crate::history::ConversionRecord;
use crate::storage::FileStorage;
use crate::ui::UserInterface;

use super::dispatcher::{open_history, Command, CommandResult};
use super::display::entry_line;

/// Separator between the input and result of a conversion line.
const SEPARATOR: &str = "=>";

/// The watch command implementation.
pub struct WatchCommand {
    config: RecentsConfig,
    args: WatchArgs,
}

impl WatchCommand {
    /// Create a new watch command.
    pub fn new(config: RecentsConfig, args: WatchArgs) -> Self {
        Self { config, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &WatchArgs {
        &self.args
    }

    /// Consume lines until the sender hangs up, saving debounced.
    ///
    /// Returns the number of saves performed.
    pub fn watch(
        &self,
        lines: Receiver<io::Result<String>>,
        ui: &mut dyn UserInterface,
    ) -> Result<usize> {
        let history = open_history(&self.config, &self.args.key, self.args.max_items)?;
        let quiet = self
            .args
            .quiet_ms
            .map(std::time::Duration::from_millis)
            .unwrap_or_else(|| self.config.debounce());
        let mut saver: DebouncedSaver<Value, FileStorage> = DebouncedSaver::new(history, quiet);
        let mut saves = 0;
        let mut read_error = None;

        debug!(key = %saver.history().key(), ?quiet, "Watching stdin");

        loop {
            let received = match saver.deadline() {
                Some(deadline) => {
                    lines.recv_timeout(deadline.saturating_duration_since(Instant::now()))
                }
                None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(Err(e)) => {
                    read_error = Some(e);
                    break;
                }
                Ok(Ok(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match parse_line(&line) {
                        Some(record) => {
                            saver.input(to_value(record)?, Instant::now());
                        }
                        None => ui.warning(&format!(
                            "Ignoring line without '{}': {}",
                            SEPARATOR, line
                        )),
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    if saver.tick(Instant::now()) {
                        saves += 1;
                        report_save(&saver, ui);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if saver.flush() {
            saves += 1;
            report_save(&saver, ui);
        }

        match read_error {
            Some(e) => Err(e.into()),
            None => Ok(saves),
        }
    }
}

impl Command for WatchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        let saves = self.watch(rx, ui)?;

        if ui.output_mode().shows_status() {
            ui.success(&format!(
                "Saved {} {} to '{}'",
                saves,
                if saves == 1 { "conversion" } else { "conversions" },
                self.args.key.trim()
            ));
        }

        Ok(CommandResult::success())
    }
}

/// Parse a `FROM => TO` line into a record stamped now.
fn parse_line(line: &str) -> Option<ConversionRecord> {
    let (from, to) = line.split_once(SEPARATOR)?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return None;
    }
    Some(ConversionRecord::now(from, to))
}

fn to_value(record: ConversionRecord) -> Result<Value> {
    serde_json::to_value(record).map_err(|e| RecentsError::RecordNotSerializable {
        message: e.to_string(),
    })
}

fn report_save(saver: &DebouncedSaver<Value, FileStorage>, ui: &mut dyn UserInterface) {
    if !ui.output_mode().shows_detail() {
        return;
    }
    if let Some(latest) = saver.history().latest() {
        ui.message(&format!("Saved {}", entry_line(latest)));
    }
}
