//! Debounced history saving.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{Debouncer, TaskHandle};
use crate::history::HistoryStore;
use crate::storage::DurableStorage;

/// Saves the last record of each quiet window into a [`HistoryStore`].
#[derive(Debug)]
pub struct DebouncedSaver<R, S> {
    history: HistoryStore<R, S>,
    debouncer: Debouncer<R>,
}

impl<R, S> DebouncedSaver<R, S>
where
    R: Serialize + DeserializeOwned,
    S: DurableStorage,
{
    /// Wrap `history`, saving after `quiet` without new input.
    pub fn new(history: HistoryStore<R, S>, quiet: Duration) -> Self {
        Self {
            history,
            debouncer: Debouncer::new(quiet),
        }
    }

    /// Register new input; replaces any record still waiting.
    pub fn input(&mut self, record: R, now: Instant) -> TaskHandle {
        self.debouncer.schedule(record, now)
    }

    /// Save the waiting record if its quiet period has elapsed.
    ///
    /// Returns true when a save happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(record) => self.commit(record),
            None => false,
        }
    }

    /// Save the waiting record now, regardless of the quiet period.
    pub fn flush(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(record) => self.commit(record),
            None => false,
        }
    }

    /// Drop the waiting record without saving it.
    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel_all().is_some()
    }

    /// Cancel one scheduled save by handle.
    pub fn cancel_task(&mut self, handle: TaskHandle) -> bool {
        self.debouncer.cancel(handle)
    }

    /// When the waiting record is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Check whether a record is waiting.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// The wrapped history.
    pub fn history(&self) -> &HistoryStore<R, S> {
        &self.history
    }

    /// The wrapped history, mutably (e.g. to clear it).
    pub fn history_mut(&mut self) -> &mut HistoryStore<R, S> {
        &mut self.history
    }

    /// Unwrap, dropping any waiting record.
    pub fn into_history(self) -> HistoryStore<R, S> {
        self.history
    }

    fn commit(&mut self, record: R) -> bool {
        match self.history.save(record) {
            Ok(list) => {
                let entries = list.len();
                debug!(key = %self.history.key(), entries, "Debounced save");
                true
            }
            Err(e) => {
                warn!(key = %self.history.key(), "Debounced save rejected: {}", e);
                false
            }
        }
    }
}
