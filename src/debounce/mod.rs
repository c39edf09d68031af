//! Quiet-period scheduling for history saves.
//!
//! A widget recomputes its result on every input change but only records the
//! result once input has been quiet for a while. [`Debouncer`] holds at most
//! one pending task: scheduling a new one replaces it, so only the last input
//! inside a quiet window is ever delivered. Time is passed in by the caller,
//! which keeps the schedule deterministic under test.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use recents::debounce::Debouncer;
//!
//! let mut debouncer = Debouncer::new(Duration::from_millis(2000));
//! let start = Instant::now();
//!
//! debouncer.schedule("1 m", start);
//! debouncer.schedule("10 m", start + Duration::from_millis(500));
//!
//! assert_eq!(debouncer.poll(start + Duration::from_millis(2000)), None);
//! assert_eq!(debouncer.poll(start + Duration::from_millis(2500)), Some("10 m"));
//! ```

pub mod saver;

use std::time::{Duration, Instant};

pub use saver::DebouncedSaver;

/// Handle to a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    handle: TaskHandle,
    due: Instant,
    payload: T,
}

/// Single-slot cancellable scheduler.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    next_id: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Quiet period the converters wait before recording a result.
    pub const DEFAULT_QUIET: Duration = Duration::from_millis(2000);

    /// Create a debouncer with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            next_id: 0,
            pending: None,
        }
    }

    /// The quiet period.
    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Schedule `payload` to fire one quiet period after `now`, cancelling
    /// whatever was pending.
    pub fn schedule(&mut self, payload: T, now: Instant) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(Pending {
            handle,
            due: now + self.quiet,
            payload,
        });
        handle
    }

    /// Cancel the task behind `handle`. Returns false if that task already
    /// fired or was replaced.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match &self.pending {
            Some(p) if p.handle == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending task.
    pub fn cancel_all(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    /// Check whether a task is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending task is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Take the pending payload if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.due <= now => self.pending.take().map(|p| p.payload),
            _ => None,
        }
    }

    /// Take the pending payload immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUIET)
    }
}
