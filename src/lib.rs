//! Recents - Persisted history lists for converter widgets.
//!
//! Each widget keeps a short, deduplicated, newest-first list of the
//! conversions it performed, saved under its own key in durable storage.
//! Rapid input is collapsed so that only settled conversions are recorded.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and validation
//! - [`debounce`] - Quiet-period coalescing and debounced saving
//! - [`error`] - Error types and result aliases
//! - [`history`] - The history store and its record types
//! - [`storage`] - Durable key-value storage backends
//! - [`ui`] - Terminal output and prompts
//!
//! # Example
//!
//! ```
//! use recents::history::{ConversionRecord, HistoryStore};
//! use recents::storage::MemoryStorage;
//!
//! let storage = MemoryStorage::new();
//! let mut history = HistoryStore::initialize("length-converter-history", 3, &storage).unwrap();
//!
//! history.save(ConversionRecord::new("10 m", "1000 cm", "t1")).unwrap();
//! history.save(ConversionRecord::new("1 m", "100 cm", "t2")).unwrap();
//! history.save(ConversionRecord::new("10 m", "1000 cm", "t1")).unwrap();
//!
//! let froms: Vec<_> = history.entries().iter().map(|r| r.from.as_str()).collect();
//! assert_eq!(froms, ["10 m", "1 m"]);
//! ```

pub mod cli;
pub mod config;
pub mod debounce;
pub mod error;
pub mod history;
pub mod storage;
pub mod ui;

pub use error::{RecentsError, Result, StorageError};
