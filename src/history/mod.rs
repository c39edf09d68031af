//! Persisted "recently produced results" lists.
//!
//! This module provides the [`HistoryStore`], the record comparison rules it
//! relies on, and the [`ConversionRecord`] shape used by the converters.
//!
//! # Example
//!
//! ```
//! use recents::history::{ConversionRecord, HistoryStore};
//! use recents::storage::MemoryStorage;
//!
//! let storage = MemoryStorage::new();
//! let mut history = HistoryStore::initialize("len-hist", 3, &storage).unwrap();
//!
//! history.save(ConversionRecord::new("10 m", "1000 cm", "t1")).unwrap();
//! history.save(ConversionRecord::new("5 kg", "11 lb", "t2")).unwrap();
//!
//! assert_eq!(history.len(), 2);
//! assert_eq!(history.latest().unwrap().from, "5 kg");
//! ```

pub mod canonical;
pub mod key;
pub mod record;
pub mod store;

pub use canonical::{canonical_form, records_equal};
pub use key::HistoryKey;
pub use record::ConversionRecord;
pub use store::{HistoryStore, SubscriptionId};
