//! Persisted history store.
//!
//! A [`HistoryStore`] keeps an ordered, deduplicated, size-bounded list of
//! records for one key, newest first, and mirrors every change to durable
//! storage. Storage and parse failures are logged and swallowed: history is
//! a convenience cache, and losing it must never break the widget using it.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::canonical::{canonical_form, join_array};
use super::key::HistoryKey;
use crate::error::{RecentsError, Result, StorageError};
use crate::storage::DurableStorage;

/// Identifies a listener registered with [`HistoryStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<R> = Box<dyn FnMut(&[R])>;

/// Why a stored list could not be loaded.
#[derive(Debug)]
enum LoadError {
    Storage(StorageError),
    Parse(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "read failed: {}", e),
            Self::Parse(e) => write!(f, "stored value is not a JSON array: {}", e),
        }
    }
}

/// Ordered, deduplicated, bounded history for one key.
pub struct HistoryStore<R, S> {
    key: HistoryKey,
    max_items: usize,
    records: Vec<R>,
    /// Canonical form of each record, parallel to `records`.
    canonical: Vec<String>,
    storage: S,
    listeners: Vec<(SubscriptionId, Listener<R>)>,
    next_subscription: u64,
}

impl<R, S> HistoryStore<R, S>
where
    R: Serialize + DeserializeOwned,
    S: DurableStorage,
{
    /// Default number of records kept.
    pub const DEFAULT_MAX_ITEMS: usize = 10;

    /// Load the history under `key` with the default capacity.
    pub fn open(key: impl Into<String>, storage: S) -> Result<Self> {
        Self::initialize(key, Self::DEFAULT_MAX_ITEMS, storage)
    }

    /// Load the history under `key`, keeping at most `max_items` records.
    ///
    /// Performs one read from `storage`. A missing value yields an empty
    /// list; an unreadable or unparseable value also yields an empty list
    /// and is logged, never returned. Only caller misuse fails: an empty
    /// key or a zero capacity.
    pub fn initialize(key: impl Into<String>, max_items: usize, storage: S) -> Result<Self> {
        let key = HistoryKey::new(key)?;
        if max_items == 0 {
            return Err(RecentsError::InvalidCapacity { max_items });
        }

        let mut store = Self {
            key,
            max_items,
            records: Vec::new(),
            canonical: Vec::new(),
            storage,
            listeners: Vec::new(),
            next_subscription: 0,
        };

        match store.load() {
            Ok(loaded) => store.adopt(loaded),
            Err(e) => warn!(key = %store.key, "Ignoring stored history: {}", e),
        }

        Ok(store)
    }

    /// Record a completed operation.
    ///
    /// Any entry with the same canonical form is removed, `record` becomes
    /// the newest entry, and the list is trimmed to capacity before being
    /// written back under the key. A failed write is logged; the in-memory
    /// list is updated regardless.
    ///
    /// # Errors
    ///
    /// Returns [`RecentsError::RecordNotSerializable`] if `record` has no
    /// JSON form. The list is left unchanged in that case.
    pub fn save(&mut self, record: R) -> Result<&[R]> {
        let form =
            canonical_form(&record).map_err(|e| RecentsError::RecordNotSerializable {
                message: e.to_string(),
            })?;

        self.remove_matching(&form);
        self.records.insert(0, record);
        self.canonical.insert(0, form);

        if self.records.len() > self.max_items {
            let evicted = self.records.len() - self.max_items;
            self.records.truncate(self.max_items);
            self.canonical.truncate(self.max_items);
            debug!(key = %self.key, evicted, "Evicted oldest history entries");
        }

        if let Err(e) = self.persist() {
            warn!(key = %self.key, "History not persisted: {}", e);
        }

        self.notify();
        Ok(self.records.as_slice())
    }

    /// Remove every record and delete the key from storage.
    pub fn clear(&mut self) {
        self.records.clear();
        self.canonical.clear();

        match self.storage.remove(self.key.as_str()) {
            Ok(()) => debug!(key = %self.key, "Cleared history"),
            Err(e) => warn!(key = %self.key, "History key not removed: {}", e),
        }

        self.notify();
    }

    /// Records, newest first.
    pub fn entries(&self) -> &[R] {
        &self.records
    }

    /// Get the record at `index` (0 = newest).
    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    /// Get the newest record.
    pub fn latest(&self) -> Option<&R> {
        self.records.first()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The storage key.
    pub fn key(&self) -> &HistoryKey {
        &self.key
    }

    /// Maximum number of records kept.
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// The backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register a listener called with the new list after every `save` and
    /// `clear`.
    pub fn subscribe(&mut self, listener: impl FnMut(&[R]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn load(&self) -> std::result::Result<Vec<(R, String)>, LoadError> {
        let Some(raw) = self
            .storage
            .get(self.key.as_str())
            .map_err(LoadError::Storage)?
        else {
            return Ok(Vec::new());
        };

        let values: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(LoadError::Parse)?;

        let mut loaded = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<R>(value) {
                Ok(record) => match canonical_form(&record) {
                    Ok(form) => loaded.push((record, form)),
                    Err(e) => debug!(key = %self.key, index, "Skipping stored entry: {}", e),
                },
                Err(e) => debug!(key = %self.key, index, "Skipping stored entry: {}", e),
            }
        }

        Ok(loaded)
    }

    /// Take a loaded list, keeping the newest copy of each record and at
    /// most `max_items` entries.
    fn adopt(&mut self, loaded: Vec<(R, String)>) {
        for (record, form) in loaded {
            if self.records.len() == self.max_items {
                break;
            }
            if self.canonical.contains(&form) {
                continue;
            }
            self.records.push(record);
            self.canonical.push(form);
        }
        debug!(key = %self.key, entries = self.records.len(), "Loaded history");
    }

    fn remove_matching(&mut self, form: &str) {
        let mut i = 0;
        while i < self.canonical.len() {
            if self.canonical[i] == form {
                self.canonical.remove(i);
                self.records.remove(i);
            } else {
                i += 1;
            }
        }
    }

    fn persist(&self) -> std::result::Result<(), StorageError> {
        let body = join_array(self.canonical.iter().map(String::as_str));
        self.storage.set(self.key.as_str(), &body)
    }

    fn notify(&mut self) {
        let records = &self.records;
        for (_, listener) in &mut self.listeners {
            listener(records);
        }
    }
}

impl<R: fmt::Debug, S> fmt::Debug for HistoryStore<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStore")
            .field("key", &self.key)
            .field("max_items", &self.max_items)
            .field("records", &self.records)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ConversionRecord;
    use crate::storage::MemoryStorage;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn rec(from: &str, to: &str, date: &str) -> ConversionRecord {
        ConversionRecord::new(from, to, date)
    }

    fn froms(store: &HistoryStore<ConversionRecord, &MemoryStorage>) -> Vec<String> {
        store.entries().iter().map(|r| r.from.clone()).collect()
    }

    #[test]
    fn initialize_empty_storage() {
        let storage = MemoryStorage::new();
        let store: HistoryStore<ConversionRecord, _> =
            HistoryStore::initialize("len-hist", 3, &storage).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.max_items(), 3);
        assert_eq!(store.key().as_str(), "len-hist");
    }

    #[test]
    fn open_uses_default_capacity() {
        let storage = MemoryStorage::new();
        let store: HistoryStore<ConversionRecord, _> =
            HistoryStore::open("len-hist", &storage).unwrap();

        assert_eq!(store.max_items(), 10);
    }

    #[test]
    fn initialize_rejects_empty_key() {
        let storage = MemoryStorage::new();
        let err = HistoryStore::<ConversionRecord, _>::initialize("", 3, &storage).unwrap_err();
        assert!(matches!(err, RecentsError::InvalidKey { .. }));
    }

    #[test]
    fn initialize_rejects_zero_capacity() {
        let storage = MemoryStorage::new();
        let err = HistoryStore::<ConversionRecord, _>::initialize("k", 0, &storage).unwrap_err();
        assert!(matches!(err, RecentsError::InvalidCapacity { max_items: 0 }));
    }

    #[test]
    fn save_prepends() {
        let storage = MemoryStorage::new();
        let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();

        store.save(rec("a", "1", "t1")).unwrap();
        store.save(rec("b", "2", "t2")).unwrap();

        assert_eq!(froms(&store), vec!["b", "a"]);
        assert_eq!(store.latest().unwrap().from, "b");
    }

    #[test]
    fn save_same_record_twice_keeps_one() {
        let storage = MemoryStorage::new();
        let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();
        let r = rec("10 m", "1000 cm", "t1");

        store.save(r.clone()).unwrap();
        let list = store.save(r.clone()).unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0], r);
    }

    #[test]
    fn resave_moves_to_head() {
        let storage = MemoryStorage::new();
        let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();
        let (a, b, c) = (rec("A", "", ""), rec("B", "", ""), rec("C", "", ""));

        store.save(c.clone()).unwrap();
        store.save(b).unwrap();
        store.save(a).unwrap();
        assert_eq!(froms(&store), vec!["A", "B", "C"]);

        store.save(c).unwrap();
        assert_eq!(froms(&store), vec!["C", "A", "B"]);
    }

    #[test]
    fn eviction_drops_oldest() {
        let storage = MemoryStorage::new();
        let mut store = HistoryStore::initialize("k", 2, &storage).unwrap();

        store.save(rec("A", "", "")).unwrap();
        store.save(rec("B", "", "")).unwrap();
        store.save(rec("C", "", "")).unwrap();

        assert_eq!(froms(&store), vec!["C", "B"]);
    }

    #[test]
    fn different_date_is_a_different_record() {
        let storage = MemoryStorage::new();
        let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();

        store.save(rec("10 m", "1000 cm", "t1")).unwrap();
        store.save(rec("10 m", "1000 cm", "t2")).unwrap();

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn save_writes_canonical_array() {
        let storage = MemoryStorage::new();
        let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();

        store.save(rec("1 m", "100 cm", "t1")).unwrap();
        store.save(rec("5 kg", "11 lb", "t2")).unwrap();

        assert_eq!(
            storage.get("k").unwrap().unwrap(),
            r#"[{"date":"t2","from":"5 kg","to":"11 lb"},{"date":"t1","from":"1 m","to":"100 cm"}]"#
        );
    }

    #[test]
    fn reload_restores_order() {
        let storage = MemoryStorage::new();
        {
            let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();
            store.save(rec("a", "", "")).unwrap();
            store.save(rec("b", "", "")).unwrap();
        }

        let store: HistoryStore<ConversionRecord, _> =
            HistoryStore::initialize("k", 5, &storage).unwrap();
        assert_eq!(froms(&store), vec!["b", "a"]);
    }

    #[test]
    fn corrupt_value_loads_empty() {
        let storage = MemoryStorage::new();
        storage.insert_raw("k", "{not json");

        let store: HistoryStore<ConversionRecord, _> =
            HistoryStore::initialize("k", 5, &storage).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn non_array_value_loads_empty() {
        let storage = MemoryStorage::new();
        storage.insert_raw("k", r#"{"from":"a","to":"b","date":"c"}"#);

        let store: HistoryStore<ConversionRecord, _> =
            HistoryStore::initialize("k", 5, &storage).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_value_is_overwritten_on_save() {
        let storage = MemoryStorage::new();
        storage.insert_raw("k", "garbage");

        let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();
        store.save(rec("a", "b", "c")).unwrap();

        assert_eq!(
            storage.get("k").unwrap().unwrap(),
            r#"[{"date":"c","from":"a","to":"b"}]"#
        );
    }

    #[test]
    fn mismatched_entries_are_skipped() {
        let storage = MemoryStorage::new();
        storage.insert_raw(
            "k",
            r#"[{"from":"a","to":"b","date":"t2"},{"input":"old shape"},{"from":"c","to":"d","date":"t1"}]"#,
        );

        let store: HistoryStore<ConversionRecord, _> =
            HistoryStore::initialize("k", 5, &storage).unwrap();
        assert_eq!(froms(&store), vec!["a", "c"]);
    }

    #[test]
    fn untyped_records_keep_mixed_shapes() {
        let storage = MemoryStorage::new();
        storage.insert_raw("k", r#"[{"from":"a","to":"b"},{"input":"old shape"}]"#);

        let store: HistoryStore<serde_json::Value, _> =
            HistoryStore::initialize("k", 5, &storage).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap()["input"], "old shape");
    }

    #[test]
    fn oversized_stored_list_is_truncated() {
        let storage = MemoryStorage::new();
        storage.insert_raw("k", "[1,2,3,4,5]");

        let store: HistoryStore<u32, _> = HistoryStore::initialize("k", 3, &storage).unwrap();
        assert_eq!(store.entries(), &[1, 2, 3]);
        // Loading never writes.
        assert_eq!(storage.get("k").unwrap().unwrap(), "[1,2,3,4,5]");
    }

    #[test]
    fn duplicate_stored_entries_keep_newest() {
        let storage = MemoryStorage::new();
        storage.insert_raw("k", "[1,2,1,3]");

        let store: HistoryStore<u32, _> = HistoryStore::initialize("k", 5, &storage).unwrap();
        assert_eq!(store.entries(), &[1, 2, 3]);
    }

    #[test]
    fn unreadable_storage_loads_empty() {
        let storage = MemoryStorage::disabled();
        let store: HistoryStore<ConversionRecord, _> =
            HistoryStore::initialize("k", 5, &storage).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn write_failure_still_updates_memory() {
        let storage = MemoryStorage::with_quota(16);
        let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();

        let list = store.save(rec("a long input value", "a long output", "t1")).unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn disabled_storage_never_fails_caller() {
        let storage = MemoryStorage::disabled();
        let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();

        assert!(store.save(rec("a", "b", "c")).is_ok());
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn unserializable_record_is_rejected() {
        let storage = MemoryStorage::new();
        let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();

        let mut bad: BTreeMap<Vec<u8>, u8> = BTreeMap::new();
        bad.insert(vec![1], 0);
        store.save(BTreeMap::new()).unwrap();

        let err = store.save(bad).unwrap_err();
        assert!(matches!(err, RecentsError::RecordNotSerializable { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clear_removes_key() {
        let storage = MemoryStorage::new();
        let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();
        store.save(rec("a", "b", "c")).unwrap();

        store.clear();

        assert!(store.is_empty());
        assert!(!storage.contains("k").unwrap());
    }

    #[test]
    fn clear_on_empty_store() {
        let storage = MemoryStorage::new();
        let mut store: HistoryStore<ConversionRecord, _> =
            HistoryStore::initialize("k", 5, &storage).unwrap();

        store.clear();
        assert!(store.is_empty());
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn separate_keys_are_independent() {
        let storage = MemoryStorage::new();
        let mut length = HistoryStore::initialize("length", 5, &storage).unwrap();
        let mut weight = HistoryStore::initialize("weight", 5, &storage).unwrap();

        length.save(rec("1 m", "100 cm", "t1")).unwrap();
        weight.save(rec("1 kg", "2.2 lb", "t1")).unwrap();
        length.clear();

        assert!(length.is_empty());
        assert_eq!(weight.len(), 1);
        assert_eq!(storage.keys().unwrap(), vec!["weight"]);
    }

    #[test]
    fn subscribers_see_each_change() {
        let storage = MemoryStorage::new();
        let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        store.subscribe(move |list: &[serde_json::Value]| sink.borrow_mut().push(list.len()));

        store.save(json!({"n": 1})).unwrap();
        store.save(json!({"n": 2})).unwrap();
        store.clear();

        assert_eq!(*seen.borrow(), vec![1, 2, 0]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let storage = MemoryStorage::new();
        let mut store = HistoryStore::initialize("k", 5, &storage).unwrap();
        let count = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&count);
        let id = store.subscribe(move |_: &[u32]| *sink.borrow_mut() += 1);

        store.save(1).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.save(2).unwrap();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn debug_output_names_key() {
        let storage = MemoryStorage::new();
        let store: HistoryStore<u32, _> = HistoryStore::initialize("dbg", 2, &storage).unwrap();
        assert!(format!("{:?}", store).contains("dbg"));
    }
}
