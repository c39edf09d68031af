//! File-backed storage (one JSON file per key).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{DurableStorage, StorageResult};
use crate::error::StorageError;

const EXTENSION: &str = "json";

/// Longest hex-encoded key used directly as a file name. Leaves room for
/// the extension and the temp suffix under the usual 255-byte limit.
const MAX_HEX_NAME: usize = 200;

/// File name prefix for keys stored under their digest.
const DIGEST_PREFIX: &str = "h-";

/// File body for a digest-named key, which cannot be recovered from its
/// file name.
#[derive(Debug, Serialize, Deserialize)]
struct KeyedValue {
    key: String,
    value: String,
}

/// Storage that keeps each key in its own file under a root directory.
///
/// File names are the hex encoding of the key, so any key text maps to a
/// safe name and [`keys`](DurableStorage::keys) can recover the original.
/// Keys too long for that are named by their SHA-256 digest instead, and
/// the file records the key next to the value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `root`. The directory is created on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the file path holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name = match hex_name(key) {
            Some(name) => name,
            None => digest_name(key),
        };
        self.root.join(format!("{}.{}", name, EXTENSION))
    }

    /// Ensure the storage directory exists.
    fn ensure_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create storage directory {:?}", self.root))?;
        Ok(())
    }

    fn read_text(path: &Path, key: &str) -> StorageResult<String> {
        let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
        String::from_utf8(bytes).map_err(|_| StorageError::NotText {
            key: key.to_string(),
        })
    }

    fn key_from_path(path: &Path) -> Option<String> {
        if path.extension().is_none_or(|e| e != EXTENSION) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;

        if stem.starts_with(DIGEST_PREFIX) {
            let text = fs::read_to_string(path).ok()?;
            let stored: KeyedValue = serde_json::from_str(&text).ok()?;
            return Some(stored.key);
        }

        let bytes = hex::decode(stem).ok()?;
        String::from_utf8(bytes).ok()
    }
}

fn hex_name(key: &str) -> Option<String> {
    (key.len() * 2 <= MAX_HEX_NAME).then(|| hex::encode(key.as_bytes()))
}

fn digest_name(key: &str) -> String {
    format!(
        "{}{}",
        DIGEST_PREFIX,
        hex::encode(&Sha256::digest(key.as_bytes())[..])
    )
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        let text = Self::read_text(&path, key)?;
        if hex_name(key).is_some() {
            return Ok(Some(text));
        }

        let stored: KeyedValue = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok((stored.key == key).then_some(stored.value))
    }

    /// Write atomically: write to a temp file, then rename over the target.
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.ensure_dir()?;

        let path = self.path_for(key);
        let body = match hex_name(key) {
            Some(_) => value.to_string(),
            None => serde_json::to_string(&KeyedValue {
                key: key.to_string(),
                value: value.to_string(),
            })
            .context("Failed to encode stored value")?,
        };

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, body)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to move {:?} into place", temp_path))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key);

        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("Failed to remove {:?}", path))?;
        }

        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        let dir = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to list {:?}", self.root))?;

        for entry in dir {
            let entry = entry.context("Failed to read directory entry")?;
            if let Some(key) = Self::key_from_path(&entry.path()) {
                keys.push(key);
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_storage_creation() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());

        assert_eq!(storage.root(), temp.path());
    }

    #[test]
    fn set_and_get() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());

        storage.set("length-converter-history", "[]").unwrap();

        assert_eq!(
            storage.get("length-converter-history").unwrap(),
            Some("[]".to_string())
        );
    }

    #[test]
    fn get_missing_returns_none() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());

        assert_eq!(storage.get("nope").unwrap(), None);
    }

    #[test]
    fn creates_missing_root_on_write() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("store");
        let storage = FileStorage::new(&root);

        storage.set("k", "v").unwrap();
        assert!(root.is_dir());
        assert!(storage.path_for("k").exists());
    }

    #[test]
    fn set_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());

        storage.set("k", "v").unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(".json"));
    }

    #[test]
    fn remove_deletes_file() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());

        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();

        assert!(!storage.path_for("k").exists());
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn remove_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());

        assert!(storage.remove("never-written").is_ok());
    }

    #[test]
    fn keys_round_trip_unusual_names() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());

        storage.set("currency/usd→eur", "[]").unwrap();
        storage.set("length history", "[]").unwrap();

        assert_eq!(
            storage.keys().unwrap(),
            vec!["currency/usd→eur".to_string(), "length history".to_string()]
        );
    }

    #[test]
    fn keys_ignores_foreign_files() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());

        storage.set("a", "[]").unwrap();
        fs::write(temp.path().join("README.txt"), "hi").unwrap();
        fs::write(temp.path().join("zz-not-hex.json"), "[]").unwrap();

        assert_eq!(storage.keys().unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn keys_on_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().join("absent"));

        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn non_utf8_value_is_an_error() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());

        fs::write(storage.path_for("bin"), [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(
            storage.get("bin"),
            Err(StorageError::NotText { .. })
        ));
    }

    #[test]
    fn path_is_deterministic() {
        let storage = FileStorage::new("/tmp/recents");

        assert_eq!(storage.path_for("len"), storage.path_for("len"));
        assert_ne!(storage.path_for("len"), storage.path_for("weight"));
    }

    #[test]
    fn long_key_round_trips_under_digest_name() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());
        let key = "k".repeat(200);

        storage.set(&key, r#"[{"from":"10 m"}]"#).unwrap();

        let name = storage.path_for(&key);
        let name = name.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("h-"));
        assert!(name.len() < 100);
        assert_eq!(
            storage.get(&key).unwrap().as_deref(),
            Some(r#"[{"from":"10 m"}]"#)
        );
        assert_eq!(storage.keys().unwrap(), vec![key.clone()]);

        storage.remove(&key).unwrap();
        assert_eq!(storage.get(&key).unwrap(), None);
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn short_keys_keep_hex_names() {
        let storage = FileStorage::new("/tmp/recents");
        let key = "k".repeat(100);

        let path = storage.path_for(&key);
        assert_eq!(
            path.file_stem().unwrap().to_str().unwrap(),
            hex::encode(key.as_bytes())
        );
        assert!(storage
            .path_for(&"k".repeat(101))
            .to_str()
            .unwrap()
            .contains("h-"));
    }
}
