//! History key validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RecentsError, Result};

/// Namespace identifying one widget's history in durable storage.
///
/// A key must contain at least one non-whitespace character. The text is
/// kept exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HistoryKey(String);

impl HistoryKey {
    /// Validate and wrap a key.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(RecentsError::InvalidKey { key });
        }
        Ok(Self(key))
    }

    /// Get the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HistoryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HistoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HistoryKey {
    type Error = RecentsError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<HistoryKey> for String {
    fn from(key: HistoryKey) -> Self {
        key.0
    }
}
