//! Error types for recents operations.
//!
//! This module defines [`RecentsError`], the primary error type used
//! throughout the crate, [`StorageError`] for durable-storage backends, and a
//! [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Storage and parse failures inside a history store are logged and
//!   swallowed; they never reach the caller
//! - Caller misuse (empty key, zero capacity, unserializable record) is
//!   reported through `RecentsError`
//! - Use `anyhow::Error` (via `RecentsError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for recents operations.
#[derive(Debug, Error)]
pub enum RecentsError {
    /// History key is empty or whitespace.
    #[error("Invalid history key {key:?}: key must not be empty")]
    InvalidKey { key: String },

    /// History capacity must be at least one entry.
    #[error("Invalid history capacity {max_items}: must be at least 1")]
    InvalidCapacity { max_items: usize },

    /// Record could not be serialized to JSON.
    #[error("Record cannot be stored: {message}")]
    RecordNotSerializable { message: String },

    /// Requested history entry does not exist.
    #[error("No entry at index {index} in '{key}' ({len} entries)")]
    EntryNotFound { key: String, index: usize, len: usize },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Durable storage failure surfaced outside a history store.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure reported by a durable storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the value would exceed the backend's byte quota.
    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// Storage is disabled or otherwise not reachable.
    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },

    /// Stored value is not valid UTF-8 text.
    #[error("Stored value for '{key}' is not valid text")]
    NotText { key: String },

    /// Backend I/O failure with context.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Result type alias for recents operations.
pub type Result<T> = std::result::Result<T, RecentsError>;
