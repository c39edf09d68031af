//! Conversion records.
//!
//! The record shape produced by the unit converters: what went in, what
//! came out, and when.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One completed conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRecord {
    /// Human-readable input, e.g. `"10 m"`.
    pub from: String,

    /// Human-readable result, e.g. `"1000 cm"`.
    pub to: String,

    /// When the conversion was produced.
    pub date: String,
}

impl ConversionRecord {
    /// Create a record with an explicit date string.
    pub fn new(from: impl Into<String>, to: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            date: date.into(),
        }
    }

    /// Create a record stamped with the current time.
    pub fn now(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(
            from,
            to,
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    /// Parse the date, if it is an RFC 3339 timestamp.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }
}
