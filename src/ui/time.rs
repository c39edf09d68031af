//! Date formatting for history entries.

use chrono::{DateTime, Utc};

/// Format a timestamp as relative time (e.g., "5 minutes ago").
pub fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    format_relative_time_from(timestamp, Utc::now())
}

fn format_relative_time_from(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(timestamp).num_seconds();

    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return if minutes == 1 {
            "1 minute ago".to_string()
        } else {
            format!("{} minutes ago", minutes)
        };
    }

    let hours = minutes / 60;
    if hours < 24 {
        return if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        };
    }

    let days = hours / 24;
    if days == 1 {
        "yesterday".to_string()
    } else {
        format!("{} days ago", days)
    }
}

/// Describe a record date: relative when it is RFC 3339, verbatim otherwise.
pub fn describe_date(date: &str) -> String {
    match DateTime::parse_from_rfc3339(date) {
        Ok(ts) => format_relative_time(ts.with_timezone(&Utc)),
        Err(_) => date.to_string(),
    }
}
