//! Shared display helpers for history entries.
//!
//! Entries are untyped JSON so that any widget's history can be shown.
//! Records shaped like conversions (`from`/`to`, optional `date`) render as
//! a readable line; anything else renders as its canonical JSON.

use serde_json::Value;

use crate::history::canonical_form;
use crate::ui::describe_date;

/// Render one entry as a single line.
pub fn entry_line(entry: &Value) -> String {
    let from = entry.get("from").and_then(Value::as_str);
    let to = entry.get("to").and_then(Value::as_str);

    match (from, to) {
        (Some(from), Some(to)) => match entry.get("date").and_then(Value::as_str) {
            Some(date) => format!("{} → {} ({})", from, to, describe_date(date)),
            None => format!("{} → {}", from, to),
        },
        _ => canonical_form(entry).unwrap_or_else(|_| entry.to_string()),
    }
}

/// Render an entry with its index, e.g. `[0] 10 m → 1000 cm (t1)`.
pub fn indexed_line(index: usize, entry: &Value) -> String {
    format!("[{}] {}", index, entry_line(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn conversion_with_free_form_date() {
        let entry = json!({"from": "10 m", "to": "1000 cm", "date": "t1"});
        assert_eq!(entry_line(&entry), "10 m → 1000 cm (t1)");
    }

    #[test]
    fn conversion_without_date() {
        let entry = json!({"from": "5 kg", "to": "11 lb"});
        assert_eq!(entry_line(&entry), "5 kg → 11 lb");
    }

    #[test]
    fn other_shapes_render_canonically() {
        let entry = json!({"b": 2, "a": 1});
        assert_eq!(entry_line(&entry), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn non_string_fields_fall_back() {
        let entry = json!({"from": 10, "to": "1000 cm"});
        assert_eq!(entry_line(&entry), r#"{"from":10,"to":"1000 cm"}"#);
    }

    #[test]
    fn indexed() {
        let entry = json!({"from": "1 m", "to": "100 cm", "date": "t3"});
        assert_eq!(indexed_line(2, &entry), "[2] 1 m → 100 cm (t3)");
    }
}
