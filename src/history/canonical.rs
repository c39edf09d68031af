//! Canonical serialized form of records.
//!
//! Two records are the same history entry when their canonical forms are
//! byte-identical. The canonical form is compact JSON with object keys in
//! sorted order. Nothing else is normalized: `1` and `1.0` differ, and so do
//! strings that differ only in whitespace.

use serde::Serialize;

/// Serialize `value` to its canonical JSON text.
///
/// Fails when the value cannot be represented as JSON (for example a map
/// whose keys are not strings).
pub fn canonical_form<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    // serde_json::Map is ordered by key, so going through Value sorts fields.
    let value = serde_json::to_value(value)?;
    serde_json::to_string(&value)
}

/// Compare two records by canonical form.
///
/// Values that cannot be serialized are never equal to anything.
pub fn records_equal<A, B>(a: &A, b: &B) -> bool
where
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
{
    match (canonical_form(a), canonical_form(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Join already-canonical entries into the persisted JSON array.
pub(crate) fn join_array<'a>(entries: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::from("[");
    for (i, entry) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(entry);
    }
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct ToFirst {
        to: &'static str,
        from: &'static str,
    }

    #[derive(Serialize)]
    struct FromFirst {
        from: &'static str,
        to: &'static str,
    }

    #[test]
    fn keys_are_sorted() {
        let form = canonical_form(&ToFirst {
            to: "1000 cm",
            from: "10 m",
        })
        .unwrap();
        insta::assert_snapshot!(form, @r#"{"from":"10 m","to":"1000 cm"}"#);
    }

    #[test]
    fn declaration_order_does_not_matter() {
        assert!(records_equal(
            &ToFirst { to: "b", from: "a" },
            &FromFirst { from: "a", to: "b" }
        ));
    }

    #[test]
    fn nested_objects_are_sorted() {
        let form = canonical_form(&json!({"z": {"b": 1, "a": 2}, "a": [3]})).unwrap();
        insta::assert_snapshot!(form, @r#"{"a":[3],"z":{"a":2,"b":1}}"#);
    }

    #[test]
    fn integer_and_float_differ() {
        assert!(!records_equal(&json!({"v": 1}), &json!({"v": 1.0})));
    }

    #[test]
    fn whitespace_differs() {
        assert!(!records_equal(&json!({"date": "t1"}), &json!({"date": "t1 "})));
    }

    #[test]
    fn non_string_map_keys_fail() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8, 2], "x");
        assert!(canonical_form(&map).is_err());
        assert!(!records_equal(&map, &map));
    }

    #[test]
    fn join_array_builds_json() {
        assert_eq!(join_array(Vec::<&str>::new()), "[]");
        assert_eq!(join_array(["1", "{\"a\":2}"]), "[1,{\"a\":2}]");
    }
}
