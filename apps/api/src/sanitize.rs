//! Field-level coercion shared by every result sanitizer.
//!
//! Sanitization is total: any parsed value, including `null`, an array, or an
//! empty object, coerces into a fully-populated result. Missing or invalid
//! fields degrade to documented defaults; nothing in this module can fail.
//! Each analyzer kind applies these helpers according to its field table and
//! adds no branching of its own.

use serde_json::Value;

static NULL: Value = Value::Null;

/// Marker for fields the schema leaves unbounded.
pub const NO_CAP: usize = usize::MAX;

/// String-valued enums that default rather than reject unknown spellings.
/// Matching is exact and case-sensitive against the declared members.
pub trait Keyword: Sized + Default {
    fn from_keyword(s: &str) -> Option<Self>;
}

/// Truncates to at most `cap` characters, on a char boundary.
pub fn truncate_chars(s: &str, cap: usize) -> String {
    match s.char_indices().nth(cap) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Coerces any value to a string, capped. Null and absent become empty.
pub fn capped_string(value: &Value, cap: usize) -> String {
    let s = match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    truncate_chars(&s, cap)
}

pub fn string_field(obj: &Value, key: &str, cap: usize) -> String {
    capped_string(obj.get(key).unwrap_or(&NULL), cap)
}

/// String field with a documented default for absent or empty values
/// (e.g. market "Canadian", currency "CAD").
pub fn string_field_or(obj: &Value, key: &str, cap: usize, default: &str) -> String {
    let s = string_field(obj, key, cap);
    if s.is_empty() {
        default.to_string()
    } else {
        s
    }
}

/// Optional string field: `None` when absent, null, or empty.
pub fn optional_string(obj: &Value, key: &str, cap: usize) -> Option<String> {
    let s = string_field(obj, key, cap);
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Enum field: declared member or the kind's default.
pub fn enum_field<T: Keyword>(obj: &Value, key: &str) -> T {
    obj.get(key)
        .and_then(Value::as_str)
        .and_then(T::from_keyword)
        .unwrap_or_default()
}

/// Numeric field. Anything that does not coerce to a usable number — absent,
/// non-numeric, NaN, or zero — substitutes the field's default.
pub fn number_field(obj: &Value, key: &str, default: f64) -> f64 {
    let coerced = match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    match coerced {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => default,
    }
}

/// Integer-or-null field (e.g. graduation year): kept only when the value is
/// an actual integer, otherwise `None`.
pub fn int_or_null(obj: &Value, key: &str) -> Option<i64> {
    obj.get(key).and_then(Value::as_i64)
}

/// Boolean field with JS-style truthiness: false, 0, "", and null are false,
/// everything else is true.
pub fn bool_field(obj: &Value, key: &str) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}

/// List field as a slice; non-arrays substitute the empty list.
pub fn array_field<'a>(obj: &'a Value, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// List of strings, capped in count and per-item length.
/// Pass `usize::MAX` for uncapped dimensions.
pub fn string_list(obj: &Value, key: &str, count_cap: usize, len_cap: usize) -> Vec<String> {
    array_field(obj, key)
        .iter()
        .take(count_cap)
        .map(|v| capped_string(v, len_cap))
        .collect()
}

/// Nested object field. Absent or non-object values yield `Null`, which the
/// nested sanitizer turns into a fully-defaulted instance — downstream
/// consumers never null-check these.
pub fn object_field<'a>(obj: &'a Value, key: &str) -> &'a Value {
    match obj.get(key) {
        Some(v) if v.is_object() => v,
        _ => &NULL,
    }
}

/// Clamps a score into [0, 1].
pub fn clamp_unit(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    enum Level {
        Low,
        #[default]
        Mid,
    }

    impl Keyword for Level {
        fn from_keyword(s: &str) -> Option<Self> {
            match s {
                "low" => Some(Level::Low),
                "mid" => Some(Level::Mid),
                _ => None,
            }
        }
    }

    #[test]
    fn test_string_field_caps_and_defaults() {
        let obj = json!({"name": "a very long skill name"});
        assert_eq!(string_field(&obj, "name", 6), "a very");
        assert_eq!(string_field(&obj, "missing", 6), "");
        assert_eq!(string_field(&json!(null), "name", 6), "");
    }

    #[test]
    fn test_string_field_coerces_numbers() {
        let obj = json!({"duration": 24});
        assert_eq!(string_field(&obj, "duration", 50), "24");
    }

    #[test]
    fn test_truncate_chars_is_char_boundary_safe() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ab", 10), "ab");
    }

    #[test]
    fn test_enum_field_exact_match_or_default() {
        assert_eq!(enum_field::<Level>(&json!({"l": "low"}), "l"), Level::Low);
        assert_eq!(enum_field::<Level>(&json!({"l": "LOW"}), "l"), Level::Mid);
        assert_eq!(enum_field::<Level>(&json!({"l": "bogus"}), "l"), Level::Mid);
        assert_eq!(enum_field::<Level>(&json!({}), "l"), Level::Mid);
        assert_eq!(enum_field::<Level>(&json!({"l": 3}), "l"), Level::Mid);
    }

    #[test]
    fn test_number_field_defaults() {
        assert_eq!(number_field(&json!({"c": 0.9}), "c", 0.5), 0.9);
        assert_eq!(number_field(&json!({"c": "0.9"}), "c", 0.5), 0.9);
        assert_eq!(number_field(&json!({"c": "abc"}), "c", 0.5), 0.5);
        assert_eq!(number_field(&json!({}), "c", 0.5), 0.5);
        // Zero is falsy and takes the default, matching coercion in the
        // prompt/sanitizer contract.
        assert_eq!(number_field(&json!({"c": 0}), "c", 0.5), 0.5);
    }

    #[test]
    fn test_int_or_null() {
        assert_eq!(int_or_null(&json!({"year": 2020}), "year"), Some(2020));
        assert_eq!(int_or_null(&json!({"year": 2020.5}), "year"), None);
        assert_eq!(int_or_null(&json!({"year": "2020"}), "year"), None);
        assert_eq!(int_or_null(&json!({}), "year"), None);
    }

    #[test]
    fn test_bool_field_truthiness() {
        assert!(bool_field(&json!({"a": true}), "a"));
        assert!(bool_field(&json!({"a": "yes"}), "a"));
        assert!(bool_field(&json!({"a": 1}), "a"));
        assert!(!bool_field(&json!({"a": false}), "a"));
        assert!(!bool_field(&json!({"a": 0}), "a"));
        assert!(!bool_field(&json!({"a": ""}), "a"));
        assert!(!bool_field(&json!({"a": null}), "a"));
        assert!(!bool_field(&json!({}), "a"));
    }

    #[test]
    fn test_string_list_caps_both_dimensions() {
        let obj = json!({"items": ["aaaa", "bbbb", "cccc"]});
        assert_eq!(string_list(&obj, "items", 2, 3), vec!["aaa", "bbb"]);
        assert_eq!(string_list(&json!({"items": "nope"}), "items", 2, 3), Vec::<String>::new());
    }

    #[test]
    fn test_string_field_or_and_optional_string() {
        let obj = json!({"market": "", "currency": "USD"});
        assert_eq!(string_field_or(&obj, "market", NO_CAP, "Canadian"), "Canadian");
        assert_eq!(string_field_or(&obj, "currency", NO_CAP, "CAD"), "USD");
        assert_eq!(optional_string(&obj, "market", NO_CAP), None);
        assert_eq!(optional_string(&obj, "missing", NO_CAP), None);
        assert_eq!(
            optional_string(&obj, "currency", NO_CAP),
            Some("USD".to_string())
        );
    }

    #[test]
    fn test_object_field_substitutes_null_for_non_objects() {
        let obj = json!({"nested": {"a": 1}, "flat": 3});
        assert!(object_field(&obj, "nested").is_object());
        assert!(object_field(&obj, "flat").is_null());
        assert!(object_field(&obj, "missing").is_null());
    }
}
