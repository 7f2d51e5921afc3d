//! Tolerant JSON extraction for LLM output.
//!
//! Every analyzer asks the model for exactly one JSON object, but real
//! responses arrive wrapped in markdown fences, truncated mid-object, missing
//! closing brackets, or with raw newlines inside string values. `extract`
//! strips fences, attempts a strict parse, then applies an ordered chain of
//! textual repairs, re-parsing after each. The repairs operate on text, not
//! tokens — they target observed failure modes and are best-effort by design.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Every repair attempt was exhausted without producing valid JSON.
/// Callers recover locally (all-defaults result); this never reaches a handler.
#[derive(Debug, Error)]
#[error("Malformed LLM output: unparseable after {attempts} repairs ({raw_len} bytes)")]
pub struct MalformedOutput {
    pub raw_len: usize,
    pub attempts: u32,
}

/// Raw newline splitting a quoted span. Collapsed to a single space.
static NEWLINE_IN_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"\n]*)\n\s*([^"\n]*)""#).expect("static regex"));

/// Trailing comma straight before a closing brace/bracket.
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("static regex"));

/// Adjacent objects with the separating comma dropped.
static MISSING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\}(\s*\{)").expect("static regex"));

/// Unquoted scalar sitting in value position: `"key": bare text,`.
static BARE_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#":\s*([^",\{\[\]\}\s][^,\{\[\]\}\n]*[^",\{\[\]\}\s])(\s*[,\}\]])"#)
        .expect("static regex")
});

/// Extracts a best-effort JSON value from raw model output.
///
/// Attempt order: fence strip, strict parse, then the repair chain with a
/// re-parse after each step. Valid input short-circuits at the strict parse,
/// so repairs are never applied to well-formed output.
pub fn extract(raw: &str) -> Result<Value, MalformedOutput> {
    let text = strip_fences(raw);

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }

    if !text.contains('{') {
        // Nothing object-like to repair toward.
        return Err(MalformedOutput {
            raw_len: raw.len(),
            attempts: 0,
        });
    }

    let repairs: [(&str, fn(&str) -> String); 6] = [
        ("prose-trim", trim_to_object),
        ("newline-collapse", collapse_newlines),
        ("trailing-comma", strip_trailing_commas),
        ("missing-comma", insert_missing_commas),
        ("bare-value-quote", quote_bare_values),
        ("bracket-balance", balance_brackets),
    ];

    let mut attempts = 0u32;
    let mut current = text.to_string();
    for (name, repair) in repairs {
        attempts += 1;
        current = repair(&current);
        if let Ok(value) = serde_json::from_str::<Value>(&current) {
            debug!("JSON recovered after repair '{name}' ({attempts} attempts)");
            return Ok(value);
        }
    }

    Err(MalformedOutput {
        raw_len: raw.len(),
        attempts,
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Drops prose before the first `{`, and anything after the last `}` when one
/// exists. Truncated output with no closing brace keeps its tail for the
/// bracket balancer to finish.
fn trim_to_object(text: &str) -> String {
    let start = match text.find('{') {
        Some(i) => i,
        None => return text.to_string(),
    };
    let trimmed = &text[start..];
    match trimmed.rfind('}') {
        Some(end) => trimmed[..=end].to_string(),
        None => trimmed.to_string(),
    }
}

/// Collapses escaped and literal newlines inside string-like regions.
/// Models emit raw newlines in string values, which is invalid JSON.
fn collapse_newlines(text: &str) -> String {
    let mut current = text.replace("\\n", " ");
    // A value may span several lines; collapse one break per pass.
    for _ in 0..8 {
        let next = NEWLINE_IN_STRING.replace_all(&current, "\"$1 $2\"");
        if next == current {
            break;
        }
        current = next.into_owned();
    }
    current
}

fn strip_trailing_commas(text: &str) -> String {
    TRAILING_COMMA.replace_all(text, "$1").into_owned()
}

fn insert_missing_commas(text: &str) -> String {
    MISSING_COMMA.replace_all(text, "},$1").into_owned()
}

/// Wraps an unquoted value span in quotes unless it is a number, boolean,
/// or null. Matching is textual; already-quoted values never match because
/// the span may not start with `"`.
fn quote_bare_values(text: &str) -> String {
    BARE_VALUE
        .replace_all(text, |caps: &Captures| {
            let value = &caps[1];
            if value.parse::<f64>().is_ok() || matches!(value, "true" | "false" | "null") {
                caps[0].to_string()
            } else {
                format!(":\"{}\"{}", value, &caps[2])
            }
        })
        .into_owned()
}

/// Bracket balancer: copies input while tracking open `{`/`[` on a stack,
/// drops closers that do not match the top of the stack, and appends closers
/// for everything still open, in LIFO order. String contents are not special-
/// cased; by this point earlier repairs have already failed to produce a
/// parse, so a textual balance is the last resort.
fn balance_brackets(text: &str) -> String {
    let mut stack: Vec<char> = Vec::new();
    let mut balanced = String::with_capacity(text.len() + 4);

    for ch in text.chars() {
        match ch {
            '{' | '[' => {
                stack.push(ch);
                balanced.push(ch);
            }
            '}' => {
                if stack.last() == Some(&'{') {
                    stack.pop();
                    balanced.push(ch);
                }
            }
            ']' => {
                if stack.last() == Some(&'[') {
                    stack.pop();
                    balanced.push(ch);
                }
            }
            _ => balanced.push(ch),
        }
    }

    while let Some(open) = stack.pop() {
        balanced.push(if open == '{' { '}' } else { ']' });
    }

    balanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_json_short_circuits() {
        let raw = r#"{"skills":[{"name":"PM","level":"advanced","confidence":0.9}]}"#;
        let extracted = extract(raw).unwrap();
        let parsed: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(extracted, parsed);
    }

    #[test]
    fn test_fence_invariance_with_json_tag() {
        let inner = r#"{"skills":[],"experience":[],"education":[],"recommendations":[]}"#;
        let fenced = format!("```json\n{inner}\n```");
        let extracted = extract(&fenced).unwrap();
        assert_eq!(extracted, serde_json::from_str::<Value>(inner).unwrap());
    }

    #[test]
    fn test_fence_invariance_without_tag() {
        let inner = r#"{"key": "value"}"#;
        let fenced = format!("```\n{inner}\n```");
        assert_eq!(extract(&fenced).unwrap(), json!({"key": "value"}));
    }

    #[test]
    fn test_strip_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_trailing_commas_repaired() {
        // Scenario B: identical result to the clean form after repair.
        let raw = r#"{"skills":[{"name":"PM","level":"advanced","confidence":0.9},],}"#;
        let extracted = extract(raw).unwrap();
        assert_eq!(
            extracted,
            json!({"skills":[{"name":"PM","level":"advanced","confidence":0.9}]})
        );
    }

    #[test]
    fn test_leading_prose_and_truncation_repaired() {
        // Scenario C: prose-trim plus bracket balancing.
        let raw = r#"Sure, here you go: {"insightSummary": "Great resume""#;
        let extracted = extract(raw).unwrap();
        assert_eq!(extracted, json!({"insightSummary": "Great resume"}));
    }

    #[test]
    fn test_trailing_prose_dropped() {
        let raw = r#"{"a": 1} Hope this helps!"#;
        assert_eq!(extract(raw).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_missing_comma_between_objects() {
        let raw = r#"{"items":[{"a":1}{"a":2}]}"#;
        assert_eq!(extract(raw).unwrap(), json!({"items":[{"a":1},{"a":2}]}));
    }

    #[test]
    fn test_bare_value_quoted() {
        let raw = r#"{"summary": needs work, "score": 3}"#;
        assert_eq!(
            extract(raw).unwrap(),
            json!({"summary": "needs work", "score": 3})
        );
    }

    #[test]
    fn test_bare_value_quoting_preserves_numbers_and_literals() {
        let raw = "{\"n\": 12.5, \"ok\": true, \"missing\": null\n";
        // Unparseable only because of the missing closing brace.
        assert_eq!(
            extract(raw).unwrap(),
            json!({"n": 12.5, "ok": true, "missing": null})
        );
    }

    #[test]
    fn test_raw_newline_inside_string_collapsed() {
        let raw = "{\"summary\": \"line one\nline two\"}";
        assert_eq!(extract(raw).unwrap(), json!({"summary": "line one line two"}));
    }

    #[test]
    fn test_escaped_quotes_survive_fences() {
        let inner = r#"{"quote": "said \"hello\" twice"}"#;
        let fenced = format!("```json\n{inner}\n```");
        let extracted = extract(&fenced).unwrap();
        assert_eq!(extracted, serde_json::from_str::<Value>(inner).unwrap());
    }

    #[test]
    fn test_empty_input_fails_immediately() {
        let err = extract("").unwrap_err();
        assert_eq!(err.attempts, 0);
        assert_eq!(err.raw_len, 0);
    }

    #[test]
    fn test_prose_without_object_fails() {
        let err = extract("I could not produce an analysis.").unwrap_err();
        assert_eq!(err.attempts, 0);
    }

    #[test]
    fn test_unrepairable_reports_attempts() {
        let err = extract("{\"a\": \"unterminated").unwrap_err();
        assert!(err.attempts > 0);
    }

    #[test]
    fn test_balance_brackets_zero_net_open() {
        let balanced = balance_brackets("{\"a\":[1,2,{\"b\":3");
        let opens = balanced.matches(['{', '[']).count();
        let closes = balanced.matches(['}', ']']).count();
        assert_eq!(opens, closes);
    }

    #[test]
    fn test_balance_brackets_drops_orphan_closers() {
        assert_eq!(balance_brackets("}]{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_balance_brackets_idempotent_on_own_output() {
        let inputs = ["{\"a\":[1,2", "}}{{[[", "", "{\"a\":{\"b\":[]}"];
        for input in inputs {
            let once = balance_brackets(input);
            assert_eq!(balance_brackets(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_repairs_are_noops_on_valid_json() {
        let valid = r#"{"skills":[{"name":"PM"}],"summary":"ok, fine"}"#;
        assert_eq!(strip_trailing_commas(valid), valid);
        assert_eq!(insert_missing_commas(valid), valid);
        assert_eq!(balance_brackets(valid), valid);
        assert_eq!(trim_to_object(valid), valid);
    }
}
