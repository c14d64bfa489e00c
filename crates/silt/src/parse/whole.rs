//! 📦 Strategy 2 — the whole payload as one JSON document.
//!
//! Reached only when line-by-line parsing found nothing, which usually means
//! a pretty-printed array or object spread across many lines. One parse, one
//! verdict:
//!
//! - array → the batch is its elements (no further flattening)
//! - object → the batch is that one object
//! - anything else → nothing, fall through
//!
//! ⚠️ That last arm is load-bearing and deliberately weird: a payload that is
//! literally `42` or `"hello"` parses successfully and is then DISCARDED,
//! handing control to the repair strategy (which won't find braces either).
//! Long-standing behavior, preserved verbatim. Changing it would change what
//! lands in the `_unparsed` fallback for scalar payloads, and downstream has
//! opinions about that file. 🦆

use serde_json::Value;

/// 📦 Try the trimmed payload as a single JSON document.
///
/// `Some(batch)` for arrays and objects; `None` for scalars and parse
/// failures, which sends control to the next strategy.
pub(crate) fn parse_document(trimmed: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(elements)) => Some(elements),
        Ok(value @ Value::Object(_)) => Some(vec![value]),
        // Scalars and parse errors alike: step aside.
        _ => None,
    }
}
