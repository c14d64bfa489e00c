//! 🔧 Strategy 3 — concatenated-object repair. Last resort. Lowest standards.
//!
//! 🎬 *[the payload: `{"a":1}{"b":2}`. no newline. no delimiter. no shame.]*
//!
//! Some producer out there writes JSON objects back-to-back with nothing
//! between them, like parked cars with zero inches of clearance. This
//! strategy pries them apart: every `}` followed (possibly after whitespace)
//! by a `{` gets a newline wedged between, then each resulting line that
//! looks like a complete object gets one parse attempt. Failures are skipped;
//! whatever was collected survives.
//!
//! 🧠 Knowledge graph:
//! - **memchr does the seam-finding** — we scan for `}` bytes and peek ahead,
//!   instead of walking every char. Both braces are ASCII, so byte offsets
//!   are always char boundaries and the slicing below is panic-free.
//! - **Known blind spot**: a `}{` inside a string literal also gets split,
//!   and the two halves then fail their parse attempts and are skipped.
//!   That record is lost. This is a repair strategy, not a JSON lexer —
//!   by the time we're here, the payload already failed two honest parses. 🦆

use memchr::memchr_iter;
use serde_json::Value;

/// 🔧 Split concatenated objects apart and parse whatever survives.
///
/// Expects the already-trimmed payload. Returns every line that both looks
/// like (`{`...`}`) and parses as JSON, in order. Possibly empty.
pub(crate) fn parse_concatenated(trimmed: &str) -> Vec<Value> {
    let repaired = insert_seam_breaks(trimmed);
    let mut records = Vec::new();
    for raw_line in repaired.lines() {
        let line = raw_line.trim();
        if line.starts_with('{') && line.ends_with('}') {
            if let Ok(value) = serde_json::from_str::<Value>(line) {
                records.push(value);
            }
        }
    }
    records
}

/// ✂️ Insert a newline at every `}` + optional-whitespace + `{` seam.
///
/// The whitespace between the braces is dropped, the newline takes its place.
fn insert_seam_breaks(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut repaired = String::with_capacity(text.len() + 16);
    let mut copied_up_to = 0;
    for close in memchr_iter(b'}', bytes) {
        let mut next = close + 1;
        while next < bytes.len() && bytes[next].is_ascii_whitespace() {
            next += 1;
        }
        if next < bytes.len() && bytes[next] == b'{' {
            repaired.push_str(&text[copied_up_to..=close]);
            repaired.push('\n');
            copied_up_to = next;
        }
    }
    repaired.push_str(&text[copied_up_to..]);
    repaired
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn the_one_where_back_to_back_objects_get_separated() {
        let records = parse_concatenated("{\"a\":1}{\"b\":2}{\"c\":3}");
        assert_eq!(records, vec![json!({"a": 1}), json!({"b": 2}), json!({"c": 3})]);
    }

    #[test]
    fn the_one_where_whitespace_at_the_seam_is_swallowed() {
        let records = parse_concatenated("{\"a\":1} \t {\"b\":2}");
        assert_eq!(records, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn the_one_where_a_broken_segment_is_skipped_not_fatal() {
        // 🧪 The middle segment is mangled. Its neighbors are fine. We keep the neighbors.
        let records = parse_concatenated("{\"a\":1}{broken}{\"c\":3}");
        assert_eq!(records, vec![json!({"a": 1}), json!({"c": 3})]);
    }

    #[test]
    fn the_one_where_nested_objects_stay_whole() {
        // 🧪 `{"a":{"b":1}}` has an inner `}}` — no `}{` seam, no split, one record.
        let records = parse_concatenated("{\"a\":{\"b\":1}}{\"c\":2}");
        assert_eq!(records, vec![json!({"a": {"b": 1}}), json!({"c": 2})]);
    }

    #[test]
    fn the_one_where_nothing_brace_shaped_means_nothing_parsed() {
        assert!(parse_concatenated("no braces here").is_empty());
        assert!(parse_concatenated("[1,2,3]").is_empty());
    }

    #[test]
    fn the_one_where_the_seam_finder_leaves_innocents_alone() {
        // 🧪 No seams → the text comes back byte-identical.
        assert_eq!(insert_seam_breaks("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(insert_seam_breaks(""), "");
    }

    #[test]
    fn the_one_where_multibyte_text_does_not_upset_the_byte_scan() {
        // 🧪 Ducks between the braces. The seam finder slices only at ASCII offsets.
        let records = parse_concatenated("{\"k\":\"🦆\"}{\"k\":\"🐄\"}");
        assert_eq!(records, vec![json!({"k": "🦆"}), json!({"k": "🐄"})]);
    }
}
