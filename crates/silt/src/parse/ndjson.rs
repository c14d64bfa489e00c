//! 📡 Strategy 1 — NDJSON-by-line, with industrial-strength noise tolerance.
//!
//! One JSON value per line is the contract upstream *claims* to honor.
//! This strategy holds them to it loosely: lines that don't even look like
//! JSON (no leading `{` or `[`) are waved through as noise, and lines that
//! look like JSON but aren't are skipped without comment. Silence is the
//! whole feature. Nobody wants a stack trace per log line.
//!
//! 🧠 Knowledge graph:
//! - **Array lines flatten one level**: a line holding `[a,b]` contributes
//!   `a` and `b` as individual records. Exactly one level. The elements keep
//!   whatever shape they had.
//! - **First non-empty result wins**: if this strategy finds anything at all,
//!   the later strategies never run. 🦆

use serde_json::Value;

/// 📡 Parse text line-by-line as NDJSON, skipping noise, flattening arrays once.
///
/// Returns every record found, in line order. An empty result means "not my
/// payload shape" and hands control to the next strategy.
pub(crate) fn parse_lines(text: &str) -> Vec<Value> {
    let mut records = Vec::new();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        // Noise gate: empty lines and lines that can't possibly open a JSON
        // container are skipped before we pay for a parse attempt.
        if line.is_empty() || !(line.starts_with('{') || line.starts_with('[')) {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(Value::Array(elements)) => records.extend(elements),
            Ok(value) => records.push(value),
            // Looked like JSON, wasn't JSON. Happens. Skipped.
            Err(_) => continue,
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn the_one_where_plain_ndjson_just_works() {
        let records = parse_lines("{\"a\":1}\n{\"b\":2}");
        assert_eq!(records, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn the_one_where_lines_get_trimmed_before_judgment() {
        // 🧪 Leading/trailing whitespace doesn't disqualify a line.
        let records = parse_lines("   {\"a\":1}   \n\t{\"b\":2}");
        assert_eq!(records, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn the_one_where_non_json_looking_lines_never_get_parsed() {
        // 🧪 "42" is valid JSON but doesn't start with { or [ — noise-gated out.
        let records = parse_lines("42\ntrue\n\"hello\"\n{\"a\":1}");
        assert_eq!(records, vec![json!({"a": 1})]);
    }

    #[test]
    fn the_one_where_a_broken_json_line_is_silently_skipped() {
        let records = parse_lines("{\"a\":1}\n{\"broken\":\n{\"b\":2}");
        assert_eq!(records, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn the_one_where_an_array_line_donates_its_elements() {
        // 🧪 Flattening keeps non-object elements as records too. A bare 7 is
        // a record now. It has a career. It pays taxes.
        let records = parse_lines("[7,{\"a\":1},\"s\"]");
        assert_eq!(records, vec![json!(7), json!({"a": 1}), json!("s")]);
    }

    #[test]
    fn the_one_where_an_empty_array_line_contributes_nothing() {
        assert!(parse_lines("[]").is_empty());
    }
}
