//! 🎬 *[the payload arrives. it claims to be NDJSON. it is lying.]*
//! *[dramatic zoom on three strategies, standing in a fixed priority order]*
//!
//! 🧰 The Parse module — tolerant, multi-strategy, unoffendable.
//!
//! Upstream producers emit whatever their hearts desire: one JSON per line,
//! a single pretty-printed array, objects concatenated with no delimiter at
//! all, log noise interleaved with real records. This module turns all of it
//! into an ordered batch of `serde_json::Value`s, best-effort, and it NEVER
//! fails. Not "rarely fails". Never. An empty batch is the worst case.
//!
//! 🧠 Knowledge graph:
//! - **Strategy 1** ([`ndjson`]): line-by-line, noise lines skipped, arrays
//!   flattened one level. First non-empty result wins.
//! - **Strategy 2** ([`whole`]): the entire payload as one JSON document.
//!   Arrays yield their elements, objects yield themselves, scalars yield
//!   nothing and fall through (yes, on purpose — see the strategy's docs).
//! - **Strategy 3** ([`repair`]): glue-sniffing for `}{` seams — split
//!   concatenated objects apart and parse whatever survives.
//! - Strategies are pure functions tried in order. No shared state. No
//!   control flow via exceptions. Each one either produces records or
//!   politely steps aside.
//!
//! ```text
//! text → ndjson? → whole payload? → concatenated repair? → Vec<Value> (maybe empty)
//! ```
//!
//! 🦆 (the duck parsed on the first strategy. the duck's producer is well-behaved.
//! the duck does not know how lucky it is.)

mod ndjson;
mod repair;
mod whole;

use serde_json::Value;

/// 🧰 Parse raw decoded text into an ordered record batch, best effort.
///
/// Three strategies, fixed priority, each attempted only if the previous one
/// produced nothing. Whatever survives strategy 3 — possibly nothing — is the
/// answer. Malformed input degrades the result; it never errors it.
///
/// # Contract 📜
/// - Never panics, never returns `Err` (there is no `Err` to return).
/// - Record order matches input line/discovery order.
/// - An empty batch is a valid outcome, handled downstream by the fallback
///   record in `normalize`.
pub fn robust_parse(text: &str) -> Vec<Value> {
    // 1) NDJSON lines — the common case, and the only strategy that
    //    tolerates noise interleaved with records.
    let records = ndjson::parse_lines(text);
    if !records.is_empty() {
        return records;
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        // Nothing but whitespace. Strategies 2 and 3 would agree; skip the meeting.
        return Vec::new();
    }

    // 2) Whole payload as a single JSON document.
    if let Some(records) = whole::parse_document(trimmed) {
        return records;
    }

    // 3) Concatenated-object repair. Last resort. Lowest standards.
    repair::parse_concatenated(trimmed)
}
