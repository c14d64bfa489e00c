//! 🧽 Normalize — the last stop before bytes hit the store.
//!
//! 🎬 *[the batch arrives. some records carry a `debug` field.]*
//! *[they will not be carrying it much longer.]*
//!
//! Two outcomes, one function:
//! - **Records parsed**: strip the top-level `debug` key from mapping records,
//!   serialize each one compactly, one per line, UTF-8. Classic NDJSON.
//! - **Nothing parsed**: emit a single `{"_unparsed":true,"raw":...}` line so
//!   the payload shape is observable downstream instead of silently vanishing.
//!   Evidence beats emptiness.
//!
//! 🧠 Knowledge graph:
//! - `debug` removal is the ONLY structural opinion this module holds.
//!   Arbitrary nested shapes pass through untouched. We are a car wash,
//!   not a body shop.
//! - The fallback `raw` field is capped at [`RAW_PREVIEW_LIMIT`] characters —
//!   enough to diagnose, not enough to mirror a 2GB payload into the output. 🦆

use anyhow::Result;
use serde_json::{Value, json};

/// 📏 Max characters of raw text preserved in the fallback record.
pub const RAW_PREVIEW_LIMIT: usize = 5000;

/// 🧽 Render a record batch as NDJSON bytes, or the fallback line if empty.
///
/// Consumes the batch because `debug` stripping mutates the records in place —
/// nothing upstream wants them back afterwards anyway. `raw_text` is only read
/// when the batch is empty.
pub fn render_ndjson(mut records: Vec<Value>, raw_text: &str) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    if records.is_empty() {
        // Evidence record: truncated by characters, not bytes, so we never
        // slice through the middle of a multi-byte sequence.
        let preview: String = raw_text.chars().take(RAW_PREVIEW_LIMIT).collect();
        let fallback = json!({ "_unparsed": true, "raw": preview });
        out.extend_from_slice(serde_json::to_string(&fallback)?.as_bytes());
        out.push(b'\n');
        return Ok(out);
    }

    for record in &mut records {
        if let Value::Object(fields) = record {
            // No error if absent. The field was optional in life and is
            // mandatory in absence.
            fields.remove("debug");
        }
        out.extend_from_slice(serde_json::to_string(record)?.as_bytes());
        out.push(b'\n');
    }
    Ok(out)
}
