//! 🫁 Decode — from "whatever the upstream gave us" to an actual `String`.
//!
//! 🎬 *[a gzip member header appears. the magic bytes check out. probably.]*
//!
//! Two jobs live here:
//! - peel off gzip when the key says `.gz` (the key is the only compression
//!   signal we get — there is no content-type, there is only vibes and suffixes)
//! - decode bytes to text: UTF-8 first, Latin-1 when UTF-8 says no
//!
//! 🧠 Knowledge graph:
//! - **Gzip failure is a transport-class error** — a truncated archive means the
//!   object is broken, not merely messy, so it propagates and fails the invocation.
//! - **Text decoding never fails.** Latin-1 maps every byte 0x00–0xFF to the
//!   same-numbered scalar, so there is no such thing as undecodable input.
//!   Mojibake is survivable. A decode panic at 3am is not.
//!
//! 🦆 (the duck is encoded in UTF-8. the duck has always been encoded in UTF-8.)

use std::io::Read;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

/// 🫁 Decompress the body if the key carries the `.gz` suffix; pass through otherwise.
///
/// The suffix is trusted as given. A `.gz` key wrapping non-gzip bytes is an
/// upstream lie we do not forgive: the decoder errors and the error propagates.
pub fn gunzip_if_needed(key: &str, body: Vec<u8>) -> Result<Vec<u8>> {
    if !key.ends_with(".gz") {
        return Ok(body);
    }
    let mut decoder = GzDecoder::new(body.as_slice());
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed).with_context(|| {
        format!(
            "💀 Object '{key}' wore a .gz suffix but its bytes would not decompress. \
             Either the archive is truncated or the suffix was a costume all along."
        )
    })?;
    Ok(decompressed)
}

/// 🔤 Decode bytes to text. UTF-8 preferred, Latin-1 fallback. Never fails.
///
/// Latin-1 is the "every byte is a character, no questions asked" encoding.
/// The result may be mojibake, but mojibake still flows through the parser,
/// and the parser's noise tolerance was built for exactly this kind of guest.
pub fn decode_text(body: &[u8]) -> String {
    match std::str::from_utf8(body) {
        Ok(text) => text.to_owned(),
        // Byte-for-byte Latin-1: each byte becomes the scalar with the same value.
        Err(_) => body.iter().map(|&b| b as char).collect(),
    }
}
