//! 📅 Partitions — turning an input key into a year/month/day output address.
//!
//! 🎬 *[a key arrives: `raw/year=2024/month=01/day=15/data.json.gz`]*
//! *[the deriver squints. it has seen keys with less structure. far less.]*
//!
//! 🧠 Knowledge graph:
//! - **Happy path**: the substring after the first `raw/` carries the three
//!   partition directories verbatim. We trust them. No validation of the
//!   `name=value` shape — the upstream layout owns that contract.
//! - **Fallback**: no `raw/` marker, or fewer than three segments → today's
//!   UTC date, zero-padded. The fallback never fails. That's the whole point
//!   of a fallback. A fallback that fails is just a second bug.
//!
//! Ancient proverb: "He who validates partition names he did not mint,
//! re-partitions in production." 🦆

use chrono::{Datelike, Utc};

/// 📦 A (year, month, day) triple of path segments, each already in
/// `name=value` form, ready to be glued into an output key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionKey {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl PartitionKey {
    /// 🔑 Render the full output object key for this partition.
    ///
    /// `processed/<year>/<month>/<day>/part-<invocation_id>.json` — the
    /// invocation id keeps concurrent invocations writing to the same
    /// partition from overwriting each other. Sharing a partition is fine.
    /// Sharing a key is a data-loss incident with extra steps.
    pub fn object_key(&self, invocation_id: &str) -> String {
        format!(
            "processed/{}/{}/{}/part-{}.json",
            self.year, self.month, self.day, invocation_id
        )
    }

    /// 📅 Today's UTC date as a partition triple. The universal fallback.
    pub fn today_utc() -> Self {
        let now = Utc::now();
        Self {
            year: format!("year={:04}", now.year()),
            month: format!("month={:02}", now.month()),
            day: format!("day={:02}", now.day()),
        }
    }
}

/// 🗺️ Derive the output partition triple from the input object key.
///
/// Takes the substring after the first `raw/`, splits on `/` keeping at most
/// four pieces, and lifts the first three verbatim. Anything short of that —
/// no marker, too few segments — falls back to [`PartitionKey::today_utc`].
/// This function never fails. It barely even hesitates.
pub fn derive(key: &str) -> PartitionKey {
    if let Some((_, suffix)) = key.split_once("raw/") {
        let mut parts = suffix.splitn(4, '/');
        if let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) {
            return PartitionKey {
                year: year.to_owned(),
                month: month.to_owned(),
                day: day.to_owned(),
            };
        }
    }
    PartitionKey::today_utc()
}
