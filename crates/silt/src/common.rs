//! 📦 Common data structures — the building blocks of silt.
//!
//! 🎬 COLD OPEN — INT. OBJECT STORE — 3:47 AM
//!
//! A notification arrives. It is JSON. It is nested four levels deep to tell
//! us two strings: a bucket and a key. Somewhere, a committee is very proud
//! of this schema. We unwrap it here so nobody else has to look at it.
//!
//! 🦆
//!
//! This module defines the humble yet load-bearing structs that describe what
//! arrived and what we say when we're done. They don't ask questions. They
//! carry the coordinates. They are the envelope, not the letter.

use serde::{Deserialize, Serialize};

/// 📬 One invocation's worth of notifications, in arrival order.
///
/// Deserializes straight from the storage provider's event JSON, which wraps
/// everything in a `Records` array because naming it `records` would have
/// been too easy. Missing `Records` means an empty batch, not an error —
/// an invocation with nothing to do is still a successful invocation.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Event {
    /// 📦 The ordered collection of notifications. Processed sequentially,
    /// one object fully handled before the next begins. No races. No drama.
    #[serde(rename = "Records", default)]
    pub records: Vec<Notification>,
}

/// 📨 A single "an object showed up" notification.
///
/// The provider's shape is `{"s3":{"bucket":{"name":...},"object":{"key":...}}}`.
/// Four levels of nesting for two strings. We keep the shape for serde and
/// offer [`Notification::bucket`] / [`Notification::key`] so the rest of the
/// crate never has to spelunk.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

impl Notification {
    /// 🪣 The source bucket name, minus three layers of JSON bureaucracy.
    pub fn bucket(&self) -> &str {
        &self.s3.bucket.name
    }

    /// 🔑 The source object key. The star of partition derivation, later.
    pub fn key(&self) -> &str {
        &self.s3.object.key
    }
}

/// ✅ The handler's parting words: `{"status":"ok"}`.
///
/// Returned only after every notification in the batch has been fully
/// processed. There is no partial-success variant — a failed notification
/// aborts the invocation before this struct is ever born.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Ack {
    pub status: String,
}

impl Ack {
    pub fn ok() -> Self {
        Self { status: "ok".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_one_where_the_provider_event_shape_deserializes() {
        // 🧪 Four levels of nesting go in, two strings come out. Fair trade.
        let raw = r#"{
            "Records": [
                {"s3": {"bucket": {"name": "landing"}, "object": {"key": "raw/year=2024/month=01/day=15/data.json.gz"}}},
                {"s3": {"bucket": {"name": "landing"}, "object": {"key": "raw/other.json"}}}
            ]
        }"#;
        let event: Event = serde_json::from_str(raw).expect("event shape should deserialize");
        assert_eq!(event.records.len(), 2);
        assert_eq!(event.records[0].bucket(), "landing");
        assert_eq!(event.records[0].key(), "raw/year=2024/month=01/day=15/data.json.gz");
    }

    #[test]
    fn the_one_where_records_is_missing_and_nobody_panics() {
        // 🧪 No Records field → empty batch. An invocation about nothing. 🦆
        let event: Event = serde_json::from_str("{}").expect("empty event should deserialize");
        assert!(event.records.is_empty());
    }

    #[test]
    fn the_one_where_the_ack_says_ok_and_means_it() {
        let ack = Ack::ok();
        assert_eq!(serde_json::to_string(&ack).expect("ack serializes"), r#"{"status":"ok"}"#);
    }
}
