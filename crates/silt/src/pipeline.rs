//! 🎬 *[the notifications are queued. the store is listening. someone must drive.]*
//!
//! 🚗 The Pipeline module — the single-pass driver that takes each
//! notification from arrival to deposit: acquire → decompress → decode →
//! parse → derive partitions → normalize → sink. Then the next one. Then done.
//!
//! 🧠 Knowledge graph:
//! - **Strictly sequential**: one object fully handled before the next
//!   begins. No worker pool, no channels, no shared mutable state between
//!   notifications. The payloads are bounded and already delivered; the
//!   pipeline's job is correctness, not throughput heroics.
//! - **Fail-fast**: a store error (get or put) aborts the remaining
//!   notifications in the batch. There is no partial-success ledger — the
//!   hosting driver sees one failed invocation and acts on that.
//! - **Parsing cannot be the thing that fails.** `robust_parse` is total.
//!   If an invocation dies, the store did it. It's always the store.
//!
//! 🦆 (the duck rides shotgun. the duck does not touch the radio.)

use anyhow::{Context, Result};
use tracing::info;

use crate::app_config::AppConfig;
use crate::backends::{ObjectStore, StoreBackend};
use crate::common::{Ack, Event};
use crate::{decode, normalize, parse, partitions};

/// 👀 How much decoded text makes it into the per-object log line.
const LOG_PREVIEW_CHARS: usize = 120;

/// 🚗 Process every notification in the event, in order, then acknowledge.
///
/// The `invocation_id` is a caller-supplied unique token for this run; it is
/// stamped into every output key so concurrent invocations landing in the
/// same partition never collide.
pub async fn handle_event(
    event: &Event,
    invocation_id: &str,
    config: &AppConfig,
    store: &mut StoreBackend,
) -> Result<Ack> {
    for notification in &event.records {
        process_notification(notification.bucket(), notification.key(), invocation_id, config, store)
            .await
            .with_context(|| {
                format!(
                    "💀 Notification for '{}/{}' took the whole invocation down with it",
                    notification.bucket(),
                    notification.key()
                )
            })?;
    }
    Ok(Ack::ok())
}

/// One object, start to finish. Store errors propagate; nothing else can fail.
async fn process_notification(
    bucket: &str,
    key: &str,
    invocation_id: &str,
    config: &AppConfig,
    store: &mut StoreBackend,
) -> Result<()> {
    let body = store
        .get(bucket, key)
        .await
        .context("💀 Acquisition failed before a single byte was parsed")?;
    let body = decode::gunzip_if_needed(key, body)?;
    let text = decode::decode_text(&body);

    let preview: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
    info!("👀 First {LOG_PREVIEW_CHARS} chars: {}", preview.replace('\n', "\\n"));

    let records = parse::robust_parse(&text);
    info!("🧰 Parsed {} records from {key}", records.len());

    let out_key = partitions::derive(key).object_key(invocation_id);
    let payload = normalize::render_ndjson(records, &text)?;

    store
        .put(&config.processed_bucket, &out_key, payload)
        .await
        .with_context(|| {
            format!(
                "💀 Deposit of '{}/{out_key}' failed at the finish line. \
                 The records were parsed with love, the partitions were derived, \
                 and the store said 'nah.'",
                config.processed_bucket
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::StoreConfig;
    use crate::backends::InMemoryStore;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use serde_json::{Value, json};
    use std::io::Write;

    fn test_config() -> AppConfig {
        AppConfig { processed_bucket: "processed".to_string(), store: StoreConfig::InMemory }
    }

    fn event_for(keys: &[&str]) -> Event {
        let records = keys
            .iter()
            .map(|key| json!({"s3": {"bucket": {"name": "landing"}, "object": {"key": key}}}))
            .collect::<Vec<_>>();
        serde_json::from_value(json!({ "Records": records })).expect("event builds")
    }

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).expect("gzip write");
        encoder.finish().expect("gzip finish")
    }

    #[tokio::test]
    async fn the_one_where_ndjson_flows_end_to_end() {
        let handle = InMemoryStore::new();
        handle.seed("landing", "raw/year=2024/month=01/day=15/data.json", b"{\"a\":1,\"debug\":\"x\"}\n{\"b\":2}".to_vec());
        let mut store = StoreBackend::InMemory(handle.clone());

        let ack = handle_event(
            &event_for(&["raw/year=2024/month=01/day=15/data.json"]),
            "inv-1",
            &test_config(),
            &mut store,
        )
        .await
        .expect("pipeline runs");

        assert_eq!(ack, Ack::ok());
        let out = handle
            .object("processed", "processed/year=2024/month=01/day=15/part-inv-1.json")
            .expect("output deposited at the derived partition");
        assert_eq!(out, b"{\"a\":1}\n{\"b\":2}\n");
    }

    #[tokio::test]
    async fn the_one_where_a_gzipped_object_gets_inflated_first() {
        let handle = InMemoryStore::new();
        handle.seed(
            "landing",
            "raw/year=2024/month=01/day=15/data.json.gz",
            gzip(b"{\"a\":1}{\"b\":2}"),
        );
        let mut store = StoreBackend::InMemory(handle.clone());

        handle_event(
            &event_for(&["raw/year=2024/month=01/day=15/data.json.gz"]),
            "inv-2",
            &test_config(),
            &mut store,
        )
        .await
        .expect("pipeline runs");

        // Concatenated objects inside a gzip member: decompress, then strategy 3.
        let out = handle
            .object("processed", "processed/year=2024/month=01/day=15/part-inv-2.json")
            .expect("output deposited");
        assert_eq!(out, b"{\"a\":1}\n{\"b\":2}\n");
    }

    #[tokio::test]
    async fn the_one_where_pure_noise_becomes_an_unparsed_record() {
        let handle = InMemoryStore::new();
        handle.seed("landing", "raw/year=2024/month=02/day=03/noise.txt", b"not json at all".to_vec());
        let mut store = StoreBackend::InMemory(handle.clone());

        handle_event(
            &event_for(&["raw/year=2024/month=02/day=03/noise.txt"]),
            "inv-3",
            &test_config(),
            &mut store,
        )
        .await
        .expect("pipeline runs — noise is not an error");

        let out = handle
            .object("processed", "processed/year=2024/month=02/day=03/part-inv-3.json")
            .expect("fallback deposited");
        assert_eq!(out, b"{\"_unparsed\":true,\"raw\":\"not json at all\"}\n");
    }

    #[tokio::test]
    async fn the_one_where_a_missing_object_aborts_the_rest_of_the_batch() {
        // 🧪 Fail-fast: notification 1 points at a ghost, so notification 2
        // (perfectly healthy) is never processed. No partial-batch recovery.
        let handle = InMemoryStore::new();
        handle.seed("landing", "raw/year=2024/month=01/day=15/second.json", b"{\"fine\":true}".to_vec());
        let mut store = StoreBackend::InMemory(handle.clone());

        let result = handle_event(
            &event_for(&["raw/ghost.json.missing", "raw/year=2024/month=01/day=15/second.json"]),
            "inv-4",
            &test_config(),
            &mut store,
        )
        .await;

        assert!(result.is_err());
        assert!(
            handle.keys().iter().all(|(bucket, _)| bucket != "processed"),
            "no output should exist — the batch died on the first notification"
        );
    }

    #[tokio::test]
    async fn the_one_where_an_empty_event_still_acks() {
        let mut store = StoreBackend::InMemory(InMemoryStore::new());
        let ack = handle_event(&Event::default(), "inv-5", &test_config(), &mut store)
            .await
            .expect("empty batch is a successful batch");
        assert_eq!(ack, Ack::ok());
    }

    #[tokio::test]
    async fn the_one_where_a_keyless_layout_lands_in_todays_partition() {
        // 🧪 No raw/ marker → UTC-today fallback partitions in the output key.
        let handle = InMemoryStore::new();
        handle.seed("landing", "dropbox/data.json", b"{\"a\":1}".to_vec());
        let mut store = StoreBackend::InMemory(handle.clone());

        handle_event(&event_for(&["dropbox/data.json"]), "inv-6", &test_config(), &mut store)
            .await
            .expect("pipeline runs");

        let today = crate::partitions::PartitionKey::today_utc();
        let out = handle
            .object("processed", &today.object_key("inv-6"))
            .expect("output landed in today's partition");
        assert_eq!(out, b"{\"a\":1}\n");
    }

    #[tokio::test]
    async fn the_one_where_the_fallback_line_round_trips() {
        // 🧪 Deserializing the deposited fallback recovers the evidence fields.
        let handle = InMemoryStore::new();
        handle.seed("landing", "raw/year=2024/month=01/day=15/noise.txt", vec![b'z'; 6000]);
        let mut store = StoreBackend::InMemory(handle.clone());

        handle_event(
            &event_for(&["raw/year=2024/month=01/day=15/noise.txt"]),
            "inv-7",
            &test_config(),
            &mut store,
        )
        .await
        .expect("pipeline runs");

        let out = handle
            .object("processed", "processed/year=2024/month=01/day=15/part-inv-7.json")
            .expect("fallback deposited");
        let line: Value = serde_json::from_slice(&out).expect("fallback reparses");
        assert_eq!(line["_unparsed"], json!(true));
        assert_eq!(line["raw"].as_str().expect("raw").len(), crate::normalize::RAW_PREVIEW_LIMIT);
    }
}
