//! 🔌 Backends — where the real I/O happens.
//!
//! 🚰 The store is both the faucet and the drain: objects are fetched from it
//! on notification and deposited back into it, date-partitioned, when the
//! pipeline is done. Everything between those two calls is pure.
//!
//! 🎭 This module is the casting agency. Need bytes from RAM? From disk?
//! From an S3-compatible gateway across the wire? We've got a backend for
//! that. We have more backends than the DMV has forms, and ours are faster.
//!
//! 🧠 Knowledge graph:
//! - Pattern: trait → concrete impls → enum dispatcher → `from_config` resolver.
//! - The store does I/O. Just I/O. GET bytes, PUT bytes. No parsing, no
//!   decompression, no opinions about content. Those live upstream in
//!   `decode` and `parse`, where opinions belong.
//! - Store errors are the ONLY errors the core doesn't recover from: they
//!   propagate and abort the rest of the invocation's notifications. Fail-fast.
//!
//! 🦆 The duck is here because every file must have one. This is law.

use anyhow::Result;
use async_trait::async_trait;

pub mod file;
pub mod http;
pub mod in_mem;

pub use file::{FileStore, FileStoreConfig};
pub use http::{HttpStore, HttpStoreConfig};
pub use in_mem::InMemoryStore;

use crate::app_config::StoreConfig;

/// 🗄️ An object store: durable-ish bytes, addressed by (bucket, key).
///
/// # Contract 📜
/// - `get` returns the object's raw bytes, uninterpreted. A missing object is
///   an `Err`, not an `Ok(empty)` — a notification for an object that isn't
///   there is a transport problem, and transport problems fail loudly.
/// - `put` stores bytes at (bucket, key), overwriting whatever was there.
///   Overwrite-on-collision is intentional: the invocation id in the key is
///   what prevents collisions between concurrent invocations.
/// - Neither method retries. Retry policy belongs to whoever invoked us.
#[async_trait]
pub trait ObjectStore: std::fmt::Debug {
    /// 📥 Fetch the raw bytes at (bucket, key).
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
    /// 📤 Store bytes at (bucket, key), overwriting if present.
    async fn put(&mut self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()>;
}

/// 🎭 The many faces of an object store — a polymorphic casting call.
///
/// Each variant wraps a concrete store. The enum dispatches `get`/`put` via
/// a match, so the pipeline never knows (or cares) whether objects live in
/// RAM, on disk, or behind an HTTP gateway having a bad day.
///
/// Ancient proverb: "He who hardcodes the backend, rewrites it for the tests."
#[derive(Debug)]
pub enum StoreBackend {
    InMemory(InMemoryStore),
    File(FileStore),
    Http(HttpStore),
}

impl StoreBackend {
    /// 🔧 Resolve a live store from its config variant.
    ///
    /// | StoreConfig | Backend | Lives in |
    /// |---|---|---|
    /// | InMemory | InMemoryStore | the heap, briefly |
    /// | File | FileStore | `<root>/<bucket>/<key>` |
    /// | Http | HttpStore | someone else's computer |
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Ok(match config {
            StoreConfig::InMemory => Self::InMemory(InMemoryStore::new()),
            StoreConfig::File(file_config) => Self::File(FileStore::new(file_config.clone())),
            StoreConfig::Http(http_config) => Self::Http(HttpStore::new(http_config.clone())?),
        })
    }
}

#[async_trait]
impl ObjectStore for StoreBackend {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        match self {
            StoreBackend::InMemory(store) => store.get(bucket, key).await,
            StoreBackend::File(store) => store.get(bucket, key).await,
            StoreBackend::Http(store) => store.get(bucket, key).await,
        }
    }

    async fn put(&mut self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        match self {
            StoreBackend::InMemory(store) => store.put(bucket, key, body).await,
            StoreBackend::File(store) => store.put(bucket, key, body).await,
            StoreBackend::Http(store) => store.put(bucket, key, body).await,
        }
    }
}
