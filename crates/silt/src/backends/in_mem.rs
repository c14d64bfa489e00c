//! # Previously, on Silt...
//!
//! 🎬 The test needed an object store. A real one meant network calls,
//! credentials, and a cloud bill with feelings. Someone had to write a
//! backend so simple it lives entirely in RAM, gone the moment you blink.
//!
//! That someone was this module.
//!
//! `in_mem` provides an in-memory [`ObjectStore`] for tests and local
//! development. Objects live in a `HashMap` behind an `Arc<Mutex<...>>` so
//! test code can keep a cloned handle and inspect what the pipeline wrote —
//! great for assertions, great for trust issues, great for both.
//!
//! 🦆
//!
//! ⚠️ This is NOT for production. This is for tests. If you're deploying this
//! to prod, please also deploy a therapist.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::backends::ObjectStore;

/// 📦 A heap-backed object store with perfect durability until process exit.
///
/// Cloning is cheap and shares the underlying map — seed objects through one
/// handle, run the pipeline against another, assert through a third. The
/// mutex is `std::sync` because every critical section is a single map
/// operation with no await inside.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    objects: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 🌱 Plant an object for a test to find later. Like hiding Easter eggs,
    /// except the egg is bytes and the child is an assertion.
    pub fn seed(&self, bucket: &str, key: &str, body: Vec<u8>) {
        self.objects
            .lock()
            .expect("in-memory store mutex poisoned")
            .insert((bucket.to_owned(), key.to_owned()), body);
    }

    /// 🔍 Peek at a stored object without the ceremony of the trait.
    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .expect("in-memory store mutex poisoned")
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
    }

    /// 🗝️ All stored keys, sorted, for tests that want to assert on layout.
    pub fn keys(&self) -> Vec<(String, String)> {
        let mut keys: Vec<_> = self
            .objects
            .lock()
            .expect("in-memory store mutex poisoned")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        match self.object(bucket, key) {
            Some(body) => Ok(body),
            // Missing object = transport-class error, same as the real backends.
            None => bail!("💀 No such object in the in-memory store: '{bucket}/{key}'"),
        }
    }

    async fn put(&mut self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        self.seed(bucket, key, body);
        Ok(())
    }
}
