//! 📂 Previously, on "Things That Could Go Wrong With A File"...
//!
//! The disk was quiet. Too quiet. A lone process had been tasked with
//! reading an object — just bytes at a path, they said. Simple, they said.
//!
//! The file didn't exist. The parent directory didn't exist either. The
//! permissions were set by someone who really, truly, did not want this
//! file to be read. We respect their energy. We do not respect their ACLs.
//!
//! This module maps the object-store abstraction onto a local directory:
//! `(bucket, key)` lives at `<root>/<bucket>/<key>`. Each object is one file,
//! read whole and written whole — no streaming, because every payload in this
//! pipeline is a bounded, already-delivered blob.
//!
//! 🚰 get → tokio::fs::read  💀 put → create_dir_all + tokio::fs::write
//! 🦆 (mandatory, no notes)

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;
use tracing::trace;

use crate::backends::ObjectStore;

/// 🔧 Where the fake buckets live.
#[derive(Debug, Deserialize, Clone)]
pub struct FileStoreConfig {
    /// 📁 Root directory. Buckets become subdirectories. Keys become paths.
    pub root: String,
}

/// 📂 A directory pretending to be an object store, and honestly doing fine.
///
/// `tokio::fs::write` truncates on overwrite — same semantics as a real
/// object store's put. No warning. No backup. Just gone. The invocation id
/// in the output key is what keeps this from being a problem.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(config: FileStoreConfig) -> Self {
        Self { root: PathBuf::from(config.root) }
    }

    fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        // Keys contain '/' on purpose — they become real subdirectories here.
        self.root.join(bucket).join(key)
    }
}

#[async_trait]
impl ObjectStore for FileStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(bucket, key);
        trace!("📥 reading object from {}", path.display());
        fs::read(&path).await.with_context(|| {
            format!(
                "💀 Could not read object '{bucket}/{key}' from '{}'. \
                 We stared at the path. The path stared back. \
                 One of us was wrong about whether the file existed.",
                path.display()
            )
        })
    }

    async fn put(&mut self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        let path = self.object_path(bucket, key);
        if let Some(parent) = path.parent() {
            // Partition directories won't exist on first write of the day.
            fs::create_dir_all(parent).await.with_context(|| {
                format!(
                    "💀 Could not conjure the partition directory '{}' into existence",
                    parent.display()
                )
            })?;
        }
        trace!("📤 writing {} bytes to {}", body.len(), path.display());
        fs::write(&path, body).await.with_context(|| {
            format!(
                "💀 Could not write object '{bucket}/{key}' to '{}'. \
                 The bytes were ready. The disk was not.",
                path.display()
            )
        })
    }
}
