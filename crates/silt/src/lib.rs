//! 🏞️ silt — where messy upstream payloads settle into tidy NDJSON sediment.
//!
//! One notification in, one date-partitioned object out. No state survives
//! the invocation. The pipeline forgets you the moment it returns. 🦆

pub mod app_config;
pub mod backends;
pub mod common;
pub mod decode;
pub mod normalize;
pub mod parse;
pub mod partitions;
pub mod pipeline;

use anyhow::{Context, Result};

use crate::app_config::AppConfig;
use crate::backends::StoreBackend;
use crate::common::{Ack, Event};

/// 🚀 Wire up the store from config and run the whole event through the pipeline.
///
/// This is the front door for the CLI (and anyone else holding an [`AppConfig`]
/// and an [`Event`]). The `invocation_id` is the caller's unique token for this
/// run — it ends up in every output key, keeping concurrent invocations from
/// stomping on each other's objects.
pub async fn run(config: AppConfig, event: Event, invocation_id: &str) -> Result<Ack> {
    let mut store = StoreBackend::from_config(&config.store)
        .context("💀 Failed to stand up the object store backend from config")?;
    pipeline::handle_event(&event, invocation_id, &config, &mut store).await
}
