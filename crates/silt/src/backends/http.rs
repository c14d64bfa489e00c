//! 📡 The HTTP backend — objects that live on someone else's computer.
//!
//! 🎬 *[a GET request leaves the building. the building holds its breath.]*
//!
//! Speaks path-style S3-compatible: `GET/PUT {endpoint}/{bucket}/{key}`.
//! Auth is a single optional bearer token — the gateway in front of the
//! store owns the real credential ceremony; we just present the badge.
//!
//! 🧠 Knowledge graph:
//! - One `reqwest::Client` per store, reused across requests. Connection
//!   pooling is the whole reason the client exists. Respect the pool.
//! - Non-2xx statuses are errors, full stop. A 404 on get means the
//!   notification pointed at a ghost. A 403 on put means the destination
//!   bucket config is wrong (or empty — see `processed_bucket`'s default).
//!   Either way it propagates and the invocation fails loudly.
//! - Timeouts: 10s connect, 30s request. Like a polite person — we will
//!   wait, but not forever.
//!
//! 🦆 (the duck is stored at `{endpoint}/ponds/duck.json`. status: 200.)

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::backends::ObjectStore;

/// 🔧 Where the gateway lives and how to greet it.
#[derive(Debug, Deserialize, Clone)]
pub struct HttpStoreConfig {
    /// 📡 Base URL of the gateway. Include scheme + port. Yes, all of it.
    /// No, `localhost` alone is not enough. Yes, I know it worked in dev.
    pub endpoint: String,
    /// 🔒 Optional bearer token. If this is in plaintext in your config file,
    /// I've already filed a complaint with the Department of Security Choices.
    #[serde(default)]
    pub token: Option<String>,
}

/// 📡 An object store reached over HTTP, path-style.
#[derive(Debug)]
pub struct HttpStore {
    client: reqwest::Client,
    config: HttpStoreConfig,
}

impl HttpStore {
    /// 🚀 Build the client and stand up the store. No connectivity ping here —
    /// the first get will find out soon enough, and its error says more than
    /// a ping's would.
    pub fn new(config: HttpStoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .context(
                "💀 The HTTP client refused to be born. Probably a missing TLS cert \
                 or a cursed system OpenSSL. Either way: tragic.",
            )?;
        Ok(Self { client, config })
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{bucket}/{key}", self.config.endpoint.trim_end_matches('/'))
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ObjectStore for HttpStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let url = self.object_url(bucket, key);
        debug!("📥 GET {url}");
        let response = self
            .with_auth(self.client.get(&url))
            .send()
            .await
            .with_context(|| format!("💀 GET {url} never even got a status code. Check connectivity. Check the gateway. Check your horoscope."))?;
        let status = response.status();
        if !status.is_success() {
            bail!("💀 GET {url} answered {status} — the object is missing, forbidden, or having a bad day");
        }
        let body = response
            .bytes()
            .await
            .with_context(|| format!("💀 GET {url} died mid-body. The headers made promises the connection couldn't keep."))?;
        Ok(body.to_vec())
    }

    async fn put(&mut self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        let url = self.object_url(bucket, key);
        debug!("📤 PUT {url} ({} bytes)", body.len());
        let response = self
            .with_auth(self.client.put(&url))
            .body(body)
            .send()
            .await
            .with_context(|| format!("💀 PUT {url} left the building and never called back"))?;
        let status = response.status();
        if !status.is_success() {
            bail!(
                "💀 PUT {url} answered {status} — if the bucket segment looks empty, \
                 the destination bucket config probably is too"
            );
        }
        Ok(())
    }
}
