//! 🔧 App Configuration — the sacred TOML-to-struct pipeline.
//!
//! 📡 "Config not found: We looked everywhere. Under the couch. Behind the
//! fridge. In the junk drawer. Nothing." — every developer at 3am 🦆
//!
//! 🏗️ Powered by Figment, because manually parsing env vars is a form of
//! self-harm that even the borrow checker wouldn't approve of.

use std::path::Path;

use anyhow::Context;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use tracing::info;

use crate::backends::{FileStoreConfig, HttpStoreConfig};

/// 📦 The AppConfig: one struct to rule them all, one struct to find them,
/// one struct to bring them all, and in the Figment bind them.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// 🪣 Destination bucket for processed output. Defaults to the empty
    /// string when unset — which is not a silent success story: the first
    /// put will fail and the invocation fails with it. Loudly. By contract.
    #[serde(default)]
    pub processed_bucket: String,
    /// 🗄️ Which object store backs both the reads and the writes.
    pub store: StoreConfig,
}

/// 🎭 Which store shall it be? Configurable, unlike my children.
#[derive(Debug, Deserialize, Clone)]
pub enum StoreConfig {
    /// 📦 RAM. For tests. You know it's for tests. I know it's for tests.
    InMemory,
    /// 📂 A local directory cosplaying as an object store.
    File(FileStoreConfig),
    /// 📡 An S3-compatible gateway, reached over HTTP.
    Http(HttpStoreConfig),
}

/// 🚀 Load the config — from env vars, an optional TOML file, or the sheer power of hoping.
///
/// 🔧 Merges environment variables (SILT_*) with an optional TOML file.
/// All SILT_ vars are fair game. We don't gatekeep env vars here.
///
/// 📐 DESIGN NOTE (no cap, this is tribal knowledge):
///   - If `config_file_name` is None  → env vars only. No file. No assumptions.
///   - If `config_file_name` is Some  → env vars + TOML file, merged. TOML wins on conflicts.
///
/// 💀 Returns an error if config is unparseable. Which it will be. Check the
/// error message though — it's contextual, informative, and written with love.
/// Or despair. Hard to tell at 3am.
pub fn load_config(config_file_name: Option<&Path>) -> anyhow::Result<AppConfig> {
    info!(
        "🔧 Loading configuration: {:#?}",
        config_file_name.unwrap_or(Path::new(""))
    );

    // 🏗️ Env vars are the base layer — like a good sourdough starter.
    let config = Figment::new().merge(Env::prefixed("SILT_"));

    // 🎯 Layer in TOML only if a file was actually provided.
    let config = match config_file_name {
        Some(file_name) => config.merge(Toml::file(file_name)),
        None => config,
    };

    let context_msg = match config_file_name {
        Some(path) => format!(
            "💀 Failed to parse configuration from file '{}' and environment variables (SILT_*). \
             The file exists in our hearts, but apparently not on disk.",
            path.display()
        ),
        None => "💀 Failed to parse configuration from environment variables (SILT_*). \
                 No file was provided — this one's all on the environment. Classic."
            .to_string(),
    };

    config.extract().context(context_msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn write_test_config(contents: &str) -> std::path::PathBuf {
        let timestamp_of_questionable_life_choices = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("💀 Clock went backwards. Time is a flat bug report.")
            .as_nanos();
        let temp_path = std::env::temp_dir().join(format!(
            "silt_app_config_{timestamp_of_questionable_life_choices}.toml"
        ));

        // 🧪 We write a real file here because Figment wants TOML from disk, like it's method acting.
        fs::write(&temp_path, contents)
            .expect("💀 Failed to write test config. The filesystem said 'new phone who dis'.");
        temp_path
    }

    #[test]
    fn the_one_where_a_file_store_config_parses() {
        let config_path = write_test_config(
            r#"
            processed_bucket = "processed"

            [store.File]
            root = "/var/lib/silt"
            "#,
        );

        let app_config = load_config(Some(config_path.as_path()))
            .expect("💀 File store config should parse. The schema drift goblin does not get this win.");

        assert_eq!(app_config.processed_bucket, "processed");
        match app_config.store {
            StoreConfig::File(file_config) => assert_eq!(file_config.root, "/var/lib/silt"),
            honestly_who_knows => panic!(
                "💀 Expected a File store config, but serde took us to {honestly_who_knows:?}. Plot twist energy."
            ),
        }

        fs::remove_file(config_path)
            .expect("💀 Failed to remove test config. Even the trash has trust issues.");
    }

    #[test]
    fn the_one_where_an_http_store_brings_its_token() {
        let config_path = write_test_config(
            r#"
            processed_bucket = "processed"

            [store.Http]
            endpoint = "http://gateway:9000"
            token = "sesame"
            "#,
        );

        let app_config = load_config(Some(config_path.as_path()))
            .expect("💀 Http store config should parse");

        match app_config.store {
            StoreConfig::Http(http_config) => {
                assert_eq!(http_config.endpoint, "http://gateway:9000");
                assert_eq!(http_config.token.as_deref(), Some("sesame"));
            }
            honestly_who_knows => panic!("💀 Expected an Http store config, got {honestly_who_knows:?}"),
        }

        fs::remove_file(config_path).expect("💀 Failed to remove test config.");
    }

    #[test]
    fn the_one_where_the_processed_bucket_defaults_to_empty() {
        // 🧪 Absent bucket → empty string. The put will fail later, loudly,
        // exactly as designed. The config layer does not editorialize.
        let config_path = write_test_config(
            r#"
            store = "InMemory"
            "#,
        );

        let app_config = load_config(Some(config_path.as_path()))
            .expect("💀 Bucketless config should still parse");

        assert_eq!(app_config.processed_bucket, "");
        assert!(matches!(app_config.store, StoreConfig::InMemory));

        fs::remove_file(config_path).expect("💀 Failed to remove test config.");
    }
}
