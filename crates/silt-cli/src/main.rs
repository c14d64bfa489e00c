//! 🚀 silt-cli — the front door, the bouncer, the maitre d' of silt.
//!
//! 🎬 *[narrator voice]* "It all started with a simple main() function..."
//! 📦 This binary crate is the thin CLI wrapper that loads config, reads the
//! event JSON, mints an invocation id, and then lets the real code do the
//! heavy lifting. Like a manager. 🦆

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 🚀 main() — where it all begins. The genesis. The big bang.
///
/// 🔧 Steps:
/// 1. Init tracing (so we can see what goes wrong, and when)
/// 2. Parse args: `silt-cli <event.json> [config.toml]`
/// 3. Load config (the moment of truth)
/// 4. Run the pipeline (send it and pray 🙏)
/// 5. Handle errors (cry)
#[tokio::main]
async fn main() -> Result<()> {
    // 📡 Set up tracing — because println! debugging is a lifestyle choice
    // we're trying to move past, like flip phones and cargo shorts
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let event_path = args.get(1).context(
        "💀 Usage: silt-cli <event.json> [config.toml] — the event file is not optional. \
         An ETL step with nothing to E is just a T-L, and nobody knows what that is.",
    )?;
    let config_arg = args.get(2).map(String::as_str).unwrap_or("silt.toml"); // 🔧 default: the ol' reliable

    // 🔒 Validate the config file exists before we get too emotionally attached
    let config_file = std::path::Path::new(config_arg);
    let config_file_path_which_is_validated_to_exist = match config_file.try_exists()
        .context(format!("💀 Configuration file may not exist, couldn't find it. Double check that it exists, or maybe, it's an issue with pwd/cwd and relative paths. In that case, use an absolute path, to be absolutely certain, you are not messing this up. Was checking here: '{}'", config_file.display()))
    /* ? */ ? // ⚠️ Unwrap this, maybe — like unwrapping a gift that might be socks
    {
        true => Some(config_file),  // ✅ Found it! Better than finding my car keys
        false => None               // 💤 Not there. Env vars only, then. SILT_ or bust.
    };

    let app_config = silt::app_config::load_config(config_file_path_which_is_validated_to_exist)
        .context("💀 In silt-cli, main, we couldn't load the config. Take a look at the file and the SILT_ env vars, make sure you didn't forget something obvious, dumas")?;

    // 📬 Read and parse the event — the provider's four-layers-deep JSON envelope
    let event_raw = std::fs::read_to_string(event_path)
        .context(format!("💀 Couldn't read the event file at '{event_path}'. It was there a minute ago, I swear."))?;
    let event: silt::common::Event = serde_json::from_str(&event_raw)
        .context("💀 The event file exists but does not deserialize. Check that it's the provider's notification shape, Records and all.")?;

    // 🎫 Mint an invocation id — unique per run so concurrent invocations
    // writing to the same partition never fight over a key.
    let invocation_id = format!(
        "{:x}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("💀 Clock went backwards. Time is a flat bug report.")?
            .as_nanos()
    );
    info!("🎫 invocation id: {invocation_id}");

    // 🚀 SEND IT. No take-backs. This is not a drill.
    let result = silt::run(app_config, event, &invocation_id).await;

    // 💀 Error handling: the part where we find out what went wrong
    // and print it in a way that's helpful at 3am
    if let Err(err) = result {
        error!("💀 error: {}", err);
        // -- 🧅 peel the onion of sadness, one tear-jerking layer at a time
        let mut the_vibes_are_giving_connection_issues = false;
        for cause in err.chain().skip(1) {
            error!("⚠️  cause: {}", cause);
            // -- 🕵️ sniff the cause like a truffle pig hunting for connection problems
            let cause_str = cause.to_string();
            if cause_str.contains("error sending request")
                || cause_str.contains("connection refused")
                || cause_str.contains("Connection refused")
                || cause_str.contains("tcp connect error")
                || cause_str.contains("dns error")
            {
                the_vibes_are_giving_connection_issues = true;
            }
        }

        // -- 📡 if it smells like a connection problem, it's probably a connection problem
        if the_vibes_are_giving_connection_issues {
            error!(
                "🔧 hint: looks like the object-store gateway isn't reachable. \
                Double-check the [store.Http] endpoint in your config, and that \
                the gateway is actually running. If you're using Docker, try: \
                `docker ps` to see what's up, or `docker compose up -d` to resurrect it. \
                Even gateways need a nudge sometimes. ☕"
            );
        }

        // 🗑️ Exit with prejudice. Process exitus maximus.
        std::process::exit(1);
    }

    // ✅ If we got here, every notification landed. Pop the champagne. 🍾
    info!("✅ {{\"status\":\"ok\"}} — all notifications processed");
    Ok(())
}
