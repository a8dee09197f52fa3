pub mod commands;
pub mod config;
pub mod identity;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use nft_options_sdk::{NostrIdentity, NostrOptionService, OptionsNode};

use config::AppConfig;
use state::AppStateManager;

const DATA_DIR_ENV: &str = "NFT_OPTIONS_DATA_DIR";
const DEFAULT_DATA_DIR: &str = ".nft-options";

// ============================================================================
// Setup
// ============================================================================

/// Install the global logger. `RUST_LOG` overrides the defaults.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("nostr_relay_pool", log::LevelFilter::Warn)
        .filter_module("nostr_sdk", log::LevelFilter::Warn)
        .filter_module("tungstenite", log::LevelFilter::Warn)
        .filter_module("tokio_tungstenite", log::LevelFilter::Warn)
        .filter_module("rustls", log::LevelFilter::Warn)
        .try_init();
}

/// Data directory: `$NFT_OPTIONS_DATA_DIR`, or `.nft-options` in the
/// working directory.
pub fn data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

// ============================================================================
// Entry point
// ============================================================================

/// Load config and identity, connect to the relays, run the initial load and
/// print the resulting app state as JSON.
pub async fn run() -> Result<(), String> {
    init_logging();

    let data_dir = data_dir();
    let config = AppConfig::load(&data_dir);
    if !AppConfig::path(&data_dir).exists() {
        log::info!("First launch detected - writing default config");
        config
            .save(&data_dir)
            .map_err(|e| format!("failed to write default config: {e}"))?;
    }

    let keys = identity::load_or_generate_keys(&data_dir).map_err(|e| e.to_string())?;
    let service = NostrOptionService::connect(keys.clone(), config.discovery_config())
        .await
        .map_err(|e| e.to_string())?;
    let node = OptionsNode::new(Arc::new(service), Arc::new(NostrIdentity::new(keys)));
    let manager = AppStateManager::new(node);

    let result = commands::initialize(&manager).await;
    manager.node().service().disconnect().await;
    let state = result?;

    log::info!(
        "wallet {} sees {} options",
        state.address_label,
        state.options.as_ref().map_or(0, |o| o.len())
    );
    let json =
        serde_json::to_string_pretty(&state).map_err(|e| format!("failed to serialize: {e}"))?;
    println!("{json}");
    Ok(())
}
