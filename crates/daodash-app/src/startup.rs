//! Application startup utilities.

use daodash_config::{AppConfig, ConfigLoader};
use daodash_core::{init_tracing, DaodashResult};
use tracing::info;

/// Loads configuration from `config_dir` and installs the tracing subscriber.
pub fn bootstrap(config_dir: &str) -> DaodashResult<AppConfig> {
    let config = ConfigLoader::new(config_dir)?.into_config();
    init_tracing(&config.observability.tracing())?;
    Ok(config)
}

/// Logs the effective configuration.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("{} v{} ({})", config.app.name, config.app.version, config.app.environment);
    info!("Storage:     {} {}", config.storage.backend, config.storage.url);
    info!("Page size:   {}", config.query.infinite_page_size);
    match config.query.stale_time_secs {
        Some(secs) => info!("Stale time:  {}s", secs),
        None => info!("Stale time:  until invalidated"),
    }
    info!("IPFS:        {} / {}", config.ipfs.gateway, config.ipfs.testnet_gateway);
    info!("{}", separator);
}
