//! # DAODash
//!
//! Command-line front end for the favorited-DAO cache.

use clap::Parser;
use daodash_app::app::{execute, Command};
use daodash_app::di::build_favorites_app;
use daodash_app::startup::{bootstrap, print_startup_info};
use daodash_config::StorageBackend;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "daodash", about = "Manage favorited DAOs", version)]
struct Cli {
    /// Directory holding `default.toml` and per-environment overrides.
    #[arg(long, default_value = "./config")]
    config_dir: String,

    /// Use the in-memory backend regardless of configuration.
    #[arg(long)]
    memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = bootstrap(&cli.config_dir)?;
    if cli.memory {
        config.storage.backend = StorageBackend::Memory;
    }

    info!("Starting DAODash v{}", env!("CARGO_PKG_VERSION"));
    print_startup_info(&config);

    let app = build_favorites_app(&config).await?;
    let result = execute(app.service(), cli.command).await;
    app.shutdown().await;
    println!("{}", result?);

    Ok(())
}
