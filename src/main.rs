//! Forefront - Multi-step AI orchestration
//!
//! CLI entry point for the Forefront server and tools.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

mod api;
mod cli;
mod server;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = server::load_config()?;
    let _guard = server::init_logging(&config.logging)?;

    let cli = cli::Cli::parse();

    if cli.command.is_some() {
        info!("Starting Forefront v{}", env!("CARGO_PKG_VERSION"));

        if !std::path::Path::new(".env").exists() {
            warn!(".env file not found; provider keys must come from the environment");
        }
    }

    cli::run(cli, config).await
}
