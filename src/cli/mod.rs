//! CLI module for Forefront
//!
//! Provides commands:
//! - `serve`: Start the HTTP server
//! - `classify`: Print the enhanced intent and semantics of a query
//! - `plan`: Print the workflow that would be built for a query
//! - `run`: Execute a query end to end against the configured backend

use crate::server::config::AppConfig;
use clap::{Parser, Subcommand};

pub mod inspect;
pub mod run;

/// Forefront orchestration CLI
#[derive(Parser, Debug)]
#[command(name = "forefront")]
#[command(about = "Multi-step AI orchestration engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server
    Serve,
    /// Classify a query and print its intent and semantics as JSON
    Classify {
        /// The request text
        query: String,
    },
    /// Print the workflow planned for a query as JSON
    Plan {
        /// The request text
        query: String,
    },
    /// Run a query through the orchestrator
    Run {
        /// The request text
        query: String,
        /// Preferred model for every step
        #[arg(long)]
        model: Option<String>,
        /// Caller identity recorded in traces
        #[arg(long, default_value = "cli")]
        user: String,
        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve) => crate::server::run(config).await,
        Some(Commands::Classify { query }) => inspect::classify(&query),
        Some(Commands::Plan { query }) => inspect::plan(&query),
        Some(Commands::Run {
            query,
            model,
            user,
            json,
        }) => {
            let options = run::RunOptions {
                query,
                model,
                user,
                json,
            };
            run::run(&config, options).await
        }
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
