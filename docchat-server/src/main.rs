#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(clippy::pedantic)]

//! Main entry point for the `DocChat` server CLI.

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::config::server::Config;
use std::path::PathBuf;

/// Main CLI structure for the `DocChat` server
#[derive(Debug, Parser)]
#[command(name = "docchat-server")]
#[command(about = "Backend server for the DocChat web client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for the `DocChat` CLI
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the backend server
    Serve {
        /// Port to bind, overriding the configuration file and environment
        #[arg(long, short)]
        port: Option<u16>,

        /// Path to a YAML or JSON configuration file; defaults are used when omitted
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

/// Loads configuration and runs the server until shutdown.
///
/// # Errors
/// Returns an error if configuration loading or the server fails.
pub async fn handle_serve_command(port: Option<u16>, config: Option<PathBuf>) -> anyhow::Result<()> {
    let resolved_config = Config::load_config(config, port)?;
    server::server::run(resolved_config).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, config } => handle_serve_command(port, config).await,
    }
}
