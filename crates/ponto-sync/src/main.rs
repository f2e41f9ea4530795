//! ponto-sync binary — acquisition and publication entry points.

use anyhow::Result;
use clap::{Parser, Subcommand};

use ponto_sync::config::{PortalConfig, SheetsConfig};

#[derive(Parser)]
#[command(
    name = "ponto-sync",
    about = "Pontomais audit report automation — export the report, then publish it to Google Sheets",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the audit report from the portal into the working directory.
    Acquire,
    /// Publish the newest downloaded report to the destination worksheet.
    Publish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Acquire => {
            let config = PortalConfig::from_env()?;
            ponto_sync::acquire::run(&config).await?;
        }
        Commands::Publish => {
            let config = SheetsConfig::from_env()?;
            ponto_sync::publish::run(&config).await?;
        }
    }

    Ok(())
}
