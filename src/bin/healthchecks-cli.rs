use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use auto_healthchecks::config::load_settings;
use auto_healthchecks::health::Healthcheck;
use auto_healthchecks::observability::logging;
use auto_healthchecks::routing::RouteTable;
use auto_healthchecks::sync::HealthcheckClient;

#[derive(Parser)]
#[command(name = "healthchecks-cli")]
#[command(about = "Batch create or update healthchecks outside the application", long_about = None)]
struct Cli {
    /// Settings file (same format as the application's).
    #[arg(short, long, default_value = "healthchecks.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a batch of healthchecks defined with explicit paths
    Sync {
        /// TOML file with one `[[healthcheck]]` table per check
        #[arg(short, long)]
        batch: PathBuf,

        /// Build and log the payload without calling the API
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Deserialize)]
struct BatchFile {
    #[serde(default)]
    healthcheck: Vec<Healthcheck>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;
    logging::init(&settings.observability.log_level);

    match cli.command {
        Commands::Sync { batch, dry_run } => {
            let content = std::fs::read_to_string(&batch)?;
            let batch: BatchFile = toml::from_str(&content)?;

            if dry_run {
                settings.healthchecks.api_key = None;
                settings.api_key = None;
            }

            let client = HealthcheckClient::new(settings);
            let report = client.put(&RouteTable::new(), batch.healthcheck).await?;

            if dry_run {
                println!("{}", serde_json::to_string_pretty(&report.payload)?);
            }
            if report.has_errors() && !dry_run {
                for diagnostic in &report.diagnostics {
                    eprintln!("{}", diagnostic);
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
