use clap::Parser;
use pgx_dash::config::Config;
use pgx_dash::{logging, tui};
use std::path::PathBuf;
use tracing::info;

/// Terminal dashboard for pharmacogenomic risk analysis of VCF files
#[derive(Debug, Parser)]
#[command(name = "pgx-dash", version, about)]
struct Cli {
    /// VCF file to preload into the upload form (validated on startup)
    #[arg(long)]
    vcf: Option<PathBuf>,

    /// Comma-separated drug names to prefill (e.g. "CODEINE,WARFARIN")
    #[arg(long)]
    drugs: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Logs go to a file; stdout belongs to the dashboard. The guard must
    // outlive the TUI or buffered lines are dropped.
    let _log_guard = logging::init(&config.logging)?;
    info!("configuration loaded: backend at {}", config.backend.base_url);

    tui::run(config, cli.vcf, cli.drugs).await
}
