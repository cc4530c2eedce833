//! CLI application for sustainability report metric extraction.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, metrics, process, GlobalOptions};

/// ESG metric extraction - pull sustainability KPIs out of report PDFs
#[derive(Parser)]
#[command(name = "esgx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Metric definition file (overrides the configured and built-in sets)
    #[arg(short, long, global = true)]
    metrics: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract metrics from a single report
    Process(process::ProcessArgs),

    /// Extract metrics from many reports
    Batch(batch::BatchArgs),

    /// Inspect and validate metric definitions
    Metrics(metrics::MetricsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let options = GlobalOptions {
        config: cli.config,
        metrics: cli.metrics,
    };

    // Execute command
    match cli.command {
        Commands::Process(args) => process::run(args, &options).await,
        Commands::Batch(args) => batch::run(args, &options).await,
        Commands::Metrics(args) => metrics::run(args, &options).await,
        Commands::Config(args) => config::run(args, &options).await,
    }
}
