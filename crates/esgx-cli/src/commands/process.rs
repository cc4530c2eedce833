//! Process command - extract metrics from a single report.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use esgx_core::{load_document, DocumentReport};

use super::{build_extractor, GlobalOptions};
use crate::output;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or form-feed separated text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Nested per-category summary
    Json,
    /// Observation rows as JSON
    Rows,
    /// Observation table as CSV
    Csv,
    /// Plain text listing
    Text,
}

pub async fn run(args: ProcessArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let start = Instant::now();

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let (config, extractor) = build_extractor(options)?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading document...");
    let document = load_document(&args.input, &config.pdf)?;
    debug!("Document has {} pages", document.page_count());

    pb.set_message("Extracting metrics...");
    let outcome = extractor.extract(&document);
    pb.finish_and_clear();

    let Some(report) = outcome.into_report() else {
        anyhow::bail!(
            "No text extracted from {} ({} pages); the document needs OCR",
            document.source_file,
            document.page_count()
        );
    };

    if !report.has_metrics() {
        eprintln!(
            "{} No metrics found in {}",
            style("⚠").yellow(),
            report.source_file
        );
    }

    let content = format_report(&report, args.format, config.output.pretty_json)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &content)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", content.trim_end());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_report(
    report: &DocumentReport,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => output::to_json(&report.summary, pretty),
        OutputFormat::Rows => output::to_json(&report.observations, pretty),
        OutputFormat::Csv => output::csv_string(&report.observations),
        OutputFormat::Text => Ok(output::format_text(report)),
    }
}
