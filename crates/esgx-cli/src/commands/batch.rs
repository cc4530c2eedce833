//! Batch processing command for multiple reports.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use esgx_core::models::config::PdfConfig;
use esgx_core::{load_document, DocumentKind, ExtractionOutcome, MetricExtractor, MetricObservation};

use super::{build_extractor, GlobalOptions};
use crate::output;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of input files
    #[arg(required = true)]
    input: String,

    /// Output directory for per-report JSON and the combined CSV
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Result<ExtractionOutcome, String>,
}

pub async fn run(args: BatchArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let start = Instant::now();

    let (config, extractor) = build_extractor(options)?;
    let extractor = Arc::new(extractor);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| DocumentKind::from_path(p).is_some())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    fs::create_dir_all(&args.output_dir)?;

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Documents run on blocking workers; `buffered` yields them in input order.
    let jobs = args.jobs.max(1);
    let mut tasks = stream::iter(files)
        .map(|path| {
            let extractor = Arc::clone(&extractor);
            let pdf = config.pdf.clone();
            tokio::task::spawn_blocking(move || process_single_file(path, &extractor, &pdf))
        })
        .buffered(jobs);

    let mut results = Vec::new();
    while let Some(joined) = tasks.next().await {
        let result = joined?;

        if let Err(e) = &result.outcome {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), e);
            } else {
                overall_pb.abandon();
                error!("Failed to process {}: {}", result.path.display(), e);
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), e);
            }
        }

        results.push(result);
        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    // Write outputs
    let mut all_rows: Vec<MetricObservation> = Vec::new();
    let mut extracted = 0;
    let mut unreadable = Vec::new();
    let mut failed = Vec::new();

    for result in &results {
        match &result.outcome {
            Ok(ExtractionOutcome::Extracted(report)) => {
                extracted += 1;
                let output_path = args
                    .output_dir
                    .join(output::summary_file_name(&report.context));
                fs::write(
                    &output_path,
                    output::to_json(&report.summary, config.output.pretty_json)?,
                )?;
                debug!("Wrote output to {}", output_path.display());

                println!(
                    "{} {}: {} metrics",
                    style("✓").green(),
                    result.path.display(),
                    report.summary.len()
                );
                all_rows.extend(report.observations.iter().cloned());
            }
            Ok(ExtractionOutcome::EmptyText { .. }) => {
                println!(
                    "{} No text extracted from {} (OCR needed)",
                    style("⚠").yellow(),
                    result.path.display()
                );
                unreadable.push(&result.path);
            }
            Err(e) => failed.push((&result.path, e)),
        }
    }

    if all_rows.is_empty() {
        println!();
        println!(
            "{} No metrics found. Check that the reports mention the configured aliases, \
             or pass a custom definition file with --metrics.",
            style("⚠").yellow()
        );
    } else {
        let csv_path = args.output_dir.join(&config.output.csv_file_name);
        output::write_csv(fs::File::create(&csv_path)?, &all_rows)?;
        println!(
            "{} {} rows written to {}",
            style("✓").green(),
            all_rows.len(),
            csv_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} extracted, {} need OCR, {} failed",
        style(extracted).green(),
        style(unreadable.len()).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (path, e) in &failed {
            println!("  - {}: {}", path.display(), e);
        }
    }

    Ok(())
}

fn process_single_file(path: PathBuf, extractor: &MetricExtractor, pdf: &PdfConfig) -> FileResult {
    let outcome = extract_file(&path, extractor, pdf).map_err(|e| e.to_string());
    FileResult { path, outcome }
}

fn extract_file(
    path: &Path,
    extractor: &MetricExtractor,
    pdf: &PdfConfig,
) -> esgx_core::Result<ExtractionOutcome> {
    let document = load_document(path, pdf)?;
    Ok(extractor.extract(&document))
}
