//! Metrics command - inspect and validate metric definitions.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use esgx_core::{Category, MetricExtractor, MetricKind, MetricSet};

use super::{load_config, load_metrics, GlobalOptions};

/// Arguments for the metrics command.
#[derive(Args)]
pub struct MetricsArgs {
    #[command(subcommand)]
    command: MetricsCommand,
}

#[derive(Subcommand)]
enum MetricsCommand {
    /// List the metrics in effect
    List {
        /// Only show one category (environmental, social, governance)
        #[arg(long)]
        category: Option<String>,
    },

    /// Validate a metric definition file
    Check {
        /// Metric definition file
        file: PathBuf,
    },

    /// Write the metrics in effect as a definition file
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn run(args: MetricsArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    match args.command {
        MetricsCommand::List { category } => list_metrics(options, category.as_deref()),
        MetricsCommand::Check { file } => check_metrics(options, &file),
        MetricsCommand::Export { output } => export_metrics(options, output),
    }
}

fn parse_category(name: &str) -> anyhow::Result<Category> {
    Category::ALL
        .into_iter()
        .find(|c| c.as_str().eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown category '{}' (expected environmental, social or governance)",
                name
            )
        })
}

fn list_metrics(options: &GlobalOptions, category: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(options)?;
    let metrics = load_metrics(options, &config)?;
    let filter = category.map(parse_category).transpose()?;

    for category in Category::ALL {
        if filter.is_some_and(|f| f != category) {
            continue;
        }

        let defs: Vec<_> = metrics.iter().filter(|m| m.category == category).collect();
        if defs.is_empty() {
            continue;
        }

        println!("{}", style(category.as_str().to_uppercase()).bold());
        for def in defs {
            let kind = match &def.kind {
                MetricKind::Boolean => style("disclosure".to_string()).magenta(),
                MetricKind::Numeric { unit_hints } if unit_hints.is_empty() => {
                    style("numeric".to_string()).cyan()
                }
                MetricKind::Numeric { unit_hints } => {
                    style(format!("numeric [{}]", unit_hints.join(", "))).cyan()
                }
            };
            println!(
                "  {} {:<32} {}",
                style("▸").dim(),
                def.json_key,
                kind
            );
            println!(
                "      {} {}",
                style("aliases:").dim(),
                def.aliases.join(" | ")
            );
        }
        println!();
    }

    println!("{} metric definitions", metrics.len());
    Ok(())
}

fn check_metrics(options: &GlobalOptions, file: &Path) -> anyhow::Result<()> {
    let config = load_config(options)?;
    let metrics = MetricSet::from_file(file)?;
    // Compiling every alias surfaces pattern errors too.
    MetricExtractor::new(&metrics, &config.extraction)?;

    let booleans = metrics.iter().filter(|m| m.is_boolean()).count();
    println!(
        "{} {}: {} metrics ({} numeric, {} disclosure)",
        style("✓").green(),
        file.display(),
        metrics.len(),
        metrics.len() - booleans,
        booleans
    );
    Ok(())
}

fn export_metrics(options: &GlobalOptions, output: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(options)?;
    let metrics = load_metrics(options, &config)?;
    let json = metrics.to_json_pretty()?;

    match output {
        Some(path) => {
            fs::write(&path, json)?;
            println!(
                "{} Wrote {} metric definitions to {}",
                style("✓").green(),
                metrics.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}
