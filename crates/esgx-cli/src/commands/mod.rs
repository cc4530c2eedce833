//! Subcommands and the setup they share.

pub mod batch;
pub mod config;
pub mod metrics;
pub mod process;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use esgx_core::models::config::EsgxConfig;
use esgx_core::{MetricExtractor, MetricSet};

/// Options accepted by every subcommand.
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub metrics: Option<PathBuf>,
}

impl GlobalOptions {
    /// Config file in effect: `--config`, else the per-user file.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config::default_config_path)
    }
}

/// Load the runtime configuration, falling back to defaults when no file exists.
pub fn load_config(options: &GlobalOptions) -> anyhow::Result<EsgxConfig> {
    if let Some(path) = &options.config {
        return EsgxConfig::from_file(path)
            .with_context(|| format!("Failed to read config file {}", path.display()));
    }

    let path = config::default_config_path();
    if path.exists() {
        debug!("Using config file {}", path.display());
        EsgxConfig::from_file(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))
    } else {
        Ok(EsgxConfig::default())
    }
}

/// Metric set in effect: `--metrics`, then `extraction.metrics_path`, then built-in.
pub fn load_metrics(options: &GlobalOptions, config: &EsgxConfig) -> anyhow::Result<MetricSet> {
    let path: Option<&Path> = options
        .metrics
        .as_deref()
        .or(config.extraction.metrics_path.as_deref());

    let metrics = match path {
        Some(path) => {
            debug!("Loading metric definitions from {}", path.display());
            MetricSet::from_file(path)?
        }
        None => MetricSet::builtin()?,
    };

    debug!("{} metric definitions loaded", metrics.len());
    Ok(metrics)
}

/// Config, metrics and a ready extractor in one step.
pub fn build_extractor(options: &GlobalOptions) -> anyhow::Result<(EsgxConfig, MetricExtractor)> {
    let config = load_config(options)?;
    let metrics = load_metrics(options, &config)?;
    let extractor = MetricExtractor::new(&metrics, &config.extraction)?;
    debug!("Extractor ready with {} compiled metrics", extractor.metric_count());
    Ok((config, extractor))
}
