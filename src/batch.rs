//! Render a set of charts, one per preset, without letting one bad file stop
//! the rest.

use crate::annotate::EmptySeriesError;
use crate::presets::{ChartPreset, ensure_unique_outputs};
use crate::storage::load_table;
use crate::style::ChartStyle;
use crate::viz::render_chart;
use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Where the preset CSV files are read from.
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub format: ImageFormat,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            format: ImageFormat::Png,
        }
    }
}

/// Why a chart was not rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartFailure {
    pub preset: String,
    pub csv: PathBuf,
    pub reason: String,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub rendered: Vec<PathBuf>,
    /// Input files that did not exist.
    pub missing: Vec<PathBuf>,
    pub failed: Vec<ChartFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Output path for `preset` under `options`.
pub fn output_path(preset: &ChartPreset, options: &BatchOptions) -> PathBuf {
    options
        .output_dir
        .join(format!("{}.{}", preset.output_stem, options.format.extension()))
}

fn render_one(preset: &ChartPreset, csv: &Path, out: &Path, style: &ChartStyle) -> Result<()> {
    let table = load_table(csv)?;
    let prepared = render_chart(preset, &table, style, out)?;
    info!(
        "{}: {} series, {} boundary line(s), {} band(s) -> {}",
        preset.name,
        prepared.series.len(),
        prepared.annotations.len(),
        prepared.bands.len(),
        out.display()
    );
    Ok(())
}

/// Render every preset whose CSV exists. Missing files and per-chart errors
/// are logged and recorded; only setup problems (clashing output names,
/// unwritable output directory) abort the batch.
pub fn run_batch(
    presets: &[ChartPreset],
    options: &BatchOptions,
    style: &ChartStyle,
) -> Result<BatchReport> {
    ensure_unique_outputs(presets)?;
    std::fs::create_dir_all(&options.output_dir)
        .with_context(|| format!("creating {}", options.output_dir.display()))?;

    let mut report = BatchReport::default();
    for preset in presets {
        let csv = options.input_dir.join(&preset.csv_file);
        if !csv.is_file() {
            warn!("{}: input {} does not exist, skipping", preset.name, csv.display());
            report.missing.push(csv);
            continue;
        }
        info!("{}: processing {}", preset.name, csv.display());
        let out = output_path(preset, options);
        match render_one(preset, &csv, &out, style) {
            Ok(()) => report.rendered.push(out),
            Err(e) => {
                if let Some(empty) = e.downcast_ref::<EmptySeriesError>() {
                    error!("{}: {} has no usable rows ({empty})", preset.name, csv.display());
                } else {
                    error!("{}: failed on {}: {e:#}", preset.name, csv.display());
                }
                report.failed.push(ChartFailure {
                    preset: preset.name.clone(),
                    csv,
                    reason: format!("{e:#}"),
                });
            }
        }
    }
    Ok(report)
}
