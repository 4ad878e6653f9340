//! Built-in chart definitions for the benchmark result files.
//!
//! Every chart is data: the CSV it reads, the columns it plots, the axes, and
//! the cache landmarks/regions to annotate. One renderer draws all of them.

use crate::models::{LabelTier, Landmark, Region};
use crate::style::{Rgb8, classic, vibrant};
use crate::viz::types::{AxisScale, MarkerPlan, MarkerShape, PlotKind};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Size column written by the array-sum benchmark.
pub const ARRAY_SIZE_COLUMN: &str = "数组大小";
/// Size column written by the matrix benchmark.
pub const MATRIX_SIZE_COLUMN: &str = "矩阵大小";

const CACHE_FOOTNOTE: &str = "CPU cache: L1=512KB, L2=8MB, L3=16MB";
const MATRIX_KEY_SIZES: [f64; 10] = [
    10.0, 50.0, 100.0, 200.0, 250.0, 500.0, 800.0, 1000.0, 1420.0, 1700.0,
];

/// One plotted metric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub column: String,
    /// Legend text.
    pub label: String,
    pub color: Rgb8,
    #[serde(default)]
    pub marker: MarkerShape,
}

impl SeriesSpec {
    fn new(column: &str, label: &str, color: Rgb8, marker: MarkerShape) -> Self {
        Self {
            column: column.into(),
            label: label.into(),
            color,
            marker,
        }
    }
}

/// A complete chart definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPreset {
    pub name: String,
    /// Input file, relative to the batch input directory.
    pub csv_file: String,
    /// Output file name without extension; unique per batch.
    pub output_stem: String,
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub size_column: String,
    pub series: Vec<SeriesSpec>,
    #[serde(default)]
    pub kind: PlotKind,
    #[serde(default)]
    pub x_scale: AxisScale,
    #[serde(default)]
    pub y_scale: AxisScale,
    /// Rows with a larger size are ignored.
    #[serde(default)]
    pub max_size: Option<f64>,
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub markers: MarkerPlan,
    #[serde(default)]
    pub footnote: Option<String>,
    pub width: u32,
    pub height: u32,
}

fn sum_landmarks() -> Vec<Landmark> {
    vec![
        Landmark::new(64.0 * 1024.0, "L1 cache boundary (~512KB)", LabelTier::Primary),
        Landmark::new(1024.0 * 1024.0, "L2 cache boundary (~8MB)", LabelTier::Primary),
        Landmark::new(2.0 * 1024.0 * 1024.0, "L3 cache boundary (~16MB)", LabelTier::Tertiary),
    ]
}

fn sum_regions() -> Vec<Region> {
    vec![
        Region::new(60.0 * 1024.0, 70.0 * 1024.0, "L1 critical region", 0.2),
        Region::new(950.0 * 1024.0, 1100.0 * 1024.0, "L2 critical region", 0.3),
        Region::new(1900.0 * 1024.0, 2100.0 * 1024.0, "L3 critical region", 0.4),
    ]
}

fn matrix_landmarks() -> Vec<Landmark> {
    vec![
        Landmark::new(250.0, "L1 cache boundary (~512KB)", LabelTier::Primary),
        Landmark::new(1000.0, "L2 cache boundary (~8MB)", LabelTier::Primary),
        Landmark::new(1420.0, "L3 cache boundary (~16MB)", LabelTier::Primary),
    ]
}

fn matrix_regions(l1_label: &str) -> Vec<Region> {
    vec![
        Region::new(240.0, 260.0, l1_label, 0.2),
        Region::new(990.0, 1010.0, "L2 critical region", 0.3),
        Region::new(1400.0, 1440.0, "L3 critical region", 0.4),
    ]
}

fn sum_speedup(name: &str, title: &str, series: Vec<SeriesSpec>) -> ChartPreset {
    ChartPreset {
        name: name.into(),
        csv_file: format!("{name}.csv"),
        output_stem: name.into(),
        title: title.into(),
        x_desc: "Array size (powers of two)".into(),
        y_desc: "Speedup".into(),
        size_column: ARRAY_SIZE_COLUMN.into(),
        series,
        kind: PlotKind::Line,
        x_scale: AxisScale::Log2,
        y_scale: AxisScale::Linear,
        max_size: None,
        landmarks: sum_landmarks(),
        regions: sum_regions(),
        markers: MarkerPlan::PowersOfTwo {
            min_exp: 7,
            max_exp: 25,
        },
        footnote: Some(CACHE_FOOTNOTE.into()),
        width: 1200,
        height: 700,
    }
}

fn matrix_speedup(
    name: &str,
    title: &str,
    series: Vec<SeriesSpec>,
    markers: MarkerPlan,
    l1_label: &str,
) -> ChartPreset {
    ChartPreset {
        name: name.into(),
        csv_file: format!("{name}.csv"),
        output_stem: name.into(),
        title: title.into(),
        x_desc: "Matrix size".into(),
        y_desc: "Speedup".into(),
        size_column: MATRIX_SIZE_COLUMN.into(),
        series,
        kind: PlotKind::Line,
        x_scale: AxisScale::Linear,
        y_scale: AxisScale::Linear,
        max_size: None,
        landmarks: matrix_landmarks(),
        regions: matrix_regions(l1_label),
        markers,
        footnote: Some(CACHE_FOOTNOTE.into()),
        width: 1400,
        height: 800,
    }
}

fn timing(
    dataset: &str,
    title: &str,
    size_column: &str,
    x_desc: &str,
    x_scale: AxisScale,
    series: Vec<SeriesSpec>,
) -> ChartPreset {
    ChartPreset {
        name: format!("{dataset}_time"),
        csv_file: format!("{dataset}.csv"),
        output_stem: format!("{dataset}_time"),
        title: title.into(),
        x_desc: x_desc.into(),
        y_desc: "Time (s)".into(),
        size_column: size_column.into(),
        series,
        kind: PlotKind::Smoothed,
        x_scale,
        y_scale: AxisScale::Log10,
        max_size: None,
        landmarks: Vec::new(),
        regions: Vec::new(),
        markers: MarkerPlan::AllPoints,
        footnote: None,
        width: 1200,
        height: 800,
    }
}

fn unrolled_timing_series() -> Vec<SeriesSpec> {
    vec![
        SeriesSpec::new("平凡算法(秒)", "Naive", classic::NAVY, MarkerShape::Circle),
        SeriesSpec::new("4路展开(秒)", "4-way unrolled", classic::CRIMSON, MarkerShape::Circle),
        SeriesSpec::new("8路展开(秒)", "8-way unrolled", classic::EMERALD, MarkerShape::Circle),
    ]
}

/// Cache-annotated speedup charts.
pub fn speedup_presets() -> Vec<ChartPreset> {
    vec![
        sum_speedup(
            "jichu_sum",
            "Basic summation: speedup comparison",
            vec![
                SeriesSpec::new(
                    "两路链式加速比",
                    "Two-way chained speedup",
                    vibrant::BLUE,
                    MarkerShape::Circle,
                ),
                SeriesSpec::new(
                    "递归加速比",
                    "Recursive speedup",
                    vibrant::RED,
                    MarkerShape::Cross,
                ),
            ],
        ),
        sum_speedup(
            "jinjie_sum",
            "Advanced summation: speedup comparison",
            vec![
                SeriesSpec::new(
                    "4路展开加速比",
                    "4-way unrolled speedup",
                    vibrant::GREEN,
                    MarkerShape::Circle,
                ),
                SeriesSpec::new(
                    "8路展开加速比",
                    "8-way unrolled speedup",
                    vibrant::PURPLE,
                    MarkerShape::Cross,
                ),
            ],
        ),
        matrix_speedup(
            "jichu_matrix",
            "Basic matrix: cache-optimized speedup vs. cache boundaries",
            vec![SeriesSpec::new(
                "加速比",
                "Cache-optimized speedup",
                vibrant::TEAL,
                MarkerShape::Circle,
            )],
            MarkerPlan::KeySizes {
                sizes: MATRIX_KEY_SIZES.to_vec(),
                all_points_up_to: Some(30),
            },
            "L1 critical region",
        ),
        matrix_speedup(
            "jinjie_matrix",
            "Advanced matrix: speedup comparison vs. cache boundaries",
            vec![
                SeriesSpec::new(
                    "4路展开加速比",
                    "4-way unrolled speedup",
                    vibrant::BLUE,
                    MarkerShape::Circle,
                ),
                SeriesSpec::new(
                    "8路展开加速比",
                    "8-way unrolled speedup",
                    vibrant::RED,
                    MarkerShape::Circle,
                ),
            ],
            MarkerPlan::KeySizes {
                sizes: MATRIX_KEY_SIZES.to_vec(),
                all_points_up_to: None,
            },
            "L1 critical region\n4-way ↓, 8-way ↑",
        ),
    ]
}

/// Smoothed timing charts (log-scaled time axis).
pub fn timing_presets() -> Vec<ChartPreset> {
    let mut basic_matrix = timing(
        "jichu_matrix",
        "Basic matrix multiplication: timing",
        MATRIX_SIZE_COLUMN,
        "Matrix size",
        AxisScale::Linear,
        vec![
            SeriesSpec::new("平凡算法(秒)", "Naive", classic::NAVY, MarkerShape::Circle),
            SeriesSpec::new(
                "Cache优化(秒)",
                "Cache-optimized",
                classic::CRIMSON,
                MarkerShape::Circle,
            ),
        ],
    );
    basic_matrix.max_size = Some(5000.0);

    vec![
        basic_matrix,
        timing(
            "jichu_sum",
            "Basic summation: timing",
            ARRAY_SIZE_COLUMN,
            "Array size",
            AxisScale::Log10,
            vec![
                SeriesSpec::new("平凡算法(秒)", "Naive", classic::NAVY, MarkerShape::Circle),
                SeriesSpec::new(
                    "两路链式(秒)",
                    "Two-way chained",
                    classic::CRIMSON,
                    MarkerShape::Circle,
                ),
                SeriesSpec::new("递归(秒)", "Recursive", classic::EMERALD, MarkerShape::Circle),
            ],
        ),
        timing(
            "jinjie_matrix",
            "Advanced matrix multiplication: timing",
            MATRIX_SIZE_COLUMN,
            "Matrix size",
            AxisScale::Linear,
            unrolled_timing_series(),
        ),
        timing(
            "jinjie_sum",
            "Advanced summation: timing",
            ARRAY_SIZE_COLUMN,
            "Array size",
            AxisScale::Log10,
            unrolled_timing_series(),
        ),
    ]
}

/// Every built-in chart.
pub fn builtin_presets() -> Vec<ChartPreset> {
    let mut all = speedup_presets();
    all.extend(timing_presets());
    all
}

pub fn find_preset<'a>(presets: &'a [ChartPreset], name: &str) -> Option<&'a ChartPreset> {
    presets.iter().find(|p| p.name == name)
}

/// Read a JSON array of presets.
pub fn load_presets<P: AsRef<Path>>(path: P) -> Result<Vec<ChartPreset>> {
    let path = path.as_ref();
    let txt = std::fs::read_to_string(path)
        .with_context(|| format!("reading presets {}", path.display()))?;
    let presets: Vec<ChartPreset> = serde_json::from_str(&txt)
        .with_context(|| format!("parsing presets {}", path.display()))?;
    for p in &presets {
        if p.series.is_empty() {
            bail!("preset `{}` plots no columns", p.name);
        }
    }
    ensure_unique_outputs(&presets)?;
    Ok(presets)
}

/// Two charts writing the same file would overwrite each other.
pub fn ensure_unique_outputs(presets: &[ChartPreset]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for p in presets {
        if !seen.insert(p.output_stem.as_str()) {
            bail!("output name `{}` is used by more than one chart", p.output_stem);
        }
    }
    Ok(())
}
