//! cachebench_viz
//!
//! Charts for array-sum and matrix-multiplication benchmark results, annotated
//! with the CPU cache boundaries where performance changes. Pairs with the
//! `cbviz` CLI.
//!
//! ### Features
//! - Load the benchmark CSV tables (missing cells are skipped per column)
//! - Snap cache-boundary landmarks to the nearest measured size
//! - Highlight critical size regions as bands
//! - Smooth timing curves with a cubic spline
//! - Render SVG/PNG charts from table-driven presets
//!
//! ### Example
//! ```no_run
//! use cachebench_viz::{presets, storage, style::ChartStyle, viz};
//!
//! let table = storage::load_table("jichu_sum.csv")?;
//! let all = presets::builtin_presets();
//! let preset = presets::find_preset(&all, "jichu_sum").unwrap();
//! let chart = viz::render_chart(preset, &table, &ChartStyle::default(), "jichu_sum.png")?;
//! for ann in &chart.annotations {
//!     println!("{} at size {}", ann.label, ann.line_x);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod annotate;
pub mod batch;
pub mod models;
pub mod presets;
pub mod smooth;
pub mod storage;
pub mod style;
pub mod viz;

pub use annotate::{
    EmptySeriesError, compute_landmark_annotations, compute_region_bands, nearest_point,
};
pub use models::{LabelTier, Landmark, LandmarkAnnotation, Point, Region, RegionBand, Series};
