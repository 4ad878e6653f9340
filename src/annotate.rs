//! Landmark annotation: snap abstract cache-boundary sizes onto the data points
//! of a concrete series and derive where boundary lines, labels and bands go.
//!
//! All functions here are pure. The only failure is an empty series.

use crate::models::{Landmark, LandmarkAnnotation, Point, Region, RegionBand, Series};
use thiserror::Error;

/// Landmark labels sit this much above their tier fraction of the chart maximum.
pub const LABEL_Y_MARGIN: f64 = 1.05;

/// Labels are right-aligned this many data units left of their boundary line.
pub const LABEL_X_OFFSET: f64 = 5.0;

/// Raised when a lookup is attempted against a series with no rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("series `{series}` has no data points")]
pub struct EmptySeriesError {
    pub series: String,
}

/// Return the point whose size is closest to `target_size`.
///
/// Ties go to the first point in ascending-size order.
pub fn nearest_point(series: &Series, target_size: f64) -> Result<Point, EmptySeriesError> {
    let mut best: Option<(Point, f64)> = None;
    for p in series.points() {
        let d = (p.size - target_size).abs();
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((*p, d)),
        }
    }
    best.map(|(p, _)| p).ok_or_else(|| EmptySeriesError {
        series: series.name.clone(),
    })
}

/// Snap every target size to its nearest point, keeping target order.
pub fn snap_points(series: &Series, targets: &[f64]) -> Result<Vec<Point>, EmptySeriesError> {
    targets.iter().map(|t| nearest_point(series, *t)).collect()
}

/// Maximum metric across all plotted series of one chart.
pub fn chart_max(series: &[Series]) -> Option<f64> {
    series.iter().filter_map(Series::max_metric).reduce(f64::max)
}

/// One annotation per landmark, in landmark order.
///
/// `chart_max` is the largest metric across every series drawn on the chart,
/// not just `series`.
pub fn compute_landmark_annotations(
    series: &Series,
    landmarks: &[Landmark],
    chart_max: f64,
) -> Result<Vec<LandmarkAnnotation>, EmptySeriesError> {
    landmarks
        .iter()
        .map(|lm| {
            let point = nearest_point(series, lm.size)?;
            let label_y = chart_max * lm.tier.y_fraction() * LABEL_Y_MARGIN;
            Ok(LandmarkAnnotation {
                label: lm.label.clone(),
                target_size: lm.size,
                point,
                line_x: point.size,
                label_x: point.size - LABEL_X_OFFSET,
                label_y,
            })
        })
        .collect()
}

/// Bands for the regions that contain at least one point of `series`.
/// Regions without data are skipped.
pub fn compute_region_bands(
    series: &Series,
    regions: &[Region],
    chart_max: f64,
) -> Vec<RegionBand> {
    regions
        .iter()
        .filter_map(|region| {
            let inside: Vec<Point> = series
                .points()
                .iter()
                .copied()
                .filter(|p| region.contains(p.size))
                .collect();
            if inside.is_empty() {
                return None;
            }
            let height = region.height_fraction * chart_max;
            Some(RegionBand {
                label: region.label.clone(),
                x_min: region.min,
                x_max: region.max,
                height,
                label_x: (region.min + region.max) / 2.0,
                label_y: height * 0.5,
                points: inside,
            })
        })
        .collect()
}
