//! Public types for the visualization module.

use serde::{Deserialize, Serialize};

use super::util::format_linear_tick;

/// How an axis maps data values onto the screen.
///
/// Log axes are drawn as linear axes over the transformed values, so every
/// coordinate passed to plotters goes through [`AxisScale::apply`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisScale {
    #[default]
    Linear,
    /// Base-2 logarithm; ticks read `2^k`.
    Log2,
    /// Base-10 logarithm; ticks read `1e<k>`.
    Log10,
}

impl AxisScale {
    pub fn apply(self, v: f64) -> f64 {
        match self {
            AxisScale::Linear => v,
            AxisScale::Log2 => v.log2(),
            AxisScale::Log10 => v.log10(),
        }
    }

    pub fn invert(self, v: f64) -> f64 {
        match self {
            AxisScale::Linear => v,
            AxisScale::Log2 => v.exp2(),
            AxisScale::Log10 => 10f64.powf(v),
        }
    }

    pub fn is_log(self) -> bool {
        !matches!(self, AxisScale::Linear)
    }

    /// Tick text for a position in transformed space. Log axes only label
    /// whole exponents.
    pub fn tick_label(self, v: f64) -> String {
        let whole = (v - v.round()).abs() < 1e-6;
        match self {
            AxisScale::Linear => format_linear_tick(v),
            AxisScale::Log2 if whole => format!("2^{}", v.round() as i64),
            AxisScale::Log10 if whole => format!("1e{}", v.round() as i64),
            _ => String::new(),
        }
    }
}

/// Marker glyph for highlighted points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    #[default]
    Circle,
    Cross,
}

/// Chart shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    /// Raw polylines with snapped markers and cache annotations (speedup charts).
    #[default]
    Line,
    /// Spline-smoothed curves over a scatter of every measurement (timing charts).
    Smoothed,
}

/// Which points get a marker on top of the curve.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerPlan {
    #[default]
    None,
    /// Points nearest to `2^min_exp ..= 2^max_exp`.
    PowersOfTwo { min_exp: u32, max_exp: u32 },
    /// Points nearest to the given sizes. Series with at most
    /// `all_points_up_to` rows get every point marked instead.
    KeySizes {
        sizes: Vec<f64>,
        #[serde(default)]
        all_points_up_to: Option<usize>,
    },
    AllPoints,
}

impl MarkerPlan {
    /// Sizes to snap for a series with `rows` points. `None` means mark every point.
    pub fn targets(&self, rows: usize) -> Option<Vec<f64>> {
        match self {
            MarkerPlan::None => Some(Vec::new()),
            MarkerPlan::PowersOfTwo { min_exp, max_exp } => Some(
                (*min_exp..=*max_exp)
                    .map(|e| 2f64.powi(e as i32))
                    .collect(),
            ),
            MarkerPlan::KeySizes {
                sizes,
                all_points_up_to,
            } => match all_points_up_to {
                Some(limit) if rows <= *limit => None,
                _ => Some(sizes.clone()),
            },
            MarkerPlan::AllPoints => None,
        }
    }
}
