//! Utility functions for visualization: colors, axis ranges, tick text, label gutters.

use plotters::prelude::*;

use super::text::estimate_text_width_px;
use super::types::AxisScale;
use crate::style::Rgb8;

#[inline]
pub fn rgb(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Linear tick text: whole numbers from 100 up, otherwise one or two decimals.
pub fn format_linear_tick(v: f64) -> String {
    let a = v.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}", prec, v)
}

/// Widen `[lo, hi]` by `frac` of its span on both sides. Degenerate ranges
/// get a unit of room so plotters has something to draw.
pub fn padded_range(lo: f64, hi: f64, frac: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * frac;
    (lo - pad, hi + pad)
}

/// Number of x labels for a base-2 axis spanning `[lo, hi]` exponents: every
/// other power of two, plus the last one.
pub fn power_of_two_label_count(lo: f64, hi: f64) -> usize {
    let first = lo.ceil() as i64;
    let last = hi.floor() as i64;
    if last < first {
        return 2;
    }
    let n = (last - first + 1) as usize;
    if n > 10 { n / 2 + 1 } else { n.max(2) }
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px(
    scale: AxisScale,
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: u32,
) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        let s = match scale {
            // Only whole exponents are labelled; measure the widest one.
            AxisScale::Log2 | AxisScale::Log10 => scale.tick_label(v.round()),
            AxisScale::Linear => scale.tick_label(v),
        };
        max_px = max_px.max(estimate_text_width_px(&s, font_px));
    }

    // Padding for tick marks and the rotated axis description.
    let with_padding = max_px.saturating_add(40);
    with_padding.clamp(60, 160)
}
