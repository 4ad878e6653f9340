//! Visualization: render benchmark charts to **SVG** or **PNG**.
//!
//! - Raw speedup curves with markers snapped to powers of two / key sizes
//! - Dashed cache-boundary lines with labels, translucent critical-region bands
//! - Spline-smoothed timing curves over the raw measurements
//! - Linear, base-2 and base-10 axes
//!
//! Charts are drawn in two steps: [`prepare_chart`] runs the annotator and
//! computes everything in data space, [`render_chart`] draws it.

pub mod fonts;
pub mod text;
pub mod types;
pub mod util;

pub use types::{AxisScale, MarkerPlan, MarkerShape, PlotKind};

use crate::annotate::{self, EmptySeriesError};
use crate::models::{LandmarkAnnotation, Point, RegionBand, Series};
use crate::presets::{ChartPreset, SeriesSpec};
use crate::smooth::{DEFAULT_SAMPLES, smooth_curve};
use crate::storage::Table;
use crate::style::ChartStyle;
use anyhow::{Result, anyhow, bail};
use log::{debug, warn};
use serde::Serialize;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters::style::{FontDesc, FontFamily};
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;

use text::{estimate_block_px, line_height_px};
use util::{compute_left_label_area_px, padded_range, power_of_two_label_count, rgb};

/// One metric column ready to draw.
#[derive(Debug, Clone, Serialize)]
pub struct PlottedSeries {
    pub spec: SeriesSpec,
    pub series: Series,
    /// Polyline in transformed (screen-axis) space; smoothed for timing charts.
    #[serde(skip)]
    pub curve: Vec<(f64, f64)>,
    /// Highlighted points in data space.
    pub markers: Vec<Point>,
}

/// Everything needed to draw one chart, in data space except where noted.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedChart {
    pub name: String,
    pub series: Vec<PlottedSeries>,
    pub chart_max: f64,
    pub annotations: Vec<LandmarkAnnotation>,
    pub bands: Vec<RegionBand>,
    /// Axis ranges in transformed space.
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

/// Keep points that can be placed on both axes, mapped into axis space.
fn to_axis_space(points: &[Point], xs: AxisScale, ys: AxisScale) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter(|p| (!xs.is_log() || p.size > 0.0) && (!ys.is_log() || p.metric > 0.0))
        .map(|p| (xs.apply(p.size), ys.apply(p.metric)))
        .collect()
}

/// Load the preset's columns from `table`, annotate, and lay out the axes.
///
/// The first column of the preset is the reference series that landmarks
/// and regions are snapped against. An empty reference series fails with
/// [`EmptySeriesError`].
pub fn prepare_chart(preset: &ChartPreset, table: &Table) -> Result<PreparedChart> {
    if preset.series.is_empty() {
        bail!("preset `{}` plots no columns", preset.name);
    }
    let filtered;
    let table = match preset.max_size {
        Some(cut) => {
            filtered = table.filter_max_size(&preset.size_column, cut)?;
            &filtered
        }
        None => table,
    };

    let all: Vec<Series> = preset
        .series
        .iter()
        .map(|spec| table.series(&preset.size_column, &spec.column))
        .collect::<Result<_>>()?;

    let reference = &all[0];
    if reference.is_empty() {
        return Err(EmptySeriesError {
            series: reference.name.clone(),
        }
        .into());
    }
    let chart_max = annotate::chart_max(&all).unwrap_or(0.0);
    let annotations =
        annotate::compute_landmark_annotations(reference, &preset.landmarks, chart_max)?;
    let bands = annotate::compute_region_bands(reference, &preset.regions, chart_max);
    debug!(
        "{}: {} landmark(s), {} of {} region(s) with data",
        preset.name,
        annotations.len(),
        bands.len(),
        preset.regions.len()
    );

    let (xs, ys) = (preset.x_scale, preset.y_scale);
    let mut plotted = Vec::with_capacity(all.len());
    for (spec, series) in preset.series.iter().zip(all) {
        if series.is_empty() {
            warn!("{}: column `{}` has no values", preset.name, spec.column);
        }
        let raw = to_axis_space(series.points(), xs, ys);
        let curve = match preset.kind {
            PlotKind::Line => raw,
            PlotKind::Smoothed => smooth_curve(&raw, DEFAULT_SAMPLES),
        };
        let markers = if series.is_empty() {
            Vec::new()
        } else {
            match preset.markers.targets(series.len()) {
                Some(targets) => annotate::snap_points(&series, &targets)?,
                None => series.points().to_vec(),
            }
        };
        plotted.push(PlottedSeries {
            spec: spec.clone(),
            series,
            curve,
            markers,
        });
    }

    let on_axes: Vec<(f64, f64)> = plotted
        .iter()
        .flat_map(|p| p.curve.iter().copied().chain(to_axis_space(p.series.points(), xs, ys)))
        .collect();
    if on_axes.is_empty() {
        bail!("{}: no values can be placed on the chart axes", preset.name);
    }
    let fold = |f: fn(&(f64, f64)) -> f64| {
        on_axes.iter().map(f).fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
    };
    let (x_lo, x_hi) = fold(|p| p.0);
    let (y_lo, y_hi) = fold(|p| p.1);

    let x_range = padded_range(x_lo, x_hi, 0.03);
    let y_range = if ys.is_log() {
        padded_range(y_lo, y_hi, 0.08)
    } else {
        // Bands rise from zero and labels sit just under the maximum.
        let hi = y_hi.max(chart_max * 1.2);
        let lo = y_lo.min(0.0);
        if (hi - lo).abs() < f64::EPSILON {
            (lo - 1.0, hi + 1.0)
        } else {
            (lo, hi)
        }
    };

    Ok(PreparedChart {
        name: preset.name.clone(),
        series: plotted,
        chart_max,
        annotations,
        bands,
        x_range,
        y_range,
    })
}

/// Prepare and render `preset` from `table` to `out_path`. The format follows
/// the extension: `.svg` writes SVG, anything else PNG.
pub fn render_chart<P: AsRef<Path>>(
    preset: &ChartPreset,
    table: &Table,
    style: &ChartStyle,
    out_path: P,
) -> Result<PreparedChart> {
    let prepared = prepare_chart(preset, table)?;
    fonts::ensure_fonts_registered(style)?;

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (preset.width, preset.height);

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_chart(root, &prepared, preset, style)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_chart(root, &prepared, preset, style)?;
    }
    Ok(prepared)
}

fn font(px: u32) -> FontDesc<'static> {
    (FontFamily::SansSerif, px as f64).into_font()
}

/// Draw a (possibly multi-line) label with a translucent white box behind it.
/// `anchor` is in pixels; `h`/`v` say which edge of the block sits on it.
#[allow(clippy::too_many_arguments)]
fn draw_boxed_label<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    label: &str,
    anchor: (i32, i32),
    h: HPos,
    v: VPos,
    font_px: u32,
    color: RGBColor,
    box_alpha: f64,
) -> Result<()> {
    const PAD: i32 = 3;
    let (w, block_h) = estimate_block_px(label, font_px);
    let (w, block_h) = (w as i32, block_h as i32);
    let left = match h {
        HPos::Left => anchor.0,
        HPos::Center => anchor.0 - w / 2,
        HPos::Right => anchor.0 - w,
    };
    let top = match v {
        VPos::Top => anchor.1,
        VPos::Center => anchor.1 - block_h / 2,
        VPos::Bottom => anchor.1 - block_h,
    };
    root.draw(&Rectangle::new(
        [(left - PAD, top - PAD), (left + w + PAD, top + block_h + PAD)],
        WHITE.mix(box_alpha).filled(),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    let lh = line_height_px(font_px) as i32;
    let text_x = match h {
        HPos::Left => left,
        HPos::Center => left + w / 2,
        HPos::Right => left + w,
    };
    let style = font(font_px).color(&color).pos(Pos::new(h, VPos::Top));
    for (i, line) in label.lines().enumerate() {
        root.draw(&Text::new(
            line.to_string(),
            (text_x, top + i as i32 * lh),
            style.clone(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Helper that draws to any Plotters backend.
fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    chart_data: &PreparedChart,
    preset: &ChartPreset,
    style: &ChartStyle,
) -> Result<()>
where
    DB: DrawingBackend,
{
    const MARGIN: u32 = 16;
    const DASHES: usize = 48;
    let (xs, ys) = (preset.x_scale, preset.y_scale);
    let (x0, x1) = chart_data.x_range;
    let (y0, y1) = chart_data.y_range;

    root.fill(&rgb(style.figure_background))
        .map_err(|e| anyhow!("{:?}", e))?;

    let y_label_count = 10usize;
    let x_label_count = match xs {
        AxisScale::Log2 => power_of_two_label_count(x0, x1),
        _ => 12,
    };
    let left_label_width_px =
        compute_left_label_area_px(ys, y0, y1, y_label_count, style.tick_font_px);

    let mut chart = ChartBuilder::on(&root)
        .margin(MARGIN)
        .caption(preset.title.as_str(), font(style.title_font_px))
        .set_label_area_size(LabelAreaPosition::Left, left_label_width_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 64)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .plotting_area()
        .fill(&rgb(style.plot_background))
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_label_fmt = |v: &f64| xs.tick_label(*v);
    let y_label_fmt = |v: &f64| ys.tick_label(*v);
    let axis_text = rgb(style.axis_text);
    chart
        .configure_mesh()
        .x_desc(preset.x_desc.as_str())
        .y_desc(preset.y_desc.as_str())
        .x_labels(x_label_count)
        .y_labels(y_label_count)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .bold_line_style(rgb(style.grid).stroke_width(1))
        .light_line_style(rgb(style.grid).mix(0.4).stroke_width(1))
        .label_style(font(style.tick_font_px).color(&axis_text))
        .axis_desc_style(font(style.axis_desc_font_px).color(&axis_text))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // Bands go underneath everything else.
    let band_floor = if ys.is_log() { y0 } else { ys.apply(0.0).max(y0) };
    let band_fill = rgb(style.band_fill).mix(style.band_alpha).filled();
    for band in &chart_data.bands {
        if xs.is_log() && band.x_min <= 0.0 {
            continue;
        }
        let top = if ys.is_log() {
            if band.height <= 0.0 {
                continue;
            }
            ys.apply(band.height)
        } else {
            band.height
        };
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(xs.apply(band.x_min), band_floor), (xs.apply(band.x_max), top)],
                band_fill,
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // Curves and markers.
    for plotted in &chart_data.series {
        let color = rgb(plotted.spec.color);
        let width = match preset.kind {
            PlotKind::Line => style.line_width,
            PlotKind::Smoothed => style.smooth_line_width,
        };
        let line = color.mix(0.9).stroke_width(width);
        chart
            .draw_series(LineSeries::new(plotted.curve.iter().copied(), line))
            .map_err(|e| anyhow!("{:?}", e))?
            .label(plotted.spec.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], line));

        let marks = to_axis_space(&plotted.markers, xs, ys);
        let size = style.marker_px as i32;
        let fill = color.mix(style.point_alpha).filled();
        match plotted.spec.marker {
            MarkerShape::Circle => {
                chart
                    .draw_series(marks.iter().map(|&c| Circle::new(c, size, fill)))
                    .map_err(|e| anyhow!("{:?}", e))?;
                chart
                    .draw_series(
                        marks
                            .iter()
                            .map(|&c| Circle::new(c, size, WHITE.stroke_width(1))),
                    )
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            MarkerShape::Cross => {
                chart
                    .draw_series(marks.iter().map(|&c| {
                        Cross::new(c, size, color.mix(style.point_alpha).stroke_width(2))
                    }))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
    }

    // Dashed boundary lines across the full plot height.
    let boundary = rgb(style.boundary_line)
        .mix(style.boundary_alpha)
        .stroke_width(2);
    let step = (y1 - y0) / DASHES as f64;
    for ann in &chart_data.annotations {
        if xs.is_log() && ann.line_x <= 0.0 {
            continue;
        }
        let x = xs.apply(ann.line_x);
        chart
            .draw_series((0..DASHES).step_by(2).map(|i| {
                let a = y0 + step * i as f64;
                PathElement::new(vec![(x, a), (x, a + step)], boundary)
            }))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.9))
        .label_font(font(style.legend_font_px))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // Labels are drawn in pixel space so their boxes can be sized.
    let placeable = |x: f64, y: f64| (!xs.is_log() || x > 0.0) && (!ys.is_log() || y > 0.0);
    for ann in &chart_data.annotations {
        if !placeable(ann.label_x, ann.label_y) {
            continue;
        }
        let anchor = chart.backend_coord(&(xs.apply(ann.label_x), ys.apply(ann.label_y)));
        draw_boxed_label(
            &root,
            &ann.label,
            anchor,
            HPos::Right,
            VPos::Bottom,
            style.boundary_font_px,
            rgb(style.boundary_label),
            style.label_box_alpha,
        )?;
    }
    for band in &chart_data.bands {
        if !placeable(band.label_x, band.label_y) {
            continue;
        }
        let anchor = chart.backend_coord(&(xs.apply(band.label_x), ys.apply(band.label_y)));
        draw_boxed_label(
            &root,
            &band.label,
            anchor,
            HPos::Center,
            VPos::Center,
            style.band_font_px,
            rgb(style.band_label),
            0.7,
        )?;
    }

    if let Some(note) = preset.footnote.as_deref() {
        let (w, h) = root.dim_in_pixel();
        let at = ((w as f64 * 0.01) as i32, (h as f64 * 0.99) as i32);
        let note_style = font(style.footnote_font_px)
            .color(&axis_text.mix(0.7))
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        root.draw(&Text::new(note.to_string(), at, note_style))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
