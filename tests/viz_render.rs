use cachebench_viz::EmptySeriesError;
use cachebench_viz::presets::{self, ChartPreset};
use cachebench_viz::storage::Table;
use cachebench_viz::style::ChartStyle;
use cachebench_viz::viz::{self, AxisScale, fonts};
use std::fs;
use std::path::PathBuf;

fn preset(name: &str) -> ChartPreset {
    let all = presets::builtin_presets();
    presets::find_preset(&all, name).unwrap().clone()
}

/// Array sizes from 2^7 up to 4Mi in quarter-octave steps, with a speedup dip after 64Ki.
fn sum_table() -> Table {
    let mut rows = Vec::new();
    let mut n = 128.0f64;
    while n <= 4.0 * 1024.0 * 1024.0 {
        let base = if n < 65536.0 { 1.9 } else { 1.4 };
        let naive = n * 1e-9;
        rows.push(vec![
            Some(n.round()),
            Some(base),
            Some(base + 0.3),
            Some(naive),
            Some(naive / base),
            Some(naive / (base + 0.3)),
        ]);
        n *= 2f64.powf(0.25);
    }
    Table::new(
        vec![
            presets::ARRAY_SIZE_COLUMN.into(),
            "两路链式加速比".into(),
            "递归加速比".into(),
            "平凡算法(秒)".into(),
            "两路链式(秒)".into(),
            "递归(秒)".into(),
        ],
        rows,
    )
}

fn matrix_table(rows: usize) -> Table {
    let rows = (1..=rows)
        .map(|i| {
            let n = (i * 50) as f64;
            vec![Some(n), Some(1.0 + (i % 7) as f64 * 0.4)]
        })
        .collect();
    Table::new(vec![presets::MATRIX_SIZE_COLUMN.into(), "加速比".into()], rows)
}

fn unrolled_matrix_table() -> Table {
    let rows = (1..=40)
        .map(|i| {
            let n = (i * 50) as f64;
            vec![Some(n), Some(2.0 + (i % 3) as f64), Some(2.5 - (i % 4) as f64 * 0.2)]
        })
        .collect();
    Table::new(
        vec![
            presets::MATRIX_SIZE_COLUMN.into(),
            "4路展开加速比".into(),
            "8路展开加速比".into(),
        ],
        rows,
    )
}

fn font_available() -> bool {
    let found = fonts::discover_font(&fonts::font_candidates(&ChartStyle::default())).is_some();
    if !found {
        eprintln!("no system font found, skipping render check");
    }
    found
}

fn write_and_check(p: &ChartPreset, table: &Table, name: &str) {
    let path: PathBuf = std::env::temp_dir().join(format!("cbviz_{name}"));
    viz::render_chart(p, table, &ChartStyle::default(), &path).unwrap();
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "image has content");
    fs::remove_file(&path).ok();
}

#[test]
fn sum_chart_snaps_landmarks_and_keeps_bands_with_data() {
    let prepared = viz::prepare_chart(&preset("jichu_sum"), &sum_table()).unwrap();

    assert_eq!(prepared.annotations.len(), 3);
    assert_eq!(prepared.annotations[0].line_x, 65536.0);
    assert_eq!(prepared.annotations[1].line_x, 1048576.0);
    assert_eq!(prepared.annotations[2].line_x, 2097152.0);
    // Max across both columns, not just the first.
    assert!((prepared.chart_max - 2.2).abs() < 1e-12);

    for band in &prepared.bands {
        assert!(band.points.iter().all(|p| p.size >= band.x_min && p.size <= band.x_max));
    }
    assert_eq!(prepared.series.len(), 2);
    assert_eq!(prepared.series[0].markers.len(), 19);
    // Log2 axis: ranges are exponents.
    assert!(prepared.x_range.0 < 7.0 && prepared.x_range.1 > 21.0);
    assert!(prepared.y_range.0 <= 0.0 && prepared.y_range.1 >= 2.2 * 1.2 - 1e-9);
}

#[test]
fn timing_chart_is_smoothed_on_log_axes() {
    let p = preset("jichu_sum_time");
    assert_eq!(p.y_scale, AxisScale::Log10);
    let prepared = viz::prepare_chart(&p, &sum_table()).unwrap();
    assert!(prepared.annotations.is_empty());
    assert_eq!(prepared.series.len(), 3);
    for s in &prepared.series {
        assert_eq!(s.curve.len(), 300);
        assert_eq!(s.markers.len(), s.series.len());
    }
}

#[test]
fn small_matrix_table_marks_all_points() {
    let prepared = viz::prepare_chart(&preset("jichu_matrix"), &matrix_table(20)).unwrap();
    assert_eq!(prepared.series[0].markers.len(), 20);
    let prepared = viz::prepare_chart(&preset("jichu_matrix"), &matrix_table(40)).unwrap();
    assert_eq!(prepared.series[0].markers.len(), 10);
    // 250 and 1000 are sampled exactly; 1420 snaps to 1400 (1450 is farther).
    let lines: Vec<f64> = prepared.annotations.iter().map(|a| a.line_x).collect();
    assert_eq!(lines, [250.0, 1000.0, 1400.0]);
}

#[test]
fn empty_reference_column_is_empty_series_error() {
    let t = Table::new(
        vec![presets::MATRIX_SIZE_COLUMN.into(), "加速比".into()],
        vec![vec![Some(10.0), None]],
    );
    let err = viz::prepare_chart(&preset("jichu_matrix"), &t).unwrap_err();
    assert!(err.downcast_ref::<EmptySeriesError>().is_some());
}

#[test]
fn charts_render_to_svg_and_png() {
    if !font_available() {
        return;
    }
    write_and_check(&preset("jichu_sum"), &sum_table(), "sum.svg");
    write_and_check(&preset("jichu_sum_time"), &sum_table(), "sum_time.png");
    write_and_check(&preset("jinjie_matrix"), &unrolled_matrix_table(), "matrix.svg");
}
