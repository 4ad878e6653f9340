use cachebench_viz::LabelTier;
use cachebench_viz::presets::{self, ChartPreset};
use cachebench_viz::style::{ChartStyle, Rgb8, vibrant};
use cachebench_viz::viz::{AxisScale, MarkerPlan, PlotKind};
use std::fs;
use tempfile::tempdir;

#[test]
fn builtin_presets_have_unique_outputs() {
    let all = presets::builtin_presets();
    assert_eq!(all.len(), 8);
    presets::ensure_unique_outputs(&all).unwrap();
    for p in &all {
        assert!(!p.series.is_empty(), "{} plots nothing", p.name);
    }
}

#[test]
fn sum_speedup_marks_cache_boundaries() {
    let all = presets::builtin_presets();
    let p = presets::find_preset(&all, "jichu_sum").unwrap();
    assert_eq!(p.x_scale, AxisScale::Log2);
    assert_eq!(p.kind, PlotKind::Line);
    let sizes: Vec<f64> = p.landmarks.iter().map(|l| l.size).collect();
    assert_eq!(sizes, [65536.0, 1048576.0, 2097152.0]);
    assert_eq!(p.landmarks[2].tier, LabelTier::Tertiary);
    assert_eq!(p.regions.len(), 3);
    assert_eq!(p.regions[0].min, 60.0 * 1024.0);
    assert_eq!(p.regions[2].height_fraction, 0.4);
    assert_eq!(
        p.markers.targets(100).unwrap().len(),
        19,
        "2^7 ..= 2^25"
    );
}

#[test]
fn matrix_presets_keep_every_label_on_the_top_tier() {
    let all = presets::speedup_presets();
    for name in ["jichu_matrix", "jinjie_matrix"] {
        let p = presets::find_preset(&all, name).unwrap();
        assert!(p.landmarks.iter().all(|l| l.tier == LabelTier::Primary));
        assert_eq!(p.landmarks[2].size, 1420.0);
    }
}

#[test]
fn small_basic_matrix_tables_mark_every_point() {
    let all = presets::speedup_presets();
    let basic = presets::find_preset(&all, "jichu_matrix").unwrap();
    assert_eq!(basic.markers.targets(30), None);
    assert_eq!(basic.markers.targets(31).unwrap().len(), 10);

    let advanced = presets::find_preset(&all, "jinjie_matrix").unwrap();
    assert_eq!(advanced.markers.targets(5).unwrap().len(), 10);
}

#[test]
fn presets_load_from_json() {
    let mut custom: Vec<ChartPreset> = presets::timing_presets();
    custom.truncate(1);
    custom[0].name = "mine".into();
    custom[0].output_stem = "mine".into();

    let dir = tempdir().unwrap();
    let path = dir.path().join("presets.json");
    fs::write(&path, serde_json::to_string(&custom).unwrap()).unwrap();

    let loaded = presets::load_presets(&path).unwrap();
    assert_eq!(loaded, custom);
    assert_eq!(loaded[0].max_size, Some(5000.0));
    assert_eq!(loaded[0].markers, MarkerPlan::AllPoints);
}

#[test]
fn duplicate_output_names_are_rejected() {
    let mut all = presets::builtin_presets();
    all[1].output_stem = all[0].output_stem.clone();
    let err = presets::ensure_unique_outputs(&all).unwrap_err().to_string();
    assert!(err.contains("jichu_sum"), "{err}");
}

#[test]
fn style_json_overrides_only_given_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("style.json");
    fs::write(
        &path,
        r##"{ "band_fill": "#00FF00", "band_alpha": 0.35, "font_path": "/tmp/x.ttf" }"##,
    )
    .unwrap();
    let style = ChartStyle::load(&path).unwrap();
    assert_eq!(style.band_fill, Rgb8::new(0, 255, 0));
    assert_eq!(style.band_alpha, 0.35);
    assert_eq!(style.font_path.as_deref(), Some(std::path::Path::new("/tmp/x.ttf")));
    assert_eq!(style.grid, ChartStyle::default().grid);
}

#[test]
fn style_rejects_bad_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("style.json");
    fs::write(&path, r#"{ "band_alpha": 1.5 }"#).unwrap();
    assert!(ChartStyle::load(&path).is_err());
    fs::write(&path, r#"{ "grid": "grey" }"#).unwrap();
    assert!(ChartStyle::load(&path).is_err());
}

#[test]
fn colors_serialize_as_hex() {
    let json = serde_json::to_string(&vibrant::TEAL).unwrap();
    assert_eq!(json, "\"#00897B\"");
}
