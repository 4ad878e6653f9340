use cachebench_viz::annotate::{chart_max, snap_points};
use cachebench_viz::{
    EmptySeriesError, LabelTier, Landmark, Point, Region, Series, compute_landmark_annotations,
    compute_region_bands, nearest_point,
};

fn sample() -> Series {
    Series::from_pairs(
        "speedup",
        &[(128.0, 1.0), (256.0, 1.5), (512.0, 3.0), (1024.0, 3.8)],
    )
}

fn cache_landmarks() -> Vec<Landmark> {
    vec![
        Landmark::new(200.0, "L1", LabelTier::Primary),
        Landmark::new(700.0, "L2", LabelTier::Primary),
        Landmark::new(5000.0, "L3", LabelTier::Tertiary),
    ]
}

#[test]
fn nearest_point_minimizes_distance() {
    let s = sample();
    for t in [1.0, 100.0, 191.0, 192.0, 300.0, 384.0, 385.0, 800.0, 1e9] {
        let got = nearest_point(&s, t).unwrap();
        assert!(s.points().contains(&got));
        for p in s.points() {
            assert!(
                (got.size - t).abs() <= (p.size - t).abs(),
                "target {t}: {got:?} is farther than {p:?}"
            );
        }
    }
}

#[test]
fn exact_match_is_returned() {
    assert_eq!(nearest_point(&sample(), 256.0).unwrap(), Point::new(256.0, 1.5));
}

#[test]
fn unsorted_input_is_sorted_before_lookup() {
    let s = Series::from_pairs("shuffled", &[(1024.0, 3.8), (128.0, 1.0), (512.0, 3.0)]);
    assert_eq!(s.points()[0].size, 128.0);
    assert_eq!(nearest_point(&s, 500.0).unwrap(), Point::new(512.0, 3.0));
}

#[test]
fn annotations_follow_landmark_order() {
    let s = sample();
    let out = compute_landmark_annotations(&s, &cache_landmarks(), 3.8).unwrap();
    let labels: Vec<&str> = out.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, ["L1", "L2", "L3"]);
    assert_eq!(out[0].line_x, 256.0);
    assert_eq!(out[1].line_x, 512.0);
    assert_eq!(out[2].line_x, 1024.0);
    for a in &out {
        assert_eq!(a.line_x, a.point.size);
        assert_eq!(a.label_x, a.line_x - 5.0);
    }
}

#[test]
fn label_height_uses_chart_wide_maximum() {
    let ours = sample();
    let other = Series::from_pairs("other", &[(128.0, 2.0), (1024.0, 10.0)]);
    let max = chart_max(&[ours.clone(), other]).unwrap();
    assert_eq!(max, 10.0);

    let out = compute_landmark_annotations(&ours, &cache_landmarks(), max).unwrap();
    assert!((out[0].label_y - 10.0 * 0.95 * 1.05).abs() < 1e-12);
    assert!((out[2].label_y - 10.0 * 0.85 * 1.05).abs() < 1e-12);
}

#[test]
fn annotations_are_idempotent() {
    let s = sample();
    let a = compute_landmark_annotations(&s, &cache_landmarks(), 3.8).unwrap();
    let b = compute_landmark_annotations(&s, &cache_landmarks(), 3.8).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_series_fails_every_lookup() {
    let empty = Series::new("empty", vec![]);
    assert_eq!(
        nearest_point(&empty, 500.0),
        Err(EmptySeriesError {
            series: "empty".into()
        })
    );
    assert!(compute_landmark_annotations(&empty, &cache_landmarks(), 1.0).is_err());
    assert!(snap_points(&empty, &[1.0]).is_err());
    // No landmarks means nothing to look up.
    assert!(compute_landmark_annotations(&empty, &[], 1.0).unwrap().is_empty());
    assert_eq!(chart_max(&[empty]), None);
}

#[test]
fn bands_stay_inside_their_regions() {
    let s = sample();
    let regions = vec![
        Region::new(100.0, 300.0, "low", 0.2),
        Region::new(600.0, 650.0, "gap", 0.3),
        Region::new(512.0, 1024.0, "high", 0.4),
    ];
    let bands = compute_region_bands(&s, &regions, 3.8);
    assert_eq!(bands.len(), 2);
    assert_eq!(bands[0].label, "low");
    assert_eq!(bands[1].label, "high");
    for (band, region) in bands.iter().zip([&regions[0], &regions[2]]) {
        assert_eq!((band.x_min, band.x_max), (region.min, region.max));
        assert!(!band.points.is_empty());
        assert!(band.points.iter().all(|p| region.contains(p.size)));
        assert!((band.height - region.height_fraction * 3.8).abs() < 1e-12);
    }
    // Both bounds are inclusive.
    assert_eq!(bands[1].points.len(), 2);
}

#[test]
fn snap_points_keeps_target_order() {
    let s = sample();
    let snapped = snap_points(&s, &[2000.0, 0.0, 300.0]).unwrap();
    let sizes: Vec<f64> = snapped.iter().map(|p| p.size).collect();
    assert_eq!(sizes, [1024.0, 128.0, 256.0]);
}

#[test]
fn series_from_json_snaps_in_size_order() {
    let s: Series = serde_json::from_str(
        r#"{"name":"s","points":[{"size":200,"metric":2},{"size":100,"metric":1}]}"#,
    )
    .unwrap();
    assert_eq!(nearest_point(&s, 150.0).unwrap(), Point::new(100.0, 1.0));
}
