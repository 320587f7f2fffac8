use featmatch::{FeatureKind, ImageBuf, MetricKind, Region};

#[test]
fn self_distance_is_zero_for_ssd() {
    let v = [0.25f32, 0.5, 0.125, 0.125];
    assert_eq!(MetricKind::Ssd.distance(&v, &v), 0.0);
}

#[test]
fn self_distance_is_zero_for_histogram_intersection() {
    // Normalized histogram: bins sum to 1 exactly.
    let v = [0.25f32, 0.25, 0.5];
    assert_eq!(MetricKind::HistIntersection.distance(&v, &v), 0.0);
}

#[test]
fn extracted_histogram_matches_itself() {
    let image = ImageBuf::filled(20, 20, [120, 40, 200]).unwrap();
    let hist = FeatureKind::RgHist2d
        .extract_from(&image, Region::Whole)
        .unwrap();
    assert_eq!(MetricKind::Ssd.distance(&hist, &hist), 0.0);
    assert!(MetricKind::HistIntersection.distance(&hist, &hist).abs() < 1e-6);
    assert!(MetricKind::Cosine.distance(&hist, &hist).abs() < 1e-6);
}

#[test]
fn length_mismatch_is_the_infinity_sentinel() {
    let a = [1.0f32, 2.0];
    let b = [1.0f32, 2.0, 3.0];
    for metric in MetricKind::ALL {
        assert_eq!(metric.distance(&a, &b), f32::INFINITY, "{metric}");
        assert_eq!(metric.distance(&b, &a), f32::INFINITY, "{metric}");
    }
}

#[test]
fn ssd_is_symmetric() {
    let a = [0.1f32, 0.9, 0.3];
    let b = [0.4f32, 0.2, 0.8];
    assert_eq!(MetricKind::Ssd.distance(&a, &b), MetricKind::Ssd.distance(&b, &a));
}

#[test]
fn disjoint_histograms_intersect_at_one() {
    let a = [1.0f32, 0.0];
    let b = [0.0f32, 1.0];
    assert_eq!(MetricKind::HistIntersection.distance(&a, &b), 1.0);
}

#[test]
fn cosine_ignores_magnitude() {
    let a = [1.0f32, 2.0, 3.0];
    let b = [2.0f32, 4.0, 6.0];
    assert!(MetricKind::Cosine.distance(&a, &b).abs() < 1e-6);
}

#[test]
fn cosine_of_zero_vector_is_maximal() {
    let zero = [0.0f32, 0.0];
    let v = [1.0f32, 0.0];
    assert_eq!(MetricKind::Cosine.distance(&zero, &v), 1.0);
    assert_eq!(MetricKind::Cosine.distance(&v, &zero), 1.0);
    assert_eq!(MetricKind::Cosine.distance(&zero, &zero), 1.0);
}

#[test]
fn metrics_are_deterministic() {
    let a = [0.3f32, 0.7, 0.1];
    let b = [0.5f32, 0.2, 0.9];
    for metric in MetricKind::ALL {
        assert_eq!(metric.distance(&a, &b), metric.distance(&a, &b));
    }
}
