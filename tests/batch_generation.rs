use featmatch::{batch, FeatureKind, ImageBuf, Region};
use std::path::Path;

#[test]
fn failed_extractions_are_skipped_not_fatal() {
    let images = vec![
        ("big1.png".to_string(), ImageBuf::filled(16, 16, [10, 20, 30]).unwrap()),
        ("tiny.png".to_string(), ImageBuf::filled(3, 3, [0, 0, 0]).unwrap()),
        ("big2.png".to_string(), ImageBuf::filled(8, 8, [200, 100, 0]).unwrap()),
    ];

    let records = batch::build_records(images, FeatureKind::Baseline, Region::Whole);

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["big1.png", "big2.png"]);
    for record in &records {
        assert_eq!(record.vector.len(), FeatureKind::Baseline.dim());
    }
}

#[test]
fn each_image_contributes_exactly_one_record() {
    let images: Vec<(String, ImageBuf)> = (0..5)
        .map(|i| {
            let shade = (i * 40) as u8;
            (
                format!("img{i}.png"),
                ImageBuf::filled(10, 10, [shade, shade, shade]).unwrap(),
            )
        })
        .collect();

    let records = batch::build_records(images, FeatureKind::RgbHist3d, Region::Whole);
    assert_eq!(records.len(), 5);
    for record in &records {
        let sum: f32 = record.vector.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }
}

#[test]
fn region_selection_applies_during_batch() {
    let images = vec![(
        "half.png".to_string(),
        ImageBuf::filled(20, 21, [255, 0, 0]).unwrap(),
    )];
    let records = batch::build_records(images, FeatureKind::RgHist2d, Region::Bottom);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].vector[15 * 16], 1.0);
}

#[test]
fn image_paths_filter_on_extension_case_insensitively() {
    assert!(batch::is_image_path(Path::new("a.jpg")));
    assert!(batch::is_image_path(Path::new("b.PNG")));
    assert!(batch::is_image_path(Path::new("c.tiff")));
    assert!(batch::is_image_path(Path::new("d.ppm")));
    assert!(batch::is_image_path(Path::new("dir/e.JPEG")));
    assert!(!batch::is_image_path(Path::new("notes.txt")));
    assert!(!batch::is_image_path(Path::new("archive.tar.gz")));
    assert!(!batch::is_image_path(Path::new("noextension")));
}
