use featmatch::{FeatMatchError, FeatureRecord, FeatureStore};

fn record(id: &str, vector: &[f32]) -> FeatureRecord {
    FeatureRecord {
        id: id.to_string(),
        vector: vector.to_vec(),
    }
}

#[test]
fn save_then_load_reproduces_records_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db_rghist2d.csv");

    let records = vec![
        record("img/pic0001.png", &[0.1, -2.5, 1e-7, 255.0]),
        record("img/pic0002.png", &[1.0 / 3.0, 0.333_333_34, 0.0]),
        record("img/pic0003.png", &[f32::MIN_POSITIVE, f32::MAX]),
    ];
    let store = FeatureStore::new("db", records.clone());
    store.save(&path).unwrap();

    let loaded = FeatureStore::load(&path).unwrap();
    assert_eq!(loaded.len(), records.len());
    for (loaded, original) in loaded.records().iter().zip(records.iter()) {
        assert_eq!(loaded.id, original.id);
        assert_eq!(loaded.vector, original.vector);
    }
}

#[test]
fn saving_truncates_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.csv");

    let first = FeatureStore::new(
        "first",
        vec![
            record("a", &[1.0, 2.0, 3.0]),
            record("b", &[4.0, 5.0, 6.0]),
            record("c", &[7.0, 8.0, 9.0]),
        ],
    );
    first.save(&path).unwrap();

    let second = FeatureStore::new("second", vec![record("x", &[0.5])]);
    second.save(&path).unwrap();

    let loaded = FeatureStore::load(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.records()[0].id, "x");
    assert_eq!(loaded.records()[0].vector, vec![0.5]);
}

#[test]
fn loading_a_missing_file_is_a_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = FeatureStore::load(&path).err().unwrap();
    assert!(matches!(err, FeatMatchError::StoreRead { .. }));
}

#[test]
fn loading_an_empty_file_yields_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "").unwrap();

    let store = FeatureStore::load(&path).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn non_numeric_fields_report_the_offending_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "good.png, 0.5, 0.5\nbad.png, 0.5, oops\n").unwrap();

    let err = FeatureStore::load(&path).err().unwrap();
    match err {
        FeatMatchError::RecordParse { line, .. } => assert_eq!(line, 2),
        other => panic!("expected RecordParse, got {other:?}"),
    }
}

#[test]
fn records_without_values_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.csv");
    std::fs::write(&path, "lonely.png\n").unwrap();

    let err = FeatureStore::load(&path).err().unwrap();
    assert!(matches!(err, FeatMatchError::RecordParse { .. }));
}

#[test]
fn whitespace_around_fields_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spaced.csv");
    std::fs::write(&path, "pic.png,  0.25 , 0.75\n").unwrap();

    let store = FeatureStore::load(&path).unwrap();
    assert_eq!(store.records()[0].id, "pic.png");
    assert_eq!(store.records()[0].vector, vec![0.25, 0.75]);
}

#[test]
fn find_uses_exact_identifier_equality() {
    let store = FeatureStore::new(
        "db",
        vec![
            record("img/pic10.png", &[1.0]),
            record("img/pic1.png", &[2.0]),
        ],
    );

    assert_eq!(store.find("img/pic1.png").unwrap().vector, vec![2.0]);
    assert!(store.find("pic1.png").is_none());
    assert!(store.find("img/pic1").is_none());
}
