use keyclimb::corpus::{add_document, ingest_files, model_from_text};
use keyclimb::error::KeyForgeError;
use keyclimb::model::{FrequencyModel, KeyUsage, Transition};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const EXAMPLE_JSON: &str =
    r#"{"transitions":[{"prev":null,"key":"t","count":1},{"prev":"t","key":"h","count":1}]}"#;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_parse_documented_format() {
    let model = FrequencyModel::from_json(EXAMPLE_JSON).unwrap();
    assert_eq!(model.len(), 2);
    assert_eq!(model.get(None, 't'), 1);
    assert_eq!(model.get(Some('t'), 'h'), 1);
    assert_eq!(model.get(Some('h'), 't'), 0);
}

#[test]
fn test_json_round_trip() {
    let model = model_from_text("Round trips keep \"quotes\", tabs\tand newlines\n.");
    let back = FrequencyModel::from_json(&model.to_json().unwrap()).unwrap();
    assert_eq!(back, model);
}

#[test]
fn test_file_round_trip_creates_parent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("model.json");
    let model = model_from_text("abc abd");

    model.save_to_file(&path).unwrap();
    assert_eq!(FrequencyModel::load_from_file(&path).unwrap(), model);
}

#[test]
fn test_duplicate_transitions_rejected() {
    let json = r#"{"transitions":[
        {"prev":"a","key":"b","count":1},
        {"prev":"a","key":"b","count":2}
    ]}"#;
    match FrequencyModel::from_json(json) {
        Err(KeyForgeError::Model(msg)) => assert!(msg.contains("duplicate")),
        other => panic!("expected Model error, got {:?}", other),
    }
}

#[test]
fn test_empty_model_rejected() {
    assert!(matches!(
        FrequencyModel::from_json(r#"{"transitions":[]}"#),
        Err(KeyForgeError::Model(_))
    ));
}

#[test]
fn test_malformed_model_rejected() {
    assert!(FrequencyModel::from_json("{not json").is_err());
    assert!(FrequencyModel::from_json(r#"{"transitions":[{"prev":null,"key":"ab","count":1}]}"#).is_err());
    assert!(FrequencyModel::from_json(r#"{"transitions":[{"prev":null,"key":"a","count":-1}]}"#).is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.json", "[1, 2");
    match FrequencyModel::load_from_file(&path) {
        Err(KeyForgeError::Model(msg)) => assert!(msg.contains("bad.json")),
        other => panic!("expected Model error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_model_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = FrequencyModel::load_from_file(dir.path().join("nope.json"));
    assert!(matches!(result, Err(KeyForgeError::Model(_))));
}

#[test]
fn test_add_accumulates() {
    let mut model = FrequencyModel::new();
    model.add(Some('a'), 'b', 2);
    model.add(Some('a'), 'b', 3);
    model.add(None, 'a', 1);

    assert_eq!(model.get(Some('a'), 'b'), 5);
    assert_eq!(model.len(), 2);
    assert_eq!(model.total(), 6);
}

#[test]
fn test_iteration_is_canonical() {
    let model: FrequencyModel = [
        (Some('b'), 'a', 1),
        (None, 'z', 1),
        (Some('a'), 'c', 1),
        (Some('a'), 'b', 1),
    ]
    .into_iter()
    .collect();

    let order: Vec<Transition> = model.iter().map(|(t, _)| *t).collect();
    assert_eq!(
        order,
        vec![
            Transition::start('z'),
            Transition::new(Some('a'), 'b'),
            Transition::new(Some('a'), 'c'),
            Transition::new(Some('b'), 'a'),
        ]
    );
}

#[test]
fn test_key_usage_ranking() {
    let model = model_from_text("banana");
    assert_eq!(
        model.key_usage(),
        vec![
            KeyUsage { key: 'a', count: 3 },
            KeyUsage { key: 'n', count: 2 },
            KeyUsage { key: 'b', count: 1 },
        ]
    );
}

#[test]
fn test_sliding_window() {
    let model = model_from_text("Hi!");
    assert_eq!(model.len(), 3);
    assert_eq!(model.get(None, 'h'), 1);
    assert_eq!(model.get(Some('h'), 'i'), 1);
    assert_eq!(model.get(Some('i'), '!'), 1);
    assert_eq!(model.total(), 3);
}

#[test]
fn test_non_ascii_dropped_before_windowing() {
    let model = model_from_text("aé b");
    assert_eq!(model.get(None, 'a'), 1);
    assert_eq!(model.get(Some('a'), ' '), 1);
    assert_eq!(model.get(Some(' '), 'b'), 1);
    assert_eq!(model.total(), 3);
}

#[test]
fn test_each_document_starts_fresh() {
    let mut model = FrequencyModel::new();
    add_document(&mut model, "ab");
    add_document(&mut model, "ba");

    assert_eq!(model.get(None, 'a'), 1);
    assert_eq!(model.get(None, 'b'), 1);
    // No pair spans the document boundary.
    assert_eq!(model.get(Some('b'), 'b'), 0);
}

#[test]
fn test_ingest_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "The cat");
    let b = write_file(&dir, "b.txt", "the hat");

    let model = ingest_files(&[a, b]).unwrap();
    assert_eq!(model.get(None, 't'), 2);
    assert_eq!(model.get(Some('t'), 'h'), 2);
    assert_eq!(model.get(Some('a'), 't'), 2);
    assert_eq!(model.total(), 14);
}

#[test]
fn test_ingest_rejects_bad_input() {
    let empty: [PathBuf; 0] = [];
    assert!(ingest_files(&empty).is_err());

    let dir = tempfile::tempdir().unwrap();
    assert!(ingest_files(&[dir.path().join("missing.txt")]).is_err());

    let blank = write_file(&dir, "blank.txt", "");
    assert!(ingest_files(&[blank]).is_err());
}

#[test]
fn test_huge_counts_saturate() {
    let json = r#"{"transitions":[
        {"prev":null,"key":"a","count":18446744073709551615},
        {"prev":"a","key":"a","count":18446744073709551615}
    ]}"#;
    let mut model = FrequencyModel::from_json(json).unwrap();
    assert_eq!(model.total(), u64::MAX);
    assert_eq!(model.key_usage(), vec![KeyUsage { key: 'a', count: u64::MAX }]);

    model.add(None, 'a', 1);
    assert_eq!(model.get(None, 'a'), u64::MAX);
}
