use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::{DatasetError, DatasetShape, find_dataset_path, load_dataset};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("biasrank_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = File::create(path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let file = File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

const KEYED_DOC: &str = r#"{
    "gpt-4o": {
        "displayName": "GPT-4o",
        "anchoring_bias": {
            "0.2": { "average": 0.8, "level_1": 0.9, "level_2": 0.8, "level_3": 0.75, "level_4": 0.7, "level_5": 0.5 }
        },
        "framing_bias": {
            "0.2": { "average": 0.6, "level_1": 0.6, "level_2": 0.6, "level_3": 0.6, "level_4": 0.6, "level_5": 0.6 },
            "0.75": { "average": 0.4, "level_1": 0.4, "level_2": 0.4, "level_3": 0.4, "level_4": 0.4, "level_5": 0.4 }
        }
    },
    "llama-3": {
        "anchoring_bias": {
            "0.75": { "average": 0.7, "level_1": 0.7, "level_2": 0.7, "level_3": 0.7, "level_4": 0.7, "level_5": 0.7 }
        }
    }
}"#;

const CATALOG_DOC: &str = r#"{
    "llms": [
        {
            "name": "gpt-4o",
            "bias_scores": {
                "anchoring_bias": { "0.2": [0.9, 0.8, 0.75, 0.7, 0.5, 0.8] }
            }
        }
    ]
}"#;

#[test]
fn test_keyed_shape_detection_and_normalization() {
    let dir = make_temp_dir();
    let path = dir.join("data.json");
    write_file(&path, KEYED_DOC);

    let loaded = load_dataset(&path).unwrap();
    assert_eq!(loaded.dataset.shape, DatasetShape::Keyed);
    assert_eq!(loaded.vocabulary.profile, "keyed_v1");
    assert_eq!(loaded.dataset.models.len(), 2);

    let model = &loaded.dataset.models[0];
    assert_eq!(model.id, "gpt-4o");
    assert_eq!(model.display_name.as_deref(), Some("GPT-4o"));
    assert_eq!(model.label(), "GPT-4o");

    let anchor = loaded.vocabulary.bias_by_key("anchoring_bias").unwrap();
    let low = loaded.vocabulary.temperature_index("0.2").unwrap();
    let cell = model.scores[anchor][low].unwrap();
    assert!((cell.average - 0.8).abs() < 1e-12);
    assert_eq!(cell.levels, [0.9, 0.8, 0.75, 0.7, 0.5]);

    // llama-3 has no data at 0.2 for anchoring, only 0.75
    let model = &loaded.dataset.models[1];
    assert_eq!(model.label(), "llama-3");
    assert!(model.scores[anchor][low].is_none());
    let high = loaded.vocabulary.temperature_index("0.75").unwrap();
    assert!(model.scores[anchor][high].is_some());
}

#[test]
fn test_catalog_shape_detection_and_normalization() {
    let dir = make_temp_dir();
    let path = dir.join("data.json");
    write_file(&path, CATALOG_DOC);

    let loaded = load_dataset(&path).unwrap();
    assert_eq!(loaded.dataset.shape, DatasetShape::Catalog);
    assert_eq!(loaded.vocabulary.profile, "catalog_v1");

    let model = &loaded.dataset.models[0];
    assert_eq!(model.label(), "gpt-4o");

    let anchor = loaded.vocabulary.bias_by_key("anchoring_bias").unwrap();
    let low = loaded.vocabulary.temperature_index("0.2").unwrap();
    let cell = model.scores[anchor][low].unwrap();
    // index 5 is the aggregate, 0..4 the level scores
    assert!((cell.average - 0.8).abs() < 1e-12);
    assert_eq!(cell.levels, [0.9, 0.8, 0.75, 0.7, 0.5]);
}

#[test]
fn test_both_encodings_normalize_to_the_same_cell() {
    let dir = make_temp_dir();
    let keyed_path = dir.join("keyed.json");
    let catalog_path = dir.join("catalog.json");
    write_file(&keyed_path, KEYED_DOC);
    write_file(&catalog_path, CATALOG_DOC);

    let keyed = load_dataset(&keyed_path).unwrap();
    let catalog = load_dataset(&catalog_path).unwrap();

    let cell_of = |loaded: &super::LoadedDataset| {
        let anchor = loaded.vocabulary.bias_by_key("anchoring_bias").unwrap();
        let low = loaded.vocabulary.temperature_index("0.2").unwrap();
        loaded.dataset.models[0].scores[anchor][low].unwrap()
    };
    assert_eq!(cell_of(&keyed), cell_of(&catalog));
}

#[test]
fn test_malformed_entries_narrow_one_model() {
    let dir = make_temp_dir();
    let path = dir.join("data.json");
    write_file(
        &path,
        r#"{
            "llms": [
                {
                    "name": "short-array",
                    "bias_scores": { "anchoring_bias": { "0.2": [0.9, 0.8, 0.7] } }
                },
                {
                    "name": "not-numbers",
                    "bias_scores": { "anchoring_bias": { "0.2": ["a", "b", "c", "d", "e", "f"] } }
                },
                {
                    "name": "fine",
                    "bias_scores": { "anchoring_bias": { "0.2": [0.1, 0.2, 0.3, 0.4, 0.5, 0.6] } }
                }
            ]
        }"#,
    );

    let loaded = load_dataset(&path).unwrap();
    assert_eq!(loaded.dataset.models.len(), 3);

    let anchor = loaded.vocabulary.bias_by_key("anchoring_bias").unwrap();
    let low = loaded.vocabulary.temperature_index("0.2").unwrap();
    assert!(loaded.dataset.models[0].scores[anchor][low].is_none());
    assert!(loaded.dataset.models[1].scores[anchor][low].is_none());
    assert!(loaded.dataset.models[2].scores[anchor][low].is_some());
}

#[test]
fn test_unknown_keys_and_temperatures_ignored() {
    let dir = make_temp_dir();
    let path = dir.join("data.json");
    write_file(
        &path,
        r#"{
            "m1": {
                "not_a_bias": { "0.2": { "average": 1.0, "level_1": 1.0, "level_2": 1.0, "level_3": 1.0, "level_4": 1.0, "level_5": 1.0 } },
                "anchoring_bias": {
                    "0.2": { "average": 0.5, "level_1": 0.5, "level_2": 0.5, "level_3": 0.5, "level_4": 0.5, "level_5": 0.5 },
                    "0.9": { "average": 0.1, "level_1": 0.1, "level_2": 0.1, "level_3": 0.1, "level_4": 0.1, "level_5": 0.1 }
                }
            }
        }"#,
    );

    let loaded = load_dataset(&path).unwrap();
    let anchor = loaded.vocabulary.bias_by_key("anchoring_bias").unwrap();
    let low = loaded.vocabulary.temperature_index("0.2").unwrap();
    let cell = loaded.dataset.models[0].scores[anchor][low].unwrap();
    assert!((cell.average - 0.5).abs() < 1e-12);
}

#[test]
fn test_non_object_model_entry_skipped() {
    let dir = make_temp_dir();
    let path = dir.join("data.json");
    write_file(
        &path,
        r#"{
            "bad": 42,
            "good": {
                "anchoring_bias": { "0.2": { "average": 0.5, "level_1": 0.5, "level_2": 0.5, "level_3": 0.5, "level_4": 0.5, "level_5": 0.5 } }
            }
        }"#,
    );

    let loaded = load_dataset(&path).unwrap();
    assert_eq!(loaded.dataset.models.len(), 1);
    assert_eq!(loaded.dataset.models[0].id, "good");
}

#[test]
fn test_gz_dataset_accepted() {
    let dir = make_temp_dir();
    let path = dir.join("data.json.gz");
    write_gz(&path, KEYED_DOC);

    let loaded = load_dataset(&path).unwrap();
    assert_eq!(loaded.dataset.models.len(), 2);
}

#[test]
fn test_directory_discovery() {
    let dir = make_temp_dir();
    write_file(&dir.join("rankings.json"), CATALOG_DOC);

    let path = find_dataset_path(&dir).unwrap();
    assert_eq!(path, dir.join("rankings.json"));

    let loaded = load_dataset(&dir).unwrap();
    assert_eq!(loaded.dataset.shape, DatasetShape::Catalog);
}

#[test]
fn test_missing_dataset_reported() {
    let dir = make_temp_dir();
    let err = find_dataset_path(&dir).unwrap_err();
    assert!(matches!(err, DatasetError::MissingInput(_)));
}

#[test]
fn test_empty_document_rejected() {
    let dir = make_temp_dir();
    let path = dir.join("data.json");
    write_file(&path, "{}");

    let err = load_dataset(&path).unwrap_err();
    assert!(matches!(err, DatasetError::InvalidInput(_)));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let dir = make_temp_dir();
    let path = dir.join("data.json");
    write_file(&path, "{ nope");

    let err = load_dataset(&path).unwrap_err();
    assert!(matches!(err, DatasetError::Parse(_)));
}

#[test]
fn test_coverage_audit_counts() {
    let dir = make_temp_dir();
    let path = dir.join("data.json");
    write_file(&path, KEYED_DOC);

    let loaded = load_dataset(&path).unwrap();
    let anchor = loaded
        .audits
        .iter()
        .find(|a| a.bias_key == "anchoring_bias")
        .unwrap();
    assert_eq!(anchor.models_with_data, 2);
    assert_eq!(anchor.models_total, 2);
    assert_eq!(anchor.group, "cognitive");

    let framing = loaded
        .audits
        .iter()
        .find(|a| a.bias_key == "framing_bias")
        .unwrap();
    assert_eq!(framing.models_with_data, 1);

    let missing = loaded
        .audits
        .iter()
        .find(|a| a.bias_key == "interpretation_bias")
        .unwrap();
    assert_eq!(missing.models_with_data, 0);
}

#[test]
fn test_document_order_preserved() {
    let dir = make_temp_dir();
    let path = dir.join("data.json");
    write_file(
        &path,
        r#"{
            "zeta": { "anchoring_bias": { "0.2": { "average": 0.5, "level_1": 0.5, "level_2": 0.5, "level_3": 0.5, "level_4": 0.5, "level_5": 0.5 } } },
            "alpha": { "anchoring_bias": { "0.2": { "average": 0.5, "level_1": 0.5, "level_2": 0.5, "level_3": 0.5, "level_4": 0.5, "level_5": 0.5 } } }
        }"#,
    );

    let loaded = load_dataset(&path).unwrap();
    let ids: Vec<&str> = loaded.dataset.models.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["zeta", "alpha"]);
}
