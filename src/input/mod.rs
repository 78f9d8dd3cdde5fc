use std::path::{Path, PathBuf};

pub mod merge;
pub mod reader;
pub mod schema;

use crate::vocab::{CoverageAudit, Vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetShape {
    /// Top-level object mapping model id to per-model bias entries, with
    /// named `level_1..level_5` score fields.
    Keyed,
    /// Top-level `{ "llms": [...] }` catalog with six-element score arrays.
    Catalog,
}

impl DatasetShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetShape::Keyed => "keyed",
            DatasetShape::Catalog => "catalog",
        }
    }
}

/// One normalized score cell: the aggregate plus the five TELeR level
/// scores in level order. Both external encodings collapse into this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempScores {
    pub average: f64,
    pub levels: [f64; 5],
}

#[derive(Debug, Clone)]
pub struct ModelEntry {
    pub id: String,
    pub display_name: Option<String>,
    /// Indexed `[bias][temperature]` by vocabulary position; `None` marks a
    /// missing data point for that combination.
    pub scores: Vec<Vec<Option<TempScores>>>,
}

impl ModelEntry {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub models: Vec<ModelEntry>,
    pub shape: DatasetShape,
    pub source_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub vocabulary: &'static Vocabulary,
    pub audits: Vec<CoverageAudit>,
}

/// Accepts either the dataset file itself or a directory searched for the
/// conventional file names.
pub fn find_dataset_path(input: &Path) -> Result<PathBuf, DatasetError> {
    if input.is_file() {
        return Ok(input.to_path_buf());
    }
    let candidates = [
        "data.json",
        "data.json.gz",
        "rankings.json",
        "rankings.json.gz",
    ];
    for name in candidates {
        let path = input.join(name);
        if path.exists() {
            return Ok(path);
        }
    }
    Err(DatasetError::MissingInput(format!(
        "no data.json(.gz) or rankings.json(.gz) under {}",
        input.display()
    )))
}

pub fn load_dataset(input: &Path) -> Result<LoadedDataset, DatasetError> {
    let path = find_dataset_path(input)?;
    let reader = reader::open_maybe_gz(&path)?;
    let raw: schema::RawDocument = serde_json::from_reader(reader)
        .map_err(|e| DatasetError::Parse(format!("{}: {}", path.display(), e)))?;

    let shape = raw.shape();
    let vocabulary = match shape {
        DatasetShape::Keyed => Vocabulary::keyed_v1(),
        DatasetShape::Catalog => Vocabulary::catalog_v1(),
    };

    let models = schema::normalize(raw, vocabulary);
    if models.is_empty() {
        return Err(DatasetError::InvalidInput(format!(
            "{} contains no models",
            path.display()
        )));
    }

    let dataset = Dataset {
        models,
        shape,
        source_path: path,
    };
    let audits = audit_coverage(&dataset, vocabulary);

    tracing::info!(
        "loaded dataset: path={}, shape={}, profile={}, models={}",
        dataset.source_path.display(),
        shape.as_str(),
        vocabulary.profile,
        dataset.models.len()
    );

    Ok(LoadedDataset {
        dataset,
        vocabulary,
        audits,
    })
}

pub fn audit_coverage(dataset: &Dataset, vocabulary: &Vocabulary) -> Vec<CoverageAudit> {
    let mut audits = Vec::with_capacity(vocabulary.biases.len());
    for (bias_idx, def) in vocabulary.biases.iter().enumerate() {
        let models_with_data = dataset
            .models
            .iter()
            .filter(|m| m.scores[bias_idx].iter().any(|cell| cell.is_some()))
            .count();
        audits.push(CoverageAudit {
            bias_key: def.key.to_string(),
            group: crate::vocab::group_id(def.group),
            models_with_data,
            models_total: dataset.models.len(),
        });
    }
    audits
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
