use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;

use crate::input::{DatasetShape, ModelEntry, TempScores};
use crate::vocab::Vocabulary;

/// The two external dataset encodings. Variant order matters: a catalog
/// document is recognized by its `llms` array, anything else falls through
/// to the keyed form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawDocument {
    Catalog(RawCatalog),
    Keyed(serde_json::Map<String, Value>),
}

#[derive(Debug, Deserialize)]
pub struct RawCatalog {
    pub llms: Vec<RawCatalogModel>,
}

#[derive(Debug, Deserialize)]
pub struct RawCatalogModel {
    pub name: String,
    #[serde(default)]
    pub bias_scores: BTreeMap<String, Value>,
}

impl RawDocument {
    pub fn shape(&self) -> DatasetShape {
        match self {
            RawDocument::Catalog(_) => DatasetShape::Catalog,
            RawDocument::Keyed(_) => DatasetShape::Keyed,
        }
    }
}

/// Resolves raw string keys through the vocabulary once, producing the
/// dense `[bias][temperature]` table the aggregator consumes. Malformed or
/// unrecognized entries narrow a single model's data, never the load.
pub fn normalize(doc: RawDocument, vocabulary: &Vocabulary) -> Vec<ModelEntry> {
    let mut unknown_keys: BTreeSet<String> = BTreeSet::new();
    let mut skipped_entries = 0usize;

    let models = match doc {
        RawDocument::Catalog(catalog) => catalog
            .llms
            .into_iter()
            .map(|m| {
                let scores = score_table(
                    &m.bias_scores,
                    vocabulary,
                    parse_array_entry,
                    &mut unknown_keys,
                    &mut skipped_entries,
                );
                ModelEntry {
                    id: m.name,
                    display_name: None,
                    scores,
                }
            })
            .collect(),
        RawDocument::Keyed(map) => {
            let mut out = Vec::with_capacity(map.len());
            for (id, value) in map {
                let Some(obj) = value.as_object() else {
                    tracing::warn!("model entry is not an object; skipping: model={}", id);
                    continue;
                };
                let display_name = obj
                    .get("displayName")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let biases: BTreeMap<String, Value> = obj
                    .iter()
                    .filter(|(key, _)| key.as_str() != "displayName")
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                let scores = score_table(
                    &biases,
                    vocabulary,
                    parse_named_entry,
                    &mut unknown_keys,
                    &mut skipped_entries,
                );
                out.push(ModelEntry {
                    id,
                    display_name,
                    scores,
                });
            }
            out
        }
    };

    if !unknown_keys.is_empty() {
        tracing::warn!(
            "dataset keys not in the {} vocabulary were ignored: {}",
            vocabulary.profile,
            unknown_keys.into_iter().collect::<Vec<_>>().join(", ")
        );
    }
    if skipped_entries > 0 {
        tracing::warn!("skipped {} malformed score entries", skipped_entries);
    }

    models
}

fn score_table(
    biases: &BTreeMap<String, Value>,
    vocabulary: &Vocabulary,
    parse: fn(&Value) -> Option<TempScores>,
    unknown_keys: &mut BTreeSet<String>,
    skipped_entries: &mut usize,
) -> Vec<Vec<Option<TempScores>>> {
    let mut table = vec![vec![None; vocabulary.temperatures.len()]; vocabulary.biases.len()];
    for (key, temps) in biases {
        let Some(bias_idx) = vocabulary.bias_by_key(key) else {
            unknown_keys.insert(key.clone());
            continue;
        };
        let Some(temps) = temps.as_object() else {
            *skipped_entries += 1;
            continue;
        };
        for (temp_key, entry) in temps {
            let Some(temp_idx) = vocabulary.temperature_index(temp_key) else {
                continue;
            };
            match parse(entry) {
                Some(cell) => table[bias_idx][temp_idx] = Some(cell),
                None => *skipped_entries += 1,
            }
        }
    }
    table
}

/// Object encoding: `{ "average": n, "level_1": n, ..., "level_5": n }`.
fn parse_named_entry(value: &Value) -> Option<TempScores> {
    let obj = value.as_object()?;
    let average = obj.get("average")?.as_f64()?;
    let mut levels = [0.0f64; 5];
    for (i, slot) in levels.iter_mut().enumerate() {
        *slot = obj.get(&format!("level_{}", i + 1))?.as_f64()?;
    }
    Some(TempScores { average, levels })
}

/// Array encoding: six numbers, levels first, the aggregate at index 5.
/// Anything that is not exactly six numbers is a malformed data point.
fn parse_array_entry(value: &Value) -> Option<TempScores> {
    let arr = value.as_array()?;
    if arr.len() != 6 {
        return None;
    }
    let mut nums = [0.0f64; 6];
    for (i, v) in arr.iter().enumerate() {
        nums[i] = v.as_f64()?;
    }
    Some(TempScores {
        average: nums[5],
        levels: [nums[0], nums[1], nums[2], nums[3], nums[4]],
    })
}
