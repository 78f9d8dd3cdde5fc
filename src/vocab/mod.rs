pub mod defs;

pub use defs::{BiasDef, BiasGroup, LEVEL_LABELS};

use defs::{CATALOG_BIASES, KEYED_BIASES, TEMPERATURES};

/// Per-dataset-shape configuration: the short-id to bias-key table, bulk
/// toggle groups, and the valid temperature keys with their default.
#[derive(Debug)]
pub struct Vocabulary {
    pub profile: &'static str,
    pub biases: &'static [BiasDef],
    pub temperatures: &'static [&'static str],
    pub default_temperature: usize,
}

static CATALOG_V1: Vocabulary = Vocabulary {
    profile: "catalog_v1",
    biases: CATALOG_BIASES,
    temperatures: TEMPERATURES,
    default_temperature: 1,
};

static KEYED_V1: Vocabulary = Vocabulary {
    profile: "keyed_v1",
    biases: KEYED_BIASES,
    temperatures: TEMPERATURES,
    default_temperature: 0,
};

impl Vocabulary {
    pub fn catalog_v1() -> &'static Vocabulary {
        &CATALOG_V1
    }

    pub fn keyed_v1() -> &'static Vocabulary {
        &KEYED_V1
    }

    pub fn bias_by_id(&self, id: &str) -> Option<usize> {
        self.biases.iter().position(|b| b.id == id)
    }

    pub fn bias_by_key(&self, key: &str) -> Option<usize> {
        self.biases.iter().position(|b| b.key == key)
    }

    pub fn temperature_index(&self, key: &str) -> Option<usize> {
        self.temperatures.iter().position(|&t| t == key)
    }

    pub fn group_members(&self, group: BiasGroup) -> Vec<usize> {
        self.biases
            .iter()
            .enumerate()
            .filter(|(_, b)| b.group == group)
            .map(|(idx, _)| idx)
            .collect()
    }
}

pub fn group_by_id(id: &str) -> Option<BiasGroup> {
    match id {
        "content" => Some(BiasGroup::Content),
        "cognitive" => Some(BiasGroup::Cognitive),
        "social" => Some(BiasGroup::Social),
        _ => None,
    }
}

pub fn group_id(group: BiasGroup) -> &'static str {
    match group {
        BiasGroup::Content => "content",
        BiasGroup::Cognitive => "cognitive",
        BiasGroup::Social => "social",
    }
}

/// How many models carry any data for a vocabulary bias, across all
/// temperatures. Surfaced in the summary report; never affects ranking.
#[derive(Debug, Clone)]
pub struct CoverageAudit {
    pub bias_key: String,
    pub group: &'static str,
    pub models_with_data: usize,
    pub models_total: usize,
}

#[cfg(test)]
#[path = "../../tests/src_inline/vocab/tests.rs"]
mod tests;
