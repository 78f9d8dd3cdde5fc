use std::collections::BTreeSet;

use crate::vocab::{BiasGroup, Vocabulary};

/// The active bias set plus the active temperature, both as vocabulary
/// indices. Always an explicit value passed into the aggregator, never
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub active: BTreeSet<usize>,
    pub temperature: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    ToggleBias(usize),
    SetGroup { group: BiasGroup, on: bool },
    SetAll(bool),
    SetTemperature(usize),
}

impl Selection {
    /// The startup state of the original page: every bias checked, the
    /// profile's default temperature.
    pub fn all_on(vocabulary: &Vocabulary) -> Self {
        Self {
            active: (0..vocabulary.biases.len()).collect(),
            temperature: vocabulary.default_temperature,
        }
    }

    pub fn none(vocabulary: &Vocabulary) -> Self {
        Self {
            active: BTreeSet::new(),
            temperature: vocabulary.default_temperature,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn apply(&mut self, event: SelectionEvent, vocabulary: &Vocabulary) {
        match event {
            SelectionEvent::ToggleBias(bias) => {
                if bias >= vocabulary.biases.len() {
                    tracing::warn!("toggle for bias index {} out of range; ignored", bias);
                    return;
                }
                if !self.active.remove(&bias) {
                    self.active.insert(bias);
                }
            }
            SelectionEvent::SetGroup { group, on } => {
                for bias in vocabulary.group_members(group) {
                    if on {
                        self.active.insert(bias);
                    } else {
                        self.active.remove(&bias);
                    }
                }
            }
            SelectionEvent::SetAll(on) => {
                if on {
                    self.active = (0..vocabulary.biases.len()).collect();
                } else {
                    self.active.clear();
                }
            }
            SelectionEvent::SetTemperature(temperature) => {
                if temperature >= vocabulary.temperatures.len() {
                    tracing::warn!(
                        "temperature index {} out of range; keeping {}",
                        temperature,
                        vocabulary.temperatures[self.temperature]
                    );
                    return;
                }
                self.temperature = temperature;
            }
        }
    }

    pub fn active_keys(&self, vocabulary: &Vocabulary) -> Vec<&'static str> {
        self.active
            .iter()
            .filter_map(|&idx| vocabulary.biases.get(idx).map(|b| b.key))
            .collect()
    }
}
