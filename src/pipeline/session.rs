use crate::input::Dataset;
use crate::model::rows::Aggregation;
use crate::model::selection::{Selection, SelectionEvent};
use crate::pipeline::aggregate::{AggregateInputs, run_aggregate};
use crate::vocab::Vocabulary;

/// Owns the immutable dataset and the mutable selection. Every event is
/// processed to completion (mutate, recompute the full ranking, return), so
/// each recomputation is fully visible before the next event. A session
/// cannot exist without a loaded dataset, which rules out events racing the
/// initial load.
#[derive(Debug)]
pub struct Session {
    dataset: Dataset,
    vocabulary: &'static Vocabulary,
    selection: Selection,
    current: Aggregation,
    recomputes: u64,
}

impl Session {
    /// Starts the way the original page does: all biases on, default
    /// temperature.
    pub fn new(dataset: Dataset, vocabulary: &'static Vocabulary) -> Self {
        Self::with_selection(dataset, vocabulary, Selection::all_on(vocabulary))
    }

    pub fn with_selection(
        dataset: Dataset,
        vocabulary: &'static Vocabulary,
        selection: Selection,
    ) -> Self {
        let current = run_aggregate(&AggregateInputs {
            dataset: &dataset,
            selection: &selection,
        });
        Self {
            dataset,
            vocabulary,
            selection,
            current,
            recomputes: 1,
        }
    }

    pub fn apply(&mut self, event: SelectionEvent) -> &Aggregation {
        self.selection.apply(event, self.vocabulary);
        self.current = run_aggregate(&AggregateInputs {
            dataset: &self.dataset,
            selection: &self.selection,
        });
        self.recomputes += 1;
        &self.current
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn vocabulary(&self) -> &'static Vocabulary {
        self.vocabulary
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn current(&self) -> &Aggregation {
        &self.current
    }

    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/session.rs"]
mod tests;
