use crate::input::Dataset;
use crate::model::rows::{Aggregation, RankedRow};
use crate::model::selection::Selection;
use crate::pipeline::rank::sort_rows;

#[derive(Debug, Clone)]
pub struct AggregateInputs<'a> {
    pub dataset: &'a Dataset,
    pub selection: &'a Selection,
}

/// Pure: (dataset, selection) -> ranked rows. A missing data point narrows
/// one model's contributing set; a model with no contributing bias at all
/// is dropped from the output.
pub fn run_aggregate(inputs: &AggregateInputs<'_>) -> Aggregation {
    let selection = inputs.selection;
    if selection.is_empty() {
        return Aggregation::NoSelection;
    }

    let mut rows = Vec::new();
    for model in &inputs.dataset.models {
        let mut finals: Vec<f64> = Vec::new();
        let mut levels: [Vec<f64>; 5] = Default::default();

        for &bias in &selection.active {
            let cell = model
                .scores
                .get(bias)
                .and_then(|temps| temps.get(selection.temperature))
                .copied()
                .flatten();
            let Some(cell) = cell else {
                continue;
            };
            finals.push(cell.average);
            for (i, acc) in levels.iter_mut().enumerate() {
                acc.push(cell.levels[i]);
            }
        }

        if finals.is_empty() {
            continue;
        }

        // Each level mean keeps its own denominator.
        let mut level_scores = [0.0f64; 5];
        for (i, acc) in levels.iter().enumerate() {
            level_scores[i] = mean(acc);
        }

        rows.push(RankedRow {
            name: model.label().to_string(),
            score: mean(&finals),
            level_scores,
        });
    }

    sort_rows(&mut rows);
    Aggregation::Ranked(rows)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/aggregate.rs"]
mod tests;
