use crate::model::rows::{LevelScore, RankedRow};
use crate::vocab::LEVEL_LABELS;

/// Descending by score. `sort_by` is stable, so equal scores keep their
/// candidate-list order; no secondary key.
pub fn sort_rows(rows: &mut [RankedRow]) {
    rows.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Display transform only: label the five level scores and re-sort them
/// descending. Does not touch the row's top-level rank, and the stable sort
/// makes the transform idempotent.
pub fn level_breakdown(row: &RankedRow) -> Vec<LevelScore> {
    let mut out: Vec<LevelScore> = row
        .level_scores
        .iter()
        .enumerate()
        .map(|(i, &score)| LevelScore {
            level: i + 1,
            label: LEVEL_LABELS[i],
            score,
        })
        .collect();
    out.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/rank.rs"]
mod tests;
