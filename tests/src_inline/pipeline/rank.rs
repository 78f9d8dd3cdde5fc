use super::{level_breakdown, sort_rows};
use crate::model::rows::RankedRow;
use crate::vocab::LEVEL_LABELS;

fn row(name: &str, score: f64, level_scores: [f64; 5]) -> RankedRow {
    RankedRow {
        name: name.to_string(),
        score,
        level_scores,
    }
}

#[test]
fn test_sort_rows_descending_stable() {
    let mut rows = vec![
        row("a", 0.5, [0.5; 5]),
        row("b", 0.9, [0.9; 5]),
        row("c", 0.5, [0.5; 5]),
    ];
    sort_rows(&mut rows);
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn test_level_breakdown_sorted_by_score() {
    let breakdown = level_breakdown(&row("a", 0.5, [0.1, 0.5, 0.9, 0.3, 0.2]));
    let levels: Vec<usize> = breakdown.iter().map(|l| l.level).collect();
    assert_eq!(levels, vec![3, 2, 4, 5, 1]);
    assert_eq!(breakdown[0].label, LEVEL_LABELS[2]);
    assert!((breakdown[0].score - 0.9).abs() < 1e-12);
}

#[test]
fn test_level_breakdown_labels_fixed_per_level() {
    // The same level keeps its label wherever it lands in the ordering.
    let breakdown = level_breakdown(&row("a", 0.5, [0.9, 0.1, 0.2, 0.3, 0.5]));
    let level_one = breakdown.iter().find(|l| l.level == 1).unwrap();
    assert_eq!(level_one.label, "Level 1 - Minimum Details");
    assert_eq!(breakdown[0].level, 1);
}

#[test]
fn test_level_breakdown_ties_keep_level_order() {
    let breakdown = level_breakdown(&row("a", 0.5, [0.5; 5]));
    let levels: Vec<usize> = breakdown.iter().map(|l| l.level).collect();
    assert_eq!(levels, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_level_breakdown_idempotent() {
    let first = level_breakdown(&row("a", 0.5, [0.4, 0.4, 0.9, 0.1, 0.4]));
    let mut second = first.clone();
    second.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    assert_eq!(first, second);
}
