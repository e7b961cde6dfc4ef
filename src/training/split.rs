//! Seeded, label-stratified train/evaluation partitioning.

use std::collections::BTreeMap;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::model::label::PriorityLabel;

/// Row indices of each side of the split, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub evaluation: Vec<usize>,
}

/// Hold out roughly `test_fraction` of every label.
///
/// Every label keeps at least one training row, so a label with a single
/// example never reaches the evaluation side.
pub fn stratified_split(labels: &[PriorityLabel], test_fraction: f64, seed: u64) -> Split {
    let fraction = if test_fraction.is_finite() {
        test_fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut by_label: BTreeMap<PriorityLabel, Vec<usize>> = BTreeMap::new();
    for (index, label) in labels.iter().enumerate() {
        by_label.entry(*label).or_default().push(index);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut evaluation = Vec::new();
    for mut rows in by_label.into_values() {
        rows.shuffle(&mut rng);
        let holdout = ((rows.len() as f64 * fraction).round() as usize).min(rows.len() - 1);
        evaluation.extend_from_slice(&rows[..holdout]);
        train.extend_from_slice(&rows[holdout..]);
    }
    train.sort_unstable();
    evaluation.sort_unstable();
    Split { train, evaluation }
}
