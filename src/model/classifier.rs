//! Class-balanced multinomial logistic regression over TF-IDF rows.

use std::collections::BTreeMap;

use linfa::{dataset::DatasetBase, prelude::Fit};
use linfa_logistic::MultiLogisticRegression;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Result, TriageError},
    model::label::PriorityLabel,
    nlp::vectorizer::FeatureVector,
};

/// Upper bound on `replicated rows / original rows` for exact balancing.
const REPLICATION_BUDGET: usize = 16;
/// Multiplier used when exact balancing would exceed the budget.
const ROUNDED_RESOLUTION: f64 = 4.0;

/// Training parameters for [`ClassifierState`].
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    /// L2 penalty applied to the class-weighted loss.
    pub alpha: f64,
    pub max_iterations: u64,
    pub gradient_tolerance: f64,
}

impl Default for LogisticClassifier {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            max_iterations: 100,
            gradient_tolerance: 1e-4,
        }
    }
}

impl LogisticClassifier {
    /// Fit one weight column per label present in `labels`.
    ///
    /// Each class contributes the same total weight to the loss regardless of
    /// how many examples it has.
    pub fn fit(
        &self,
        features: &[FeatureVector],
        labels: &[PriorityLabel],
    ) -> Result<ClassifierState> {
        if features.len() != labels.len() {
            return Err(TriageError::Fit(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        let Some(first) = features.first() else {
            return Err(TriageError::EmptyCorpus);
        };
        let dimension = first.dimension();
        if dimension == 0 {
            return Err(TriageError::EmptyCorpus);
        }
        if let Some(row) = features.iter().find(|row| row.dimension() != dimension) {
            return Err(TriageError::Fit(format!(
                "feature rows disagree on dimension ({} vs {dimension})",
                row.dimension()
            )));
        }

        let mut counts: BTreeMap<PriorityLabel, usize> = BTreeMap::new();
        for label in labels {
            *counts.entry(*label).or_insert(0) += 1;
        }
        if counts.len() < 2 {
            return Err(TriageError::InsufficientClasses {
                found: counts.len(),
            });
        }

        let class_counts: Vec<usize> = counts.values().copied().collect();
        let multiplicities: BTreeMap<PriorityLabel, usize> = counts
            .keys()
            .copied()
            .zip(balanced_multiplicities(&class_counts))
            .collect();

        let mut flat = Vec::new();
        let mut targets = Vec::new();
        for (row, label) in features.iter().zip(labels) {
            for _ in 0..multiplicities[label] {
                flat.extend(row.as_array().iter().copied());
                targets.push(label.index());
            }
        }
        let rows = targets.len();
        let records = Array2::from_shape_vec((rows, dimension), flat)?;
        let dataset = DatasetBase::new(records, Array1::from(targets));

        // The solver sums the loss over rows, so replication scales the data
        // term by rows / n; scaling the penalty the same way keeps the
        // weighted objective intact.
        let alpha = self.alpha * rows as f64 / labels.len() as f64;
        debug!(
            examples = labels.len(),
            replicated_rows = rows,
            alpha,
            ?multiplicities,
            "fitting logistic regression"
        );

        let fitted = MultiLogisticRegression::<f64>::default()
            .alpha(alpha)
            .max_iterations(self.max_iterations)
            .gradient_tolerance(self.gradient_tolerance)
            .fit(&dataset)
            .map_err(|err| TriageError::Fit(err.to_string()))?;

        let classes = fitted
            .classes()
            .iter()
            .map(|index| {
                PriorityLabel::from_index(*index)
                    .ok_or_else(|| TriageError::Fit(format!("unexpected class index {index}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ClassifierState {
            classes,
            coefficients: fitted.params().clone(),
            intercepts: fitted.intercept().clone(),
        })
    }
}

/// Learned linear decision function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierState {
    /// Labels seen at fit time, in column order.
    classes: Vec<PriorityLabel>,
    /// Shape `(features, classes)`.
    coefficients: Array2<f64>,
    intercepts: Array1<f64>,
}

impl ClassifierState {
    pub fn classes(&self) -> &[PriorityLabel] {
        &self.classes
    }

    /// Number of input features the coefficients expect.
    pub fn dimension(&self) -> usize {
        self.coefficients.nrows()
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        !self.classes.is_empty()
            && self.coefficients.ncols() == self.classes.len()
            && self.intercepts.len() == self.classes.len()
    }

    /// Raw linear scores, one per entry of [`Self::classes`].
    pub fn decision_scores(&self, features: &FeatureVector) -> Array1<f64> {
        debug_assert_eq!(features.dimension(), self.dimension());
        let mut scores = self.intercepts.clone();
        for (weights, value) in self
            .coefficients
            .outer_iter()
            .zip(features.as_array().iter())
        {
            if *value != 0.0 {
                scores.scaled_add(*value, &weights);
            }
        }
        scores
    }

    /// Highest-scoring label; ties go to the less urgent label.
    pub fn predict(&self, features: &FeatureVector) -> PriorityLabel {
        let scores = self.decision_scores(features);
        let mut best: Option<(usize, f64)> = None;
        for (index, score) in scores.iter().copied().enumerate() {
            if score.is_nan() {
                continue;
            }
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((index, score));
            }
        }
        let index = best.map(|(index, _)| index).unwrap_or(0);
        self.classes.get(index).copied().unwrap_or_default()
    }
}

/// Per-class replication counts that equalise total class weight.
///
/// Exact (`lcm / count`) while the replicated corpus stays within
/// [`REPLICATION_BUDGET`] times the original, otherwise rounded at
/// [`ROUNDED_RESOLUTION`].
fn balanced_multiplicities(counts: &[usize]) -> Vec<usize> {
    let total: usize = counts.iter().sum();
    let budget = total.saturating_mul(REPLICATION_BUDGET);
    let exact = counts.iter().try_fold(1usize, |acc, &count| {
        let next = lcm(acc, count)?;
        (next.saturating_mul(counts.len()) <= budget).then_some(next)
    });

    let multiplicities: Vec<usize> = match exact {
        Some(lcm) => counts.iter().map(|count| lcm / count).collect(),
        None => {
            let largest = counts.iter().copied().max().unwrap_or(1) as f64;
            counts
                .iter()
                .map(|&count| {
                    let ratio = ROUNDED_RESOLUTION * largest / count as f64;
                    (ratio.round() as usize).max(1)
                })
                .collect()
        }
    };
    let common = multiplicities.iter().copied().fold(0, gcd).max(1);
    multiplicities.into_iter().map(|m| m / common).collect()
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: usize, b: usize) -> Option<usize> {
    if a == 0 || b == 0 {
        return None;
    }
    (a / gcd(a, b)).checked_mul(b)
}
