//! Held-out evaluation metrics reported after training.

use std::fmt;

use serde::Serialize;

use crate::model::label::PriorityLabel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: PriorityLabel,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Evaluation rows whose true label is `label`.
    pub support: usize,
}

/// Per-class precision and recall over one set of predictions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// One entry per label, most urgent first.
    pub per_class: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_f1: f64,
    pub support: usize,
}

impl Evaluation {
    /// Compare `predicted` against `expected` row by row.
    ///
    /// Ratios with a zero denominator are reported as 0. Macro averages only
    /// include labels that were either expected or predicted at least once.
    pub fn from_predictions(expected: &[PriorityLabel], predicted: &[PriorityLabel]) -> Self {
        let pairs: Vec<(PriorityLabel, PriorityLabel)> = expected
            .iter()
            .copied()
            .zip(predicted.iter().copied())
            .collect();
        let support = pairs.len();
        let correct = pairs.iter().filter(|(truth, guess)| truth == guess).count();

        let mut per_class = Vec::with_capacity(PriorityLabel::ALL.len());
        let mut observed = Vec::new();
        for label in PriorityLabel::ALL.iter().rev().copied() {
            let true_positive = pairs
                .iter()
                .filter(|(truth, guess)| *truth == label && *guess == label)
                .count();
            let label_support = pairs.iter().filter(|(truth, _)| *truth == label).count();
            let label_predicted = pairs.iter().filter(|(_, guess)| *guess == label).count();

            let precision = ratio(true_positive, label_predicted);
            let recall = ratio(true_positive, label_support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            let metrics = ClassMetrics {
                label,
                precision,
                recall,
                f1,
                support: label_support,
            };
            if label_support > 0 || label_predicted > 0 {
                observed.push(metrics.clone());
            }
            per_class.push(metrics);
        }

        let mean = |value: fn(&ClassMetrics) -> f64| {
            if observed.is_empty() {
                0.0
            } else {
                observed.iter().map(value).sum::<f64>() / observed.len() as f64
            }
        };

        Self {
            macro_precision: mean(|m| m.precision),
            macro_recall: mean(|m| m.recall),
            macro_f1: mean(|m| m.f1),
            accuracy: ratio(correct, support),
            per_class,
            support,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.support == 0
    }

    pub fn class(&self, label: PriorityLabel) -> Option<&ClassMetrics> {
        self.per_class.iter().find(|metrics| metrics.label == label)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Diagnostic summary of one training run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub seed: u64,
    pub training_examples: usize,
    pub evaluation_examples: usize,
    pub vocabulary_size: usize,
    pub evaluation: Evaluation,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<12}{:>9}{:>10}{:>10}{:>10}",
            "label", "precision", "recall", "f1-score", "support"
        )?;
        for m in &self.per_class {
            writeln!(
                f,
                "{:<12}{:>9.2}{:>10.2}{:>10.2}{:>10}",
                m.label.as_str(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            )?;
        }
        writeln!(
            f,
            "{:<12}{:>9}{:>10}{:>10.2}{:>10}",
            "accuracy", "", "", self.accuracy, self.support
        )?;
        write!(
            f,
            "{:<12}{:>9.2}{:>10.2}{:>10.2}{:>10}",
            "macro avg", self.macro_precision, self.macro_recall, self.macro_f1, self.support
        )
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "seed {} | train {} | eval {} | vocabulary {}",
            self.seed, self.training_examples, self.evaluation_examples, self.vocabulary_size
        )?;
        write!(f, "{}", self.evaluation)
    }
}
