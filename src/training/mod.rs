//! Offline training: corpus in, validated artifact and report out.

pub mod corpus;
pub mod report;
pub mod split;

use std::{
    collections::BTreeMap,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::{
    error::{Result, TriageError},
    model::{
        classifier::LogisticClassifier, label::PriorityLabel, store::ArtifactStore,
        ArtifactMetadata, ModelArtifact,
    },
    nlp::{normalize::NormalizedText, vectorizer::TfidfVectorizer},
};

use self::{
    corpus::{LabeledExample, LabeledMessage},
    report::{Evaluation, TrainingReport},
    split::stratified_split,
};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub seed: u64,
    /// Share of each label held out for evaluation.
    pub test_fraction: f64,
    pub vectorizer: TfidfVectorizer,
    pub classifier: LogisticClassifier,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            test_fraction: DEFAULT_TEST_FRACTION,
            vectorizer: TfidfVectorizer::default(),
            classifier: LogisticClassifier::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub artifact: ModelArtifact,
    pub report: TrainingReport,
}

/// Fit a fresh artifact on `corpus`.
///
/// The vectorizer and classifier only see the training side of a stratified
/// split; the held-out side feeds the report and nothing else. The same
/// corpus and seed always produce the same parameters.
pub fn train(corpus: &[LabeledMessage], config: &TrainingConfig) -> Result<TrainingOutcome> {
    if corpus.is_empty() {
        return Err(TriageError::EmptyCorpus);
    }
    let examples: Vec<LabeledExample> = corpus.iter().map(LabeledMessage::normalized).collect();
    let labels: Vec<PriorityLabel> = examples.iter().map(|ex| ex.priority).collect();

    let mut distribution: BTreeMap<PriorityLabel, usize> = BTreeMap::new();
    for label in &labels {
        *distribution.entry(*label).or_insert(0) += 1;
    }
    if distribution.len() < 2 {
        return Err(TriageError::InsufficientClasses {
            found: distribution.len(),
        });
    }
    info!(examples = examples.len(), ?distribution, "training priority model");

    let split = stratified_split(&labels, config.test_fraction, config.seed);
    let (train_texts, train_labels) = gather(&examples, &split.train);
    let (eval_texts, eval_labels) = gather(&examples, &split.evaluation);

    let vectorizer = config.vectorizer.fit(&train_texts)?;
    let train_features = vectorizer.transform_all(&train_texts);
    let classifier = config.classifier.fit(&train_features, &train_labels)?;

    let predicted: Vec<PriorityLabel> = eval_texts
        .iter()
        .map(|text| classifier.predict(&vectorizer.transform(text)))
        .collect();
    let evaluation = Evaluation::from_predictions(&eval_labels, &predicted);
    log_evaluation(&evaluation);

    let report = TrainingReport {
        seed: config.seed,
        training_examples: train_texts.len(),
        evaluation_examples: eval_texts.len(),
        vocabulary_size: vectorizer.dimension(),
        evaluation,
    };
    let metadata = ArtifactMetadata {
        seed: config.seed,
        training_examples: report.training_examples,
        evaluation_examples: report.evaluation_examples,
    };
    Ok(TrainingOutcome {
        artifact: ModelArtifact::new(metadata, vectorizer, classifier),
        report,
    })
}

/// Train under the store's lock and persist the result.
///
/// Nothing is written unless training succeeds, so a failed run leaves the
/// previous artifact in place.
pub fn train_and_save(
    corpus: &[LabeledMessage],
    config: &TrainingConfig,
    store: &ArtifactStore,
) -> Result<TrainingOutcome> {
    let _lock = TrainingLock::acquire(store.primary_path())?;
    let outcome = train(corpus, config)?;
    store.save(&outcome.artifact)?;
    Ok(outcome)
}

fn gather(
    examples: &[LabeledExample],
    rows: &[usize],
) -> (Vec<NormalizedText>, Vec<PriorityLabel>) {
    rows.iter()
        .map(|row| (examples[*row].text.clone(), examples[*row].priority))
        .unzip()
}

fn log_evaluation(evaluation: &Evaluation) {
    if evaluation.is_empty() {
        warn!("evaluation split is empty; held-out metrics are unavailable");
        return;
    }
    info!(
        accuracy = evaluation.accuracy,
        macro_precision = evaluation.macro_precision,
        macro_recall = evaluation.macro_recall,
        macro_f1 = evaluation.macro_f1,
        support = evaluation.support,
        "held-out evaluation"
    );
    for metrics in &evaluation.per_class {
        info!(
            label = %metrics.label,
            precision = metrics.precision,
            recall = metrics.recall,
            support = metrics.support,
            "class metrics"
        );
    }
}

/// Exclusive marker file guarding against overlapping training runs.
///
/// Removed on drop; a stale file left by a crashed run has to be deleted by
/// hand.
#[derive(Debug)]
pub struct TrainingLock {
    path: PathBuf,
}

impl TrainingLock {
    pub fn acquire(artifact_path: &Path) -> Result<Self> {
        let path = lock_path(artifact_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                let lock = Self { path };
                writeln!(file, "{}", std::process::id())?;
                Ok(lock)
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                Err(TriageError::TrainingInProgress { lock: path })
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TrainingLock {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), %err, "failed to release training lock");
        }
    }
}

fn lock_path(artifact_path: &Path) -> PathBuf {
    let mut name = artifact_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}
