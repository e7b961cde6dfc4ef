//! Runtime configuration utilities for priority-triage.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

use crate::{
    model::{
        classifier::LogisticClassifier,
        label::PriorityLabel,
        store::{ArtifactStore, DEFAULT_LEGACY_MODEL_PATH, DEFAULT_MODEL_PATH},
    },
    nlp::vectorizer::{TfidfVectorizer, DEFAULT_MAX_FEATURES},
    training::{TrainingConfig, DEFAULT_SEED, DEFAULT_TEST_FRACTION},
};

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Where training writes the artifact and inference reads it first.
    pub model_path: PathBuf,
    /// Read when `model_path` does not exist.
    pub legacy_model_path: PathBuf,
    /// Root folder for training reports.
    pub outputs_dir: PathBuf,
    /// Served while no model is available.
    pub default_priority: PriorityLabel,
    /// Vocabulary cap for the TF-IDF vectorizer.
    pub max_features: usize,
    /// Seed for the stratified evaluation split.
    pub seed: u64,
    /// Share of each label held out for evaluation.
    pub test_fraction: f64,
    /// Optimizer iteration cap for the logistic regression.
    pub max_iterations: u64,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let model_path = env::var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH));
        let legacy_model_path = env::var("LEGACY_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEGACY_MODEL_PATH));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));
        let default_priority = match env::var("DEFAULT_PRIORITY") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("parsing DEFAULT_PRIORITY={value}"))?,
            Err(_) => PriorityLabel::Medium,
        };
        let max_features = parse_var("MAX_FEATURES").unwrap_or(DEFAULT_MAX_FEATURES);
        let seed = parse_var("TRAIN_SEED").unwrap_or(DEFAULT_SEED);
        let test_fraction = parse_var("TEST_FRACTION").unwrap_or(DEFAULT_TEST_FRACTION);
        let max_iterations =
            parse_var("MAX_ITERATIONS").unwrap_or(LogisticClassifier::default().max_iterations);

        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;
        if let Some(parent) = model_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("creating model dir")?;
        }

        Ok(Self {
            model_path,
            legacy_model_path,
            outputs_dir,
            default_priority,
            max_features,
            seed,
            test_fraction,
            max_iterations,
        })
    }

    /// Artifact store over the configured primary and legacy paths.
    pub fn store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.model_path).with_legacy(&self.legacy_model_path)
    }

    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            seed: self.seed,
            test_fraction: self.test_fraction,
            vectorizer: TfidfVectorizer::with_max_features(self.max_features),
            classifier: LogisticClassifier {
                max_iterations: self.max_iterations,
                ..LogisticClassifier::default()
            },
        }
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
