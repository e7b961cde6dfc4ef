//! Error taxonomy for training and model persistence.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::model::store::StoreError;

/// Failures raised by the training side of the pipeline.
///
/// Inference never surfaces these to callers; see [`crate::inference`].
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("corpus is empty or produced no vocabulary terms")]
    EmptyCorpus,
    #[error("at least 2 distinct priority labels are required, found {found}")]
    InsufficientClasses { found: usize },
    #[error("classifier fit failed: {0}")]
    Fit(String),
    #[error("feature matrix has an invalid shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("another training run holds {}", lock.display())]
    TrainingInProgress { lock: PathBuf },
    #[error("invalid corpus: {0}")]
    Corpus(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = TriageError> = std::result::Result<T, E>;
