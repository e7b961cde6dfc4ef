//! Trained model bundle: vectorizer and classifier versioned as one unit.

pub mod classifier;
pub mod label;
pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::nlp::{
    normalize::{normalize, NormalizedText},
    vectorizer::{FeatureVector, VectorizerState},
};

use self::{classifier::ClassifierState, label::PriorityLabel};

/// Bumped whenever the serialized layout changes.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Provenance recorded alongside the learned parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub seed: u64,
    pub training_examples: usize,
    pub evaluation_examples: usize,
}

/// A fitted vectorizer paired with the classifier trained on its output.
///
/// Only the training pipeline and [`store::ArtifactStore::load`] produce
/// values of this type, and deserialization re-checks that both halves agree
/// on the feature dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ArtifactRecord")]
pub struct ModelArtifact {
    format_version: u32,
    metadata: ArtifactMetadata,
    vectorizer: VectorizerState,
    classifier: ClassifierState,
}

impl ModelArtifact {
    pub(crate) fn new(
        metadata: ArtifactMetadata,
        vectorizer: VectorizerState,
        classifier: ClassifierState,
    ) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            metadata,
            vectorizer,
            classifier,
        }
    }

    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }

    pub fn vectorizer(&self) -> &VectorizerState {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &ClassifierState {
        &self.classifier
    }

    pub fn features(&self, text: &NormalizedText) -> FeatureVector {
        self.vectorizer.transform(text)
    }

    pub fn predict_normalized(&self, text: &NormalizedText) -> PriorityLabel {
        self.classifier.predict(&self.features(text))
    }

    /// Normalize, vectorize and classify a raw message.
    pub fn predict(&self, raw: &str) -> PriorityLabel {
        self.predict_normalized(&normalize(raw))
    }
}

/// Why a decoded artifact was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtifactRejected {
    #[error("artifact format version {found} is not supported (expected {expected})")]
    IncompatibleVersion { found: u32, expected: u32 },
    #[error("vectorizer produces {vectorizer} features but classifier expects {classifier}")]
    DimensionMismatch { vectorizer: usize, classifier: usize },
    #[error("classifier parameters do not match its label set")]
    MalformedClassifier,
}

/// On-disk layout of [`ModelArtifact`] before validation.
#[derive(Debug, Deserialize)]
pub struct ArtifactRecord {
    format_version: u32,
    metadata: ArtifactMetadata,
    vectorizer: VectorizerState,
    classifier: ClassifierState,
}

impl TryFrom<ArtifactRecord> for ModelArtifact {
    type Error = ArtifactRejected;

    fn try_from(record: ArtifactRecord) -> Result<Self, Self::Error> {
        if record.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactRejected::IncompatibleVersion {
                found: record.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }
        if !record.classifier.is_well_formed() {
            return Err(ArtifactRejected::MalformedClassifier);
        }
        if record.vectorizer.dimension() != record.classifier.dimension() {
            return Err(ArtifactRejected::DimensionMismatch {
                vectorizer: record.vectorizer.dimension(),
                classifier: record.classifier.dimension(),
            });
        }
        Ok(Self {
            format_version: record.format_version,
            metadata: record.metadata,
            vectorizer: record.vectorizer,
            classifier: record.classifier,
        })
    }
}
