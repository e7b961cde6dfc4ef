//! Online classification over a lazily loaded, cached model artifact.

use std::fmt;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::model::{label::PriorityLabel, store::ArtifactStore, ModelArtifact};

/// Why the service is answering with its default label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedReason {
    /// No artifact at the primary or legacy location.
    NotFound,
    /// An artifact exists but could not be read or was rejected.
    LoadFailed,
}

/// Observable lifecycle of a [`PriorityService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Unloaded,
    Ready,
    Degraded(DegradedReason),
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Ready => "ready",
            Self::Degraded(_) => "degraded",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
enum ModelState {
    Ready(ModelArtifact),
    Degraded(DegradedReason),
}

/// Classifies raw messages, never failing.
///
/// The first call (or [`PriorityService::warm_up`]) loads the artifact
/// exactly once; concurrent callers wait for that single load. If no usable
/// artifact exists every message gets the default label. The cached artifact
/// is kept until [`PriorityService::reset`].
#[derive(Debug)]
pub struct PriorityService {
    store: Option<ArtifactStore>,
    default_label: PriorityLabel,
    state: OnceCell<ModelState>,
}

impl PriorityService {
    pub fn new(store: ArtifactStore, default_label: PriorityLabel) -> Self {
        Self {
            store: Some(store),
            default_label,
            state: OnceCell::new(),
        }
    }

    /// Service that starts `Ready` with an in-memory artifact and no backing
    /// store; after a reset it degrades to the default label.
    pub fn with_artifact(artifact: ModelArtifact, default_label: PriorityLabel) -> Self {
        let state = OnceCell::new();
        let _ = state.set(ModelState::Ready(artifact));
        Self {
            store: None,
            default_label,
            state,
        }
    }

    pub fn default_label(&self) -> PriorityLabel {
        self.default_label
    }

    pub fn status(&self) -> ServiceStatus {
        match self.state.get() {
            None => ServiceStatus::Unloaded,
            Some(ModelState::Ready(_)) => ServiceStatus::Ready,
            Some(ModelState::Degraded(reason)) => ServiceStatus::Degraded(*reason),
        }
    }

    /// Load the artifact now instead of on the first request.
    pub fn warm_up(&self) -> ServiceStatus {
        self.state();
        self.status()
    }

    /// The cached artifact, loading it if necessary.
    pub fn artifact(&self) -> Option<&ModelArtifact> {
        match self.state() {
            ModelState::Ready(artifact) => Some(artifact),
            ModelState::Degraded(_) => None,
        }
    }

    /// Priority for `raw`; the default label while degraded.
    pub fn classify(&self, raw: &str) -> PriorityLabel {
        match self.state() {
            ModelState::Ready(artifact) => artifact.predict(raw),
            ModelState::Degraded(_) => self.default_label,
        }
    }

    /// Drop the cached artifact so the next call loads from the store again.
    pub fn reset(&mut self) {
        if self.state.take().is_some() {
            debug!("priority model cache cleared");
        }
    }

    fn state(&self) -> &ModelState {
        self.state.get_or_init(|| self.load())
    }

    fn load(&self) -> ModelState {
        let Some(store) = &self.store else {
            warn!(default = %self.default_label, "no artifact store configured; serving default priority");
            return ModelState::Degraded(DegradedReason::NotFound);
        };
        match store.load() {
            Ok(artifact) => {
                info!(
                    vocabulary = artifact.vectorizer().dimension(),
                    classes = ?artifact.classifier().classes(),
                    "priority model ready"
                );
                ModelState::Ready(artifact)
            }
            Err(err) if err.is_not_found() => {
                warn!(%err, default = %self.default_label, "model artifact missing; serving default priority");
                ModelState::Degraded(DegradedReason::NotFound)
            }
            Err(err) => {
                error!(%err, default = %self.default_label, "model artifact unusable; serving default priority");
                ModelState::Degraded(DegradedReason::LoadFailed)
            }
        }
    }
}
