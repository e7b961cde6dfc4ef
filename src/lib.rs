//! Support-message priority triage.
//!
//! Raw text is normalized, mapped onto a TF-IDF vocabulary and scored by a
//! class-balanced logistic regression that picks `low`, `medium` or `high`.
//! [`training`] produces the model artifact offline and
//! [`inference::PriorityService`] serves it.

pub mod api;
pub mod config;
pub mod error;
pub mod inference;
pub mod logging;
pub mod model;
pub mod nlp;
pub mod training;

pub use error::{Result, TriageError};
pub use inference::{DegradedReason, PriorityService, ServiceStatus};
pub use model::{label::PriorityLabel, store::ArtifactStore, ModelArtifact};
pub use nlp::normalize::{normalize, NormalizedText};
