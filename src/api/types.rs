//! Request and response bodies for the JSON API.

use serde::{Deserialize, Serialize};

use crate::{inference::DegradedReason, model::label::PriorityLabel};

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    pub texts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifyResponse {
    pub text: String,
    pub priority: PriorityLabel,
    /// `ready` when a trained model answered, `degraded` for the default label.
    pub model: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponse {
    pub model: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<DegradedReason>,
    pub default_priority: PriorityLabel,
}
