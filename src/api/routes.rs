//! HTTP route handlers for Axum.

use axum::{extract::State, Json};

use crate::{
    api::types::{BatchRequest, ClassifyRequest, ClassifyResponse, HealthResponse},
    inference::{PriorityService, ServiceStatus},
    model::label::sort_by_urgency,
};

use super::AppState;

pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    Json(respond(&state.service, request.text))
}

/// Classify several messages; the response lists the most urgent first.
pub async fn classify_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Json<Vec<ClassifyResponse>> {
    let mut results: Vec<ClassifyResponse> = request
        .texts
        .into_iter()
        .map(|text| respond(&state.service, text))
        .collect();
    sort_by_urgency(&mut results, |result| result.priority);
    Json(results)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = state.service.status();
    let degraded_reason = match status {
        ServiceStatus::Degraded(reason) => Some(reason),
        _ => None,
    };
    Json(HealthResponse {
        model: status.as_str(),
        degraded_reason,
        default_priority: state.service.default_label(),
    })
}

fn respond(service: &PriorityService, text: String) -> ClassifyResponse {
    let priority = service.classify(&text);
    ClassifyResponse {
        model: service.status().as_str(),
        priority,
        text,
    }
}
