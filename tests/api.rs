mod common;

use std::sync::Arc;

use axum::{extract::State, Json};
use priority_triage::{
    api::{
        routes,
        types::{BatchRequest, ClassifyRequest},
        AppState,
    },
    ArtifactStore, DegradedReason, PriorityLabel, PriorityService,
};
use tempfile::tempdir;

use common::scenario_artifact;

fn ready_state() -> AppState {
    AppState {
        service: Arc::new(PriorityService::with_artifact(
            scenario_artifact(),
            PriorityLabel::Medium,
        )),
    }
}

#[tokio::test]
async fn classify_returns_model_label() {
    let Json(response) = routes::classify(
        State(ready_state()),
        Json(ClassifyRequest {
            text: "Server down again!".into(),
        }),
    )
    .await;
    assert_eq!(response.priority, PriorityLabel::High);
    assert_eq!(response.model, "ready");
    assert_eq!(response.text, "Server down again!");
}

#[tokio::test]
async fn batch_lists_most_urgent_first() {
    let texts = vec![
        "suggestion for the menu".to_string(),
        "printer not working".to_string(),
        "email server down".to_string(),
    ];
    let Json(responses) =
        routes::classify_batch(State(ready_state()), Json(BatchRequest { texts })).await;
    let priorities: Vec<PriorityLabel> = responses.iter().map(|r| r.priority).collect();
    assert_eq!(
        priorities,
        vec![PriorityLabel::High, PriorityLabel::Medium, PriorityLabel::Low]
    );
    assert_eq!(responses[0].text, "email server down");
}

#[tokio::test]
async fn health_reports_degraded_service() {
    let dir = tempdir().unwrap();
    let service = PriorityService::new(
        ArtifactStore::new(dir.path().join("priority_model.json")),
        PriorityLabel::Low,
    );
    service.warm_up();
    let Json(health) = routes::health(State(AppState {
        service: Arc::new(service),
    }))
    .await;
    assert_eq!(health.model, "degraded");
    assert_eq!(health.degraded_reason, Some(DegradedReason::NotFound));
    assert_eq!(health.default_priority, PriorityLabel::Low);

    let body = serde_json::to_value(&health).unwrap();
    assert_eq!(body["degraded_reason"], "not_found");
}

#[tokio::test]
async fn health_omits_reason_when_ready() {
    let Json(health) = routes::health(State(ready_state())).await;
    assert_eq!(health.model, "ready");
    let body = serde_json::to_value(&health).unwrap();
    assert!(body.get("degraded_reason").is_none());
}
