//! HTTP layer exposing message classification.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::inference::PriorityService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PriorityService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/classify", post(routes::classify))
        .route("/classify/batch", post(routes::classify_batch))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(service: Arc<PriorityService>, host: String, port: u16) -> Result<()> {
    let router = router(AppState { service });
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving priority-triage API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
