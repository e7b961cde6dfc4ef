//! CLI entry-point for serving the HTTP API.

use std::sync::Arc;

use anyhow::Result;
use clap::Args as ClapArgs;
use priority_triage::{api, config::Settings, PriorityService};
use tracing::{info, instrument};

/// Run the Axum server.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Port to bind (default 8080).
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Host address, defaults to localhost.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let service = Arc::new(PriorityService::new(
        settings.store(),
        settings.default_priority,
    ));
    let warming = Arc::clone(&service);
    let status = tokio::task::spawn_blocking(move || warming.warm_up()).await?;
    info!(%status, "priority model warmed up");
    api::serve(service, args.host, args.port).await
}
