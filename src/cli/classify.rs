//! CLI entry-point for classifying messages with the saved model.

use anyhow::Result;
use clap::Args as ClapArgs;
use priority_triage::{config::Settings, PriorityService, ServiceStatus};
use tracing::{instrument, warn};

/// Args for the `classify` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Messages to classify.
    #[arg(required = true)]
    pub messages: Vec<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let service = PriorityService::new(settings.store(), settings.default_priority);
    let (service, status) = tokio::task::spawn_blocking(move || {
        let status = service.warm_up();
        (service, status)
    })
    .await?;
    if let ServiceStatus::Degraded(reason) = status {
        warn!(?reason, "no trained model; every message gets the default priority");
    }
    for message in &args.messages {
        println!("{}\t{message}", service.classify(message));
    }
    Ok(())
}
