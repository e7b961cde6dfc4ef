//! Entry point wiring CLI dispatch to the triage pipeline.

mod cli;

use anyhow::Result;
use cli::Cli;
use priority_triage::{config::Settings, logging};
use tracing::{info, instrument};

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing()?;
    let settings = Settings::load()?;

    info!(?cli, "starting command");
    cli.dispatch(settings).await
}
