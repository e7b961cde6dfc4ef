//! CLI entry-point for previewing text normalization.

use anyhow::Result;
use clap::Args as ClapArgs;
use priority_triage::normalize;
use tracing::instrument;

/// Args for the `normalize` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Raw message text.
    pub text: String,
}

#[instrument]
pub async fn run(args: Args) -> Result<()> {
    println!("{}", normalize(&args.text));
    Ok(())
}
