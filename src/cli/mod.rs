//! Command-line interface wiring for priority-triage.

use anyhow::Result;
use clap::{Parser, Subcommand};
use priority_triage::config::Settings;

pub mod classify;
pub mod normalize;
pub mod serve;
pub mod train;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Support-message priority triage", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Train(args) => train::run(args, settings).await,
            Commands::Classify(args) => classify::run(args, settings).await,
            Commands::Normalize(args) => normalize::run(args).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fit the vectorizer and classifier, then save the model artifact.
    Train(train::Args),
    /// Print the predicted priority of each message.
    Classify(classify::Args),
    /// Show the normalized form of a message.
    Normalize(normalize::Args),
    /// Serve the JSON classification API.
    Serve(serve::Args),
}
