//! CLI entry-point for training and saving the priority model.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use priority_triage::{
    config::Settings,
    training::{self, corpus},
    PriorityService,
};
use tracing::{info, instrument};

/// Args for the `train` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// CSV file with `message` and `priority` columns; defaults to the
    /// built-in sample corpus.
    #[arg(long)]
    pub corpus: Option<PathBuf>,
    /// Override the split seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Override the vocabulary cap.
    #[arg(long)]
    pub max_features: Option<usize>,
    /// Override the held-out share per label.
    #[arg(long)]
    pub test_fraction: Option<f64>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let messages = match &args.corpus {
        Some(path) => corpus::load_csv(path)
            .with_context(|| format!("loading corpus {}", path.display()))?,
        None => {
            info!("no corpus given; using built-in sample corpus");
            corpus::sample_corpus()
        }
    };

    let mut config = settings.training_config();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(max_features) = args.max_features {
        config.vectorizer.max_features = max_features;
    }
    if let Some(test_fraction) = args.test_fraction {
        config.test_fraction = test_fraction;
    }

    let store = settings.store();
    let outcome = tokio::task::spawn_blocking(move || {
        training::train_and_save(&messages, &config, &store)
    })
    .await
    .context("training task panicked")?
    .context("training failed")?;

    let report_path = settings.join_output("training_report.json");
    let report_json = serde_json::to_vec_pretty(&outcome.report)?;
    tokio::fs::write(&report_path, report_json)
        .await
        .with_context(|| format!("writing {}", report_path.display()))?;
    info!(
        model = %settings.model_path.display(),
        report = %report_path.display(),
        "training complete"
    );
    println!("{}", outcome.report);

    let service = PriorityService::with_artifact(outcome.artifact, settings.default_priority);
    println!();
    for message in corpus::PROBE_MESSAGES {
        println!("{}\t{message}", service.classify(message));
    }
    Ok(())
}
