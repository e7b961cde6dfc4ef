//! Structured logging bootstrap using `tracing`.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "info,tower_http=warn";

/// Install a global tracing subscriber writing to stderr.
///
/// Stdout stays reserved for command output such as predicted labels.
pub fn init_tracing() -> Result<()> {
    init_tracing_with(DEFAULT_DIRECTIVES)
}

/// Like [`init_tracing`] with explicit fallback directives. A no-op when a
/// subscriber is already installed.
pub fn init_tracing_with(directives: &str) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(directives))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_level(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(fmt_layer).try_init()?;

    tracing::debug!(directives, "tracing initialised");
    Ok(())
}
