//! Tracing setup.
//!
//! `--keys` runs log to stderr. The terminal UI owns the screen, so it only
//! logs when given a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, anyhow};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `DESKCALC_LOG=debug`.
pub const LOG_ENV: &str = "DESKCALC_LOG";
const DEFAULT_FILTER: &str = "warn";

pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Discard,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init(target: LogTarget<'_>) -> anyhow::Result<()> {
    match target {
        LogTarget::Discard => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!("failed to install logger: {err}")),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!("failed to install logger: {err}"))
        }
    }
}
