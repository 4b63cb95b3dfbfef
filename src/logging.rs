// src/logging.rs
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE: &str = "prospector.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "prospector=error",
            Verbosity::Normal => "prospector=info",
            Verbosity::Verbose => "prospector=debug",
        }
    }
}

/// Human-readable lines on stderr plus JSON lines in `<output>/logs/prospector.log`.
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn init(output_dir: &Path, verbosity: Verbosity) -> Result<()> {
    let log_dir = output_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let log_path = log_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true).directive(), "prospector=debug");
        assert_eq!(Verbosity::from_flags(false, false).directive(), "prospector=info");
    }
}
