//! Logging setup.
//!
//! The TUI owns the terminal, so while it runs logs go to a daily rolling
//! file under `~/.prompt-wizard/logs/`. Plain subcommands log to stderr.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LoggingConfig, wizard_home};

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Rolling file (interactive mode)
    File,
    Stderr,
}

/// Default log directory: `~/.prompt-wizard/logs`
pub fn log_dir() -> PathBuf {
    wizard_home().join("logs")
}

/// Filter directive: `RUST_LOG` wins, then `--debug`, then the config level
fn filter_directive(config: &LoggingConfig, debug: bool, rust_log: Option<String>) -> String {
    if let Some(env) = rust_log.filter(|v| !v.trim().is_empty()) {
        return env;
    }
    let level = if debug { "debug" } else { config.level.as_str() };
    format!("prompt_wizard={level},warn")
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(config: &LoggingConfig, debug: bool, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let directive = filter_directive(config, debug, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{}'", directive))?;

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .try_init()
                .context("Failed to install tracing subscriber")?;
            Ok(None)
        }
        LogTarget::File => {
            let (dir, prefix) = file_location(config.file.as_deref());
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::daily(&dir, &prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .try_init()
                .context("Failed to install tracing subscriber")?;

            tracing::info!("Logging to {}/{}.*", dir.display(), prefix);
            Ok(Some(guard))
        }
    }
}

/// Split a configured log file into directory and file-name prefix
fn file_location(file: Option<&Path>) -> (PathBuf, String) {
    match file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            let prefix = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "prompt-wizard.log".to_string());
            (dir, prefix)
        }
        None => (log_dir(), "prompt-wizard.log".to_string()),
    }
}
