//! Tracing subscriber setup
//!
//! Log output always goes to stderr so stdout stays free for command output.
//! `NOTIFY_FORWARDER_LOG` takes a full `EnvFilter` directive and overrides
//! the configured level.

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a filter directive
pub const LOG_ENV_VAR: &str = "NOTIFY_FORWARDER_LOG";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {message}")]
    OpenFailed { path: PathBuf, message: String },

    #[error("Failed to install log subscriber: {0}")]
    InitFailed(String),
}

/// Logging options resolved from config and CLI
#[derive(Debug, Clone)]
pub struct LogOptions {
    pub level: String,
    pub verbose: bool,
    pub file: Option<PathBuf>,
}

/// Pick the filter directive: env var, then `-v`, then the configured level
fn filter_directive(options: &LogOptions, env_value: Option<String>) -> String {
    if let Some(directive) = env_value.filter(|v| !v.trim().is_empty()) {
        return directive;
    }
    if options.verbose {
        return "debug".to_string();
    }
    options.level.clone()
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path) -> Result<std::fs::File, LoggingError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| LoggingError::OpenFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggingError::OpenFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Install the global subscriber
pub fn init_logging(options: &LogOptions) -> Result<(), LoggingError> {
    let directive = filter_directive(options, std::env::var(LOG_ENV_VAR).ok());
    let filter = build_filter(&directive);

    // File layer goes first so ANSI codes never reach the file.
    let file_layer = match &options.file {
        Some(path) => {
            let file = Arc::new(open_log_file(path)?);
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(file),
            )
        }
        None => None,
    };

    let console_layer = fmt::layer()
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggingError::InitFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(level: &str, verbose: bool) -> LogOptions {
        LogOptions {
            level: level.to_string(),
            verbose,
            file: None,
        }
    }

    #[test]
    fn env_directive_wins() {
        let directive = filter_directive(
            &options("warn", true),
            Some("notify_forwarder=trace".to_string()),
        );
        assert_eq!(directive, "notify_forwarder=trace");
    }

    #[test]
    fn verbose_forces_debug() {
        assert_eq!(filter_directive(&options("warn", true), None), "debug");
    }

    #[test]
    fn falls_back_to_configured_level() {
        assert_eq!(filter_directive(&options("warn", false), Some(" ".into())), "warn");
    }

    #[test]
    fn invalid_directive_does_not_panic() {
        let _ = build_filter("not a [valid directive");
    }

    #[test]
    fn log_file_is_created_with_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("forwarder.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
