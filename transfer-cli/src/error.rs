//! CLI error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Step {step}: unknown key '{key}'")]
    UnknownKey { step: usize, key: String },
    #[error("Invalid log level '{0}'")]
    LogLevel(String),
    #[error("Failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}
