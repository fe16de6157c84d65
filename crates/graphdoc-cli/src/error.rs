//! CLI error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a CLI run.
///
/// Per-file generation problems never surface here; they are logged by the
/// batch loop and the run continues.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse TOML configuration: {0}")]
    ConfigParse(String),

    #[error("Missing configuration file: {0}")]
    MissingConfig(PathBuf),
}
