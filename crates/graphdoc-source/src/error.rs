//! Error types for graph file ingestion.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading and building file models.
///
/// All variants carry the offending path; the gateway logs them per file and
/// continues with the remaining files.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} cannot be built from {path}: missing \"{field}\"")]
    MissingField {
        kind: &'static str,
        path: PathBuf,
        field: &'static str,
    },
}
