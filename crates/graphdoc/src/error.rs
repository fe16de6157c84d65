//! Error types for documentation generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for documentation generation.
///
/// `UnlinkedNote` is fatal for the file it occurs in: the batch loop reports
/// it and continues with the remaining files. Contract violations inside the
/// content tree (a node-scoped block rendered without a current node) are
/// programmer errors and panic instead of surfacing here.
#[derive(Debug, Error)]
pub enum DocError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("annotation \"{label}\" in {path} matches no candidate node")]
    UnlinkedNote { label: String, path: PathBuf },
}
