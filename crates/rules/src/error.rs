//! Error type shared by the loader, schema and writer.

use std::path::PathBuf;

/// Errors that can occur while loading, processing or persisting a rule-set.
#[derive(Debug, thiserror::Error)]
pub enum DedupError {
    /// The input document does not exist.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// JSON syntax error or a value of an unexpected type.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Output, temp file or backup could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Any other filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for rule-set operations.
pub type Result<T> = std::result::Result<T, DedupError>;

impl DedupError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        DedupError::MalformedDocument(message.into())
    }

    pub(crate) fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DedupError::WriteFailure {
            path: path.into(),
            source,
        }
    }
}
