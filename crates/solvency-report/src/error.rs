//! Report error types.

use std::path::PathBuf;

use solvency_config::ConfigError;
use solvency_core::SolvencyError;
use thiserror::Error;

/// Report operation result type.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors raised while assembling, writing or reading a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// An analysis failed.
    #[error(transparent)]
    Solvency(#[from] SolvencyError),

    /// The strategy document could not be turned into model inputs.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading or writing the report file failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
