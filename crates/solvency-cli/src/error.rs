//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The strategy document failed validation.
    #[error("Strategy has {0} validation problem(s)")]
    InvalidStrategy(usize),

    /// Reports are only written as JSON.
    #[error("Unsupported report output '{}': use a .json path", path.display())]
    UnsupportedOutput {
        /// Rejected path.
        path: PathBuf,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
