//! Configuration error types.

use std::path::PathBuf;

use solvency_core::SolvencyError;
use thiserror::Error;

use crate::format::DocumentFormat;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The strategy file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid for its format.
    #[error("Failed to parse {format} document: {message}")]
    Parse {
        /// Format the document was parsed as.
        format: DocumentFormat,
        /// Parser message.
        message: String,
    },

    /// The file extension does not name a supported format.
    #[error(
        "Unsupported strategy format '{}' (expected .yaml, .yml, .toml or .json)",
        path.display()
    )]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// A required field is absent.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Dotted path of the field.
        field: String,
    },

    /// Validation error.
    #[error("Validation error in '{field}': {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {}", join_errors(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// The document describes an invalid position or rule.
    #[error(transparent)]
    Model(#[from] SolvencyError),
}

impl ConfigError {
    /// Creates a missing field error.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(format: DocumentFormat, message: impl Into<String>) -> Self {
        Self::Parse {
            format,
            message: message.into(),
        }
    }
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Converts a model error, prefixing its field with `section`.
    #[must_use]
    pub fn from_model(section: &str, err: &SolvencyError) -> Self {
        match err {
            SolvencyError::InvalidInput { field, reason } => {
                Self::new(format!("{section}.{field}"), reason.clone())
            }
            other => Self::new(section, other.to_string()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(ConfigError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(ConfigError::MultipleValidationErrors(errors)),
        }
    }
}
