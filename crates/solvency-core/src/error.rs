//! Error types for the Solvency engine.
//!
//! Every failure the engine can raise is one of three kinds: an input that
//! is outside its domain, an LTV denominator that is not strictly positive,
//! or an aggregation over nothing. All of them are raised at the point of
//! violation and propagated unchanged; no partial results are returned.

use thiserror::Error;

/// A specialized Result type for Solvency operations.
pub type SolvencyResult<T> = Result<T, SolvencyError>;

/// The main error type for Solvency operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolvencyError {
    /// A position or protocol field is malformed or out of domain.
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// LTV denominator (collateral amount × price) is zero or negative.
    #[error("Division domain error in {context}: denominator {denominator} is not positive")]
    DivisionDomain {
        /// Where the computation was attempted.
        context: String,
        /// The rejected denominator.
        denominator: f64,
    },

    /// Aggregation was attempted over an empty scenario set.
    #[error("Empty scenario set: {context}")]
    EmptyScenarioSet {
        /// Which aggregation had nothing to work on.
        context: String,
    },
}

impl SolvencyError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a division domain error.
    #[must_use]
    pub fn division_domain(context: impl Into<String>, denominator: f64) -> Self {
        Self::DivisionDomain {
            context: context.into(),
            denominator,
        }
    }

    /// Creates an empty scenario set error.
    #[must_use]
    pub fn empty_scenarios(context: impl Into<String>) -> Self {
        Self::EmptyScenarioSet {
            context: context.into(),
        }
    }

    /// Returns the offending field for invalid input errors.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SolvencyError::invalid_input("collateral_amount", "must be positive");
        assert!(err.to_string().contains("collateral_amount"));
        assert!(err.to_string().contains("must be positive"));
        assert_eq!(err.field(), Some("collateral_amount"));
    }

    #[test]
    fn test_division_domain_display() {
        let err = SolvencyError::division_domain("ltv", -300.0);
        assert!(err.to_string().contains("-300"));
        assert!(err.field().is_none());
    }

    #[test]
    fn test_empty_scenarios_display() {
        let err = SolvencyError::empty_scenarios("risk surface");
        assert!(err.to_string().contains("risk surface"));
    }
}
