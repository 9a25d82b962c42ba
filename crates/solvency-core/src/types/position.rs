//! Collateralized borrowing position.

use serde::{Deserialize, Serialize};

use crate::error::{SolvencyError, SolvencyResult};
use crate::ltv::evaluate_ltv;

/// A collateralized borrowing position.
///
/// Immutable once constructed. Every constructor validates all fields, so a
/// `Position` value is always inside the LTV evaluator's domain:
///
/// - `collateral_amount > 0` (units of the collateral asset)
/// - `collateral_price > 0` (quote currency per unit)
/// - `borrowed_amount >= 0` (quote currency)
///
/// Variants (a different borrowed amount, a shocked price) are new values
/// built through [`Position::with_borrowed`] and friends, never in-place
/// edits of a shared template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PositionFields")]
pub struct Position {
    collateral_amount: f64,
    collateral_price: f64,
    borrowed_amount: f64,
}

#[derive(Deserialize)]
struct PositionFields {
    collateral_amount: f64,
    collateral_price: f64,
    borrowed_amount: f64,
}

impl TryFrom<PositionFields> for Position {
    type Error = SolvencyError;

    fn try_from(fields: PositionFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.collateral_amount,
            fields.collateral_price,
            fields.borrowed_amount,
        )
    }
}

impl Position {
    /// Creates a validated position.
    ///
    /// # Errors
    ///
    /// Returns [`SolvencyError::InvalidInput`] naming the first offending
    /// field.
    pub fn new(
        collateral_amount: f64,
        collateral_price: f64,
        borrowed_amount: f64,
    ) -> SolvencyResult<Self> {
        require_positive("collateral_amount", collateral_amount)?;
        require_positive("collateral_price", collateral_price)?;
        if !borrowed_amount.is_finite() || borrowed_amount < 0.0 {
            return Err(SolvencyError::invalid_input(
                "borrowed_amount",
                format!("must be a finite non-negative number, got {borrowed_amount}"),
            ));
        }

        Ok(Self {
            collateral_amount,
            collateral_price,
            borrowed_amount,
        })
    }

    /// Collateral held, in units of the collateral asset.
    #[must_use]
    pub fn collateral_amount(&self) -> f64 {
        self.collateral_amount
    }

    /// Collateral price in quote currency per unit.
    #[must_use]
    pub fn collateral_price(&self) -> f64 {
        self.collateral_price
    }

    /// Outstanding debt in quote currency.
    #[must_use]
    pub fn borrowed_amount(&self) -> f64 {
        self.borrowed_amount
    }

    /// Collateral value at the current price.
    #[must_use]
    pub fn collateral_value(&self) -> f64 {
        self.collateral_amount * self.collateral_price
    }

    /// LTV at the current price, as a ratio.
    pub fn current_ltv(&self) -> SolvencyResult<f64> {
        evaluate_ltv(
            self.collateral_amount,
            self.collateral_price,
            self.borrowed_amount,
        )
    }

    /// Returns a new position with a different borrowed amount.
    pub fn with_borrowed(&self, borrowed_amount: f64) -> SolvencyResult<Self> {
        Self::new(self.collateral_amount, self.collateral_price, borrowed_amount)
    }

    /// Returns a new position whose debt is scaled by `multiplier`.
    pub fn with_borrow_multiplier(&self, multiplier: f64) -> SolvencyResult<Self> {
        self.with_borrowed(self.borrowed_amount * multiplier)
    }

    /// Returns a new position at a different collateral price.
    pub fn with_price(&self, collateral_price: f64) -> SolvencyResult<Self> {
        Self::new(self.collateral_amount, collateral_price, self.borrowed_amount)
    }
}

fn require_positive(field: &str, value: f64) -> SolvencyResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SolvencyError::invalid_input(
            field,
            format!("must be a finite positive number, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_valid_position() {
        let p = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
        assert_relative_eq!(p.collateral_value(), 30_000.0);
        assert_relative_eq!(p.current_ltv().unwrap(), 0.7);
    }

    #[test]
    fn test_zero_borrow_is_valid() {
        let p = Position::new(2.0, 100.0, 0.0).unwrap();
        assert_relative_eq!(p.current_ltv().unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_non_positive_collateral() {
        let err = Position::new(0.0, 30_000.0, 1.0).unwrap_err();
        assert_eq!(err.field(), Some("collateral_amount"));

        let err = Position::new(1.0, -5.0, 1.0).unwrap_err();
        assert_eq!(err.field(), Some("collateral_price"));
    }

    #[test]
    fn test_rejects_negative_or_nan_borrow() {
        let err = Position::new(1.0, 1.0, -0.01).unwrap_err();
        assert_eq!(err.field(), Some("borrowed_amount"));

        let err = Position::new(1.0, 1.0, f64::NAN).unwrap_err();
        assert_eq!(err.field(), Some("borrowed_amount"));
    }

    #[test]
    fn test_rejects_nan_amount() {
        let err = Position::new(f64::NAN, 1.0, 1.0).unwrap_err();
        assert_eq!(err.field(), Some("collateral_amount"));
    }

    #[test]
    fn test_variants_are_fresh_values() {
        let base = Position::new(1.0, 30_000.0, 20_000.0).unwrap();
        let levered = base.with_borrow_multiplier(1.2).unwrap();

        assert_relative_eq!(base.borrowed_amount(), 20_000.0);
        assert_relative_eq!(levered.borrowed_amount(), 24_000.0);
        assert!(base.with_price(0.0).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Position = serde_json::from_str(
            r#"{"collateral_amount": 1.0, "collateral_price": 30000, "borrowed_amount": 21000}"#,
        )
        .unwrap();
        assert_relative_eq!(ok.borrowed_amount(), 21_000.0);

        let bad = serde_json::from_str::<Position>(
            r#"{"collateral_amount": 0.0, "collateral_price": 30000.0, "borrowed_amount": 1.0}"#,
        );
        assert!(bad.is_err());
    }
}
