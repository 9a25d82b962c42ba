//! Protocol liquidation rule.

use serde::{Deserialize, Serialize};

use crate::error::{SolvencyError, SolvencyResult};
use crate::math::{round_dp, to_pct};

/// The liquidation rule of a lending protocol.
///
/// A position is liquidated once its LTV is strictly greater than
/// `liquidation_threshold`. The threshold must lie in the open interval
/// (0, 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProtocolRuleFields")]
pub struct ProtocolRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    liquidation_threshold: f64,
}

#[derive(Deserialize)]
struct ProtocolRuleFields {
    #[serde(default)]
    name: Option<String>,
    liquidation_threshold: f64,
}

impl TryFrom<ProtocolRuleFields> for ProtocolRule {
    type Error = SolvencyError;

    fn try_from(fields: ProtocolRuleFields) -> Result<Self, Self::Error> {
        let rule = Self::new(fields.liquidation_threshold)?;
        Ok(match fields.name {
            Some(name) => rule.named(name),
            None => rule,
        })
    }
}

impl ProtocolRule {
    /// Creates an unnamed rule.
    ///
    /// # Errors
    ///
    /// Returns [`SolvencyError::InvalidInput`] for `liquidation_threshold`
    /// outside (0, 1).
    pub fn new(liquidation_threshold: f64) -> SolvencyResult<Self> {
        if !(liquidation_threshold > 0.0 && liquidation_threshold < 1.0) {
            return Err(SolvencyError::invalid_input(
                "liquidation_threshold",
                format!("must lie strictly between 0 and 1, got {liquidation_threshold}"),
            ));
        }
        Ok(Self {
            name: None,
            liquidation_threshold,
        })
    }

    /// Attaches a protocol name or identifier.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds a fresh rule with the same name and a different threshold.
    pub fn with_threshold(&self, liquidation_threshold: f64) -> SolvencyResult<Self> {
        let rule = Self::new(liquidation_threshold)?;
        Ok(Self {
            name: self.name.clone(),
            ..rule
        })
    }

    /// Protocol name, if one was given.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Liquidation threshold as a ratio.
    #[must_use]
    pub fn liquidation_threshold(&self) -> f64 {
        self.liquidation_threshold
    }

    /// Liquidation threshold as a percentage, rounded to 2 dp like every
    /// reported LTV so the two compare exactly.
    #[must_use]
    pub fn threshold_pct(&self) -> f64 {
        round_dp(to_pct(self.liquidation_threshold), 2)
    }
}
