//! Strategy document.
//!
//! A strategy document describes one borrowing position, the protocol rule
//! governing it, and optionally the stress programme, scoring assumptions,
//! comparison catalogues and execution settings. Every optional section
//! falls back to the reference configuration.
//!
//! ```yaml
//! position:
//!   collateral_amount: 1.0
//!   collateral_price: 30000
//!   borrowed_amount: 21000
//! protocol:
//!   name: aave_v3
//!   liquidation_threshold: 0.80
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use solvency_core::{Position, ProtocolRule};
use solvency_risk::{
    GovernanceShock, ProtocolPreset, StrategyVariant, DEFAULT_LIQUIDATION_MARGIN_PCT,
};
use solvency_stress::{ExecutionConfig, StressConfig};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::format::DocumentFormat;

// =============================================================================
// SECTIONS
// =============================================================================

/// `position` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSection {
    /// Units of collateral held.
    pub collateral_amount: f64,
    /// Quote price per unit; may instead be given under `market`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collateral_price: Option<f64>,
    /// Debt in quote currency.
    pub borrowed_amount: f64,
}

/// `market` section (older documents keep the price here).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSection {
    /// Quote price per unit of collateral.
    #[serde(default)]
    pub collateral_price: Option<f64>,
}

/// `protocol` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolSection {
    /// Protocol identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Maximum permitted LTV.
    pub liquidation_threshold: f64,
}

/// `scoring` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringSection {
    /// Assumed distance to liquidation used by the risk score.
    #[serde(default = "default_margin")]
    pub liquidation_margin_pct: f64,
}

fn default_margin() -> f64 {
    DEFAULT_LIQUIDATION_MARGIN_PCT
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            liquidation_margin_pct: default_margin(),
        }
    }
}

/// `comparisons` section. Absent lists fall back to the preset catalogues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSection {
    /// Governance threshold changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance: Option<Vec<GovernanceShock>>,
    /// Protocols to compare.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocols: Option<Vec<ProtocolPreset>>,
    /// Borrowing strategies to compare.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategies: Option<Vec<StrategyVariant>>,
}

// =============================================================================
// STRATEGY FILE
// =============================================================================

/// A parsed strategy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyFile {
    /// Position inputs.
    pub position: PositionSection,
    /// Market inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketSection>,
    /// Protocol rule.
    pub protocol: ProtocolSection,
    /// Stress programme.
    #[serde(default)]
    pub stress: StressConfig,
    /// Scoring assumptions.
    #[serde(default)]
    pub scoring: ScoringSection,
    /// Comparison catalogues.
    #[serde(default)]
    pub comparisons: ComparisonSection,
    /// Evaluation scheduling.
    #[serde(default)]
    pub execution: ExecutionConfig,
}

impl StrategyFile {
    /// Builds a document for a position and rule with reference settings.
    #[must_use]
    pub fn new(position: &Position, rule: &ProtocolRule) -> Self {
        Self {
            position: PositionSection {
                collateral_amount: position.collateral_amount(),
                collateral_price: Some(position.collateral_price()),
                borrowed_amount: position.borrowed_amount(),
            },
            market: None,
            protocol: ProtocolSection {
                name: rule.name().map(str::to_string),
                liquidation_threshold: rule.liquidation_threshold(),
            },
            stress: StressConfig::default(),
            scoring: ScoringSection::default(),
            comparisons: ComparisonSection::default(),
            execution: ExecutionConfig::default(),
        }
    }

    /// Reads and parses a strategy file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`], [`ConfigError::Io`] or
    /// [`ConfigError::Parse`].
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), %format, "loading strategy document");
        Self::from_str(&content, format)
    }

    /// Parses a strategy document from memory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed.
    pub fn from_str(content: &str, format: DocumentFormat) -> ConfigResult<Self> {
        format.parse(content)
    }

    /// Renders the document in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document cannot be represented.
    pub fn render(&self, format: DocumentFormat) -> ConfigResult<String> {
        format.render(self)
    }

    /// Collateral price from `position`, else from `market`.
    #[must_use]
    pub fn collateral_price(&self) -> Option<f64> {
        self.position
            .collateral_price
            .or_else(|| self.market.as_ref().and_then(|m| m.collateral_price))
    }

    /// Builds the validated position.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if no collateral price is given,
    /// or [`ConfigError::Model`] for out-of-domain values.
    pub fn position(&self) -> ConfigResult<Position> {
        let price = self
            .collateral_price()
            .ok_or_else(|| ConfigError::missing("position.collateral_price"))?;

        Ok(Position::new(
            self.position.collateral_amount,
            price,
            self.position.borrowed_amount,
        )?)
    }

    /// Builds the validated protocol rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Model`] for a threshold outside (0, 1).
    pub fn protocol_rule(&self) -> ConfigResult<ProtocolRule> {
        let rule = ProtocolRule::new(self.protocol.liquidation_threshold)?;
        Ok(match &self.protocol.name {
            Some(name) => rule.named(name.clone()),
            None => rule,
        })
    }

    /// Stress programme.
    #[must_use]
    pub fn stress_config(&self) -> &StressConfig {
        &self.stress
    }

    /// Execution settings.
    #[must_use]
    pub fn execution(&self) -> ExecutionConfig {
        self.execution
    }

    /// Margin assumed by the risk score.
    #[must_use]
    pub fn liquidation_margin_pct(&self) -> f64 {
        self.scoring.liquidation_margin_pct
    }

    /// Governance shocks, or the preset catalogue.
    #[must_use]
    pub fn governance_shocks(&self) -> Vec<GovernanceShock> {
        self.comparisons
            .governance
            .clone()
            .unwrap_or_else(GovernanceShock::presets)
    }

    /// Protocols to compare, or the preset catalogue.
    #[must_use]
    pub fn protocol_presets(&self) -> Vec<ProtocolPreset> {
        self.comparisons
            .protocols
            .clone()
            .unwrap_or_else(ProtocolPreset::presets)
    }

    /// Strategy variants, or the preset catalogue.
    #[must_use]
    pub fn strategy_variants(&self) -> Vec<StrategyVariant> {
        self.comparisons
            .strategies
            .clone()
            .unwrap_or_else(StrategyVariant::presets)
    }
}

impl Validate for StrategyFile {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        match self.collateral_price() {
            Some(price) => {
                if let Err(e) = Position::new(
                    self.position.collateral_amount,
                    price,
                    self.position.borrowed_amount,
                ) {
                    errors.push(ValidationError::from_model("position", &e));
                }
            }
            None => errors.push(ValidationError::new(
                "position.collateral_price",
                "missing (set position.collateral_price or market.collateral_price)",
            )),
        }

        if let Err(e) = ProtocolRule::new(self.protocol.liquidation_threshold) {
            errors.push(ValidationError::from_model("protocol", &e));
        }

        errors.extend(
            self.stress
                .check()
                .iter()
                .map(|e| ValidationError::from_model("stress", e)),
        );

        if !self.scoring.liquidation_margin_pct.is_finite() {
            errors.push(ValidationError::new(
                "scoring.liquidation_margin_pct",
                "must be finite",
            ));
        }

        validate_comparisons(&self.comparisons, &mut errors);
        errors
    }
}

fn validate_comparisons(section: &ComparisonSection, errors: &mut Vec<ValidationError>) {
    let thresholds = section
        .governance
        .iter()
        .flatten()
        .map(|g| g.liquidation_threshold)
        .enumerate()
        .map(|(i, t)| (format!("comparisons.governance[{i}]"), t))
        .chain(
            section
                .protocols
                .iter()
                .flatten()
                .enumerate()
                .map(|(i, p)| (format!("comparisons.protocols[{i}]"), p.liquidation_threshold)),
        );

    for (section_name, threshold) in thresholds {
        if let Err(e) = ProtocolRule::new(threshold) {
            errors.push(ValidationError::from_model(&section_name, &e));
        }
    }

    for (i, variant) in section.strategies.iter().flatten().enumerate() {
        let m = variant.borrow_multiplier;
        if !(m.is_finite() && m >= 0.0) {
            errors.push(ValidationError::new(
                format!("comparisons.strategies[{i}].borrow_multiplier"),
                format!("must be finite and non-negative, got {m}"),
            ));
        }
    }

    for (name, empty) in [
        ("governance", section.governance.as_ref().is_some_and(Vec::is_empty)),
        ("protocols", section.protocols.as_ref().is_some_and(Vec::is_empty)),
        ("strategies", section.strategies.as_ref().is_some_and(Vec::is_empty)),
    ] {
        if empty {
            errors.push(ValidationError::new(
                format!("comparisons.{name}"),
                "list is empty",
            ));
        }
    }
}
