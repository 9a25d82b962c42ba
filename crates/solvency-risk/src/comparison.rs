//! Comparison runners.
//!
//! Each runner re-evaluates the scenario grid under a substituted parameter
//! (threshold, protocol, or borrowed amount) and keeps only the surface
//! summary. Every variant is built as a fresh [`ProtocolRule`] or
//! [`Position`]; the base inputs are never modified. An error in any variant
//! aborts the whole comparison.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use solvency_core::{Position, ProtocolRule, SolvencyResult};
use solvency_stress::{generate_grid, ExecutionConfig, ScenarioAxes};

use crate::surface::{summarize, SurfaceSummary};
use crate::zone::RiskZone;

// =============================================================================
// VARIANT DEFINITIONS
// =============================================================================

/// A governance-driven change to the liquidation threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceShock {
    /// Scenario name.
    pub name: String,
    /// Threshold after the change.
    pub liquidation_threshold: f64,
}

impl GovernanceShock {
    /// Creates a governance shock.
    pub fn new(name: impl Into<String>, liquidation_threshold: f64) -> Self {
        Self {
            name: name.into(),
            liquidation_threshold,
        }
    }

    /// Baseline plus three tightening steps.
    #[must_use]
    pub fn presets() -> Vec<Self> {
        vec![
            Self::new("baseline", 0.80),
            Self::new("minor_tightening", 0.78),
            Self::new("moderate_tightening", 0.75),
            Self::new("aggressive_tightening", 0.72),
        ]
    }
}

/// A lending protocol and its liquidation threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolPreset {
    /// Protocol identifier.
    pub name: String,
    /// Liquidation threshold.
    pub liquidation_threshold: f64,
}

impl ProtocolPreset {
    /// Creates a protocol preset.
    pub fn new(name: impl Into<String>, liquidation_threshold: f64) -> Self {
        Self {
            name: name.into(),
            liquidation_threshold,
        }
    }

    /// Built-in protocol catalogue.
    #[must_use]
    pub fn presets() -> Vec<Self> {
        vec![
            Self::new("aave_v3", 0.825),
            Self::new("compound_v3", 0.83),
            Self::new("morpho_blue", 0.86),
            Self::new("spark", 0.80),
            Self::new("maker", 0.667),
        ]
    }

    /// Builds the protocol's rule.
    ///
    /// # Errors
    ///
    /// Returns [`solvency_core::SolvencyError::InvalidInput`] for a threshold
    /// outside (0, 1).
    pub fn rule(&self) -> SolvencyResult<ProtocolRule> {
        Ok(ProtocolRule::new(self.liquidation_threshold)?.named(self.name.clone()))
    }
}

/// A borrowing strategy expressed as a multiple of the base borrowed amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyVariant {
    /// Strategy name.
    pub name: String,
    /// Multiplier on the base borrowed amount.
    pub borrow_multiplier: f64,
}

impl StrategyVariant {
    /// Creates a strategy variant.
    pub fn new(name: impl Into<String>, borrow_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            borrow_multiplier,
        }
    }

    /// Conservative, moderate and aggressive borrowing.
    #[must_use]
    pub fn presets() -> Vec<Self> {
        vec![
            Self::new("conservative", 0.60),
            Self::new("moderate", 0.75),
            Self::new("aggressive", 0.90),
        ]
    }
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Surface summary under one governance shock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceOutcome {
    /// Shock name.
    pub governance_scenario: String,
    /// Threshold applied.
    pub liquidation_threshold: f64,
    /// Zone distribution.
    pub risk_summary: SurfaceSummary,
}

/// Surface summary under one protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolOutcome {
    /// Protocol identifier.
    pub protocol: String,
    /// Threshold applied.
    pub liquidation_threshold: f64,
    /// Zone distribution.
    pub summary: SurfaceSummary,
}

/// Surface summary under one borrowing strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyOutcome {
    /// Strategy name.
    pub strategy: String,
    /// Multiplier applied to the base borrowed amount.
    pub borrow_multiplier: f64,
    /// Zone distribution.
    pub risk_summary: SurfaceSummary,
}

// =============================================================================
// RUNNERS
// =============================================================================

fn grid_summary(
    position: &Position,
    rule: &ProtocolRule,
    axes: &ScenarioAxes,
    exec: &ExecutionConfig,
) -> SolvencyResult<SurfaceSummary> {
    let grid = generate_grid(position, rule, axes, exec)?;
    let summary = summarize(&grid, rule.liquidation_threshold())?;
    if summary.count(RiskZone::Liquidated) == summary.total_scenarios {
        warn!(
            threshold = rule.liquidation_threshold(),
            borrowed = position.borrowed_amount(),
            "every scenario liquidates"
        );
    }
    Ok(summary)
}

/// Re-runs the grid for each governance threshold.
///
/// # Errors
///
/// Fails on the first invalid threshold or grid error.
pub fn governance_stress(
    position: &Position,
    shocks: &[GovernanceShock],
    axes: &ScenarioAxes,
    exec: &ExecutionConfig,
) -> SolvencyResult<Vec<GovernanceOutcome>> {
    let outcomes = shocks
        .iter()
        .map(|shock| {
            let rule = ProtocolRule::new(shock.liquidation_threshold)?;
            Ok(GovernanceOutcome {
                governance_scenario: shock.name.clone(),
                liquidation_threshold: shock.liquidation_threshold,
                risk_summary: grid_summary(position, &rule, axes, exec)?,
            })
        })
        .collect::<SolvencyResult<Vec<_>>>()?;

    debug!(variants = outcomes.len(), "ran governance stress");
    Ok(outcomes)
}

/// Re-runs the grid under each protocol's threshold.
///
/// # Errors
///
/// Fails on the first invalid threshold or grid error.
pub fn multi_protocol(
    position: &Position,
    protocols: &[ProtocolPreset],
    axes: &ScenarioAxes,
    exec: &ExecutionConfig,
) -> SolvencyResult<Vec<ProtocolOutcome>> {
    let outcomes = protocols
        .iter()
        .map(|preset| {
            let rule = preset.rule()?;
            Ok(ProtocolOutcome {
                protocol: preset.name.clone(),
                liquidation_threshold: preset.liquidation_threshold,
                summary: grid_summary(position, &rule, axes, exec)?,
            })
        })
        .collect::<SolvencyResult<Vec<_>>>()?;

    debug!(variants = outcomes.len(), "ran multi-protocol comparison");
    Ok(outcomes)
}

/// Re-runs the grid with the borrowed amount scaled per strategy, holding
/// the threshold fixed.
///
/// # Errors
///
/// Fails on an invalid threshold, a negative resulting borrowed amount, or
/// any grid error.
pub fn strategy_comparison(
    position: &Position,
    liquidation_threshold: f64,
    variants: &[StrategyVariant],
    axes: &ScenarioAxes,
    exec: &ExecutionConfig,
) -> SolvencyResult<Vec<StrategyOutcome>> {
    let rule = ProtocolRule::new(liquidation_threshold)?;

    let outcomes = variants
        .iter()
        .map(|variant| {
            let scaled = position.with_borrow_multiplier(variant.borrow_multiplier)?;
            Ok(StrategyOutcome {
                strategy: variant.name.clone(),
                borrow_multiplier: variant.borrow_multiplier,
                risk_summary: grid_summary(&scaled, &rule, axes, exec)?,
            })
        })
        .collect::<SolvencyResult<Vec<_>>>()?;

    debug!(variants = outcomes.len(), "ran strategy comparison");
    Ok(outcomes)
}
