//! # Solvency Risk
//!
//! Turns evaluated stress scenarios into risk signals:
//!
//! - **Zones**: SAFE / WARNING / LIQUIDATED by buffer to the threshold
//! - **Surface**: classified grid plus zone distribution
//! - **Score**: one bounded scalar from margin, survival and leverage inputs
//! - **Comparisons**: governance, protocol and strategy re-runs of the grid
//!
//! ## Example
//!
//! ```
//! use solvency_core::{Position, ProtocolRule};
//! use solvency_risk::prelude::*;
//! use solvency_stress::{generate_grid, ExecutionConfig, ScenarioAxes};
//!
//! let position = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
//! let rule = ProtocolRule::new(0.80).unwrap();
//!
//! let grid = generate_grid(
//!     &position,
//!     &rule,
//!     &ScenarioAxes::reference(),
//!     &ExecutionConfig::default(),
//! )
//! .unwrap();
//! let surface = aggregate(grid, rule.liquidation_threshold()).unwrap();
//!
//! assert_eq!(surface.summary.total_scenarios, 60);
//! assert_eq!(surface.summary.zone_distribution.total_count(), 60);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod comparison;
pub mod score;
pub mod surface;
pub mod zone;

pub use comparison::{
    governance_stress, multi_protocol, strategy_comparison, GovernanceOutcome, GovernanceShock,
    ProtocolOutcome, ProtocolPreset, StrategyOutcome, StrategyVariant,
};
pub use score::{
    compute_risk_score, leverage_penalty, stress_survival_ratio, RiskScore, ScoreInputs,
    DEFAULT_LIQUIDATION_MARGIN_PCT,
};
pub use surface::{
    aggregate, summarize, ClassifiedScenario, RiskSurface, SurfaceSummary, ZoneDistribution,
    ZoneStats,
};
pub use zone::{classify_zone, RiskZone, SAFE_BUFFER_PCT};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::comparison::*;
    pub use crate::score::{compute_risk_score, RiskScore, ScoreInputs};
    pub use crate::surface::{aggregate, summarize, ClassifiedScenario, RiskSurface, SurfaceSummary};
    pub use crate::zone::{classify_zone, RiskZone};
}
