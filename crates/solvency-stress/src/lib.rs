//! # Solvency Stress
//!
//! Stress scenario generation for collateralized borrowing positions.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every analysis is a deterministic map over explicit inputs
//! - **Swappable axes**: axis sets are configuration values ([`ScenarioAxes`]),
//!   never constants baked into the generators
//! - **Config-driven parallelism**: optional rayon support with threshold-based switching
//!
//! ## Quick Start
//!
//! ```
//! use solvency_core::{Position, ProtocolRule};
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
//! assert_eq!(grid.len(), 60);
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Axis sets, stress programme, execution settings
//! - [`grid`] - Cartesian scenario grid
//! - [`variants`] - Price shocks, leverage sensitivity, regime stress
//! - [`parallel`] - Conditional rayon evaluation
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel evaluation for large grids

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod grid;
pub mod parallel;
pub mod variants;

pub use config::{
    ExecutionConfig, LeverageLevels, MacroRegime, ScenarioAxes, StressConfig, VolatilityRegime,
    MAX_DROP_CAP,
};
pub use grid::{effective_drop, generate_grid, ScenarioRecord};
pub use parallel::maybe_parallel_map;
pub use variants::{
    first_liquidation, leverage_sensitivity, regime_matrix, run_price_shocks,
    volatility_regime_stress, LeverageOutcome, MacroRegimeOutcome, VolatilityOutcome,
};
