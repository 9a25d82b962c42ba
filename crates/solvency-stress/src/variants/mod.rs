//! Single-axis variant analyses.
//!
//! Each variant evaluates the LTV evaluator under one perturbed state per
//! input value. They share [`solvency_core::ltv::is_liquidated`] with the
//! grid so every analysis agrees on the liquidation boundary.

mod leverage;
mod price_shocks;
mod regimes;

pub use leverage::*;
pub use price_shocks::*;
pub use regimes::*;
