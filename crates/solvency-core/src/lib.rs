//! # solvency-core
//!
//! Core model and LTV evaluation for the Solvency stress-testing engine.
//!
//! This crate provides:
//!
//! - **Model**: [`Position`] and [`ProtocolRule`], validated at construction
//! - **LTV Evaluator**: loan-to-value and the strict liquidation rule
//! - **Errors**: [`SolvencyError`], shared by every engine crate
//!
//! ## Example
//!
//! ```
//! use solvency_core::prelude::*;
//!
//! let position = Position::new(1.0, 30_000.0, 21_000.0)?;
//! let rule = ProtocolRule::new(0.80)?.named("aave_v3");
//!
//! let outcome = simulate_position_drop(&position, &rule, 0.20)?;
//! assert_eq!(outcome.ltv_pct, 87.5);
//! assert!(outcome.liquidated);
//! # Ok::<(), SolvencyError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod error;
pub mod ltv;
pub mod math;
pub mod types;

pub use error::{SolvencyError, SolvencyResult};
pub use ltv::PriceDropOutcome;
pub use types::{Position, ProtocolRule};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{SolvencyError, SolvencyResult};
    pub use crate::ltv::{
        evaluate_ltv, is_liquidated, simulate_position_drop, simulate_price_drop,
        PriceDropOutcome,
    };
    pub use crate::math::{round_dp, to_pct};
    pub use crate::types::{Position, ProtocolRule};
}
