//! # Solvency Report
//!
//! Assembles every analysis for one strategy into a [`RiskReport`], explains
//! it in plain language, and pivots its risk surface into per-regime tables.
//!
//! ## Example
//!
//! ```
//! use solvency_core::{Position, ProtocolRule};
//! use solvency_report::{assemble_report_with, explain, zone_pivot};
//! use solvency_stress::{ExecutionConfig, StressConfig};
//!
//! let report = assemble_report_with(
//!     &Position::new(1.0, 30_000.0, 21_000.0).unwrap(),
//!     &ProtocolRule::new(0.80).unwrap(),
//!     &StressConfig::default(),
//!     30.0,
//!     &ExecutionConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(report.risk_score, 55.0);
//! assert_eq!(zone_pivot(&report.risk_surface).len(), 4);
//! println!("{}", explain(&report).price_risk);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod assemble;
pub mod base;
pub mod error;
pub mod explain;
pub mod pivot;

pub use assemble::{assemble_report, assemble_report_with, RiskReport};
pub use base::{base_report, BaseReport, RiskLevel};
pub use error::{ReportError, ReportResult};
pub use explain::{explain, Explanation};
pub use pivot::{zone_pivot, ZonePivot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::assemble::{assemble_report, RiskReport};
    pub use crate::base::{base_report, BaseReport, RiskLevel};
    pub use crate::error::{ReportError, ReportResult};
    pub use crate::explain::{explain, Explanation};
    pub use crate::pivot::{zone_pivot, ZonePivot};
}
