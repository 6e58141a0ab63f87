//! Analytics over a simulated results table.
//!
//! This module wires and re-exports:
//! - `summary`: per-column statistics and the ALE percentile ladder,
//! - `var`: Value-at-Risk as an empirical ALE quantile,
//! - `sensitivities`: inputs ranked by correlation with ALE,
//! - `distribution`: histogram, empirical CDF, loss-exceedance curve and joint density,
//! - `scenarios`: multi-scenario comparison on a shared engine.
//!
//! Every operation here is a pure function of a [`SimulationResults`](crate::mc::SimulationResults)
//! and fails with [`RiskError::EmptyResults`](crate::core::RiskError::EmptyResults) on an empty
//! table.

pub mod distribution;
pub mod scenarios;
pub mod sensitivities;
pub mod summary;
pub mod var;

pub use distribution::{
    DEFAULT_JOINT_BINS, HistogramBin, JointDensity, KEY_EXCEEDANCE_PROBABILITIES, KEY_PERCENTILES,
    LossExceedanceCurve, empirical_cdf, histogram, joint_density, percentile_markers,
};
pub use scenarios::{ComparisonRow, ScenarioComparison, compare_scenarios};
pub use sensitivities::{Sensitivity, sensitivity_analysis};
pub use summary::{ALE_PERCENTILES, AleStatistics, ColumnStatistics, SummaryStatistics, summary};
pub use var::{value_at_risk, value_at_risk_levels};
