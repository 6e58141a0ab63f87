//! Input-to-loss sensitivity ranking.
//!
//! Each input column (TEF, Vulnerability, LossMagnitude) is correlated with ALE across all
//! trials using Pearson's coefficient. The sign gives the direction of influence and the
//! magnitude its strength; results are ordered by absolute correlation, strongest first.
//! LEF is deliberately not ranked: it is a product of two ranked inputs.
use crate::core::{ResultColumn, RiskError};
use crate::math::pearson_correlation;
use crate::mc::SimulationResults;

use super::summary::ensure_rows;

/// Correlation of one input with the annual loss.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Sensitivity {
    pub input: ResultColumn,
    pub correlation: f64,
}

/// Inputs ranked by `|correlation|` with ALE, descending. Constant columns score `0`.
pub fn sensitivity_analysis(results: &SimulationResults) -> Result<Vec<Sensitivity>, RiskError> {
    ensure_rows(results, "sensitivity_analysis")?;

    let ale = results.column(ResultColumn::Ale);
    let mut ranked: Vec<Sensitivity> = ResultColumn::INPUTS
        .iter()
        .map(|&input| Sensitivity {
            input,
            correlation: pearson_correlation(results.column(input), ale),
        })
        .collect();
    ranked.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
    Ok(ranked)
}
