//! Summary statistics of a results table.

use crate::core::{ResultColumn, RiskError};
use crate::math::{max_value, mean, min_value, quantile_sorted, sample_std_dev, sorted};
use crate::mc::SimulationResults;

/// Percentile levels reported for the annual loss.
pub const ALE_PERCENTILES: [f64; 6] = [0.10, 0.25, 0.75, 0.90, 0.95, 0.99];

/// Location and spread of one column.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ColumnStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl ColumnStatistics {
    pub fn from_values(values: &[f64]) -> Self {
        let s = sorted(values);
        Self::from_sorted(values, &s)
    }

    fn from_sorted(values: &[f64], sorted: &[f64]) -> Self {
        Self {
            min: min_value(values),
            max: max_value(values),
            mean: mean(values),
            median: quantile_sorted(sorted, 0.5),
            std_dev: sample_std_dev(values),
        }
    }
}

/// Annual loss statistics with the reported percentiles.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct AleStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub percentile_10: f64,
    pub percentile_25: f64,
    pub percentile_75: f64,
    pub percentile_90: f64,
    pub percentile_95: f64,
    pub percentile_99: f64,
}

/// Read-only snapshot derived from one results table.
///
/// LEF and Vulnerability are tracked separately; each column carries its own statistics.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SummaryStatistics {
    pub ale: AleStatistics,
    pub lef: ColumnStatistics,
    pub loss_magnitude: ColumnStatistics,
    pub tef: ColumnStatistics,
    pub vulnerability: ColumnStatistics,
}

/// Reduces `results` to [`SummaryStatistics`]. Fails on an empty table.
pub fn summary(results: &SimulationResults) -> Result<SummaryStatistics, RiskError> {
    ensure_rows(results, "summary")?;

    let ale = results.ale();
    let ale_sorted = sorted(ale);
    let base = ColumnStatistics::from_sorted(ale, &ale_sorted);
    let [p10, p25, p75, p90, p95, p99] = ALE_PERCENTILES.map(|p| quantile_sorted(&ale_sorted, p));

    Ok(SummaryStatistics {
        ale: AleStatistics {
            min: base.min,
            max: base.max,
            mean: base.mean,
            median: base.median,
            std_dev: base.std_dev,
            percentile_10: p10,
            percentile_25: p25,
            percentile_75: p75,
            percentile_90: p90,
            percentile_95: p95,
            percentile_99: p99,
        },
        lef: ColumnStatistics::from_values(results.column(ResultColumn::Lef)),
        loss_magnitude: ColumnStatistics::from_values(results.column(ResultColumn::LossMagnitude)),
        tef: ColumnStatistics::from_values(results.column(ResultColumn::Tef)),
        vulnerability: ColumnStatistics::from_values(results.column(ResultColumn::Vulnerability)),
    })
}

pub(crate) fn ensure_rows(results: &SimulationResults, operation: &str) -> Result<(), RiskError> {
    if results.is_empty() {
        return Err(RiskError::EmptyResults(format!(
            "{operation} requires at least one simulated trial"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn table() -> SimulationResults {
        SimulationResults::from_samples(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![0.5, 0.5, 0.5, 0.5, 0.5],
            vec![100.0, 100.0, 100.0, 100.0, 100.0],
        )
        .unwrap()
    }

    #[test]
    fn ale_statistics_match_hand_computed_values() {
        let stats = summary(&table()).unwrap();
        // ALE column is [50, 100, 150, 200, 250].
        assert_relative_eq!(stats.ale.min, 50.0);
        assert_relative_eq!(stats.ale.max, 250.0);
        assert_relative_eq!(stats.ale.mean, 150.0);
        assert_relative_eq!(stats.ale.median, 150.0);
        assert_relative_eq!(stats.ale.std_dev, 79.056_941_504_209_48, epsilon = 1.0e-9);
        assert_relative_eq!(stats.ale.percentile_10, 70.0, epsilon = 1.0e-9);
        assert_relative_eq!(stats.ale.percentile_25, 100.0, epsilon = 1.0e-9);
        assert_relative_eq!(stats.ale.percentile_99, 248.0, epsilon = 1.0e-9);
    }

    #[test]
    fn lef_and_vulnerability_are_distinct() {
        let stats = summary(&table()).unwrap();
        assert_relative_eq!(stats.vulnerability.mean, 0.5);
        assert_relative_eq!(stats.vulnerability.std_dev, 0.0);
        assert_relative_eq!(stats.lef.mean, 1.5);
        assert_relative_eq!(stats.lef.max, 2.5);
        assert_relative_eq!(stats.tef.median, 3.0);
        assert_relative_eq!(stats.loss_magnitude.mean, 100.0);
    }

    #[test]
    fn empty_table_is_a_usage_error() {
        let empty = SimulationResults::from_samples(vec![], vec![], vec![]).unwrap();
        assert!(matches!(summary(&empty), Err(RiskError::EmptyResults(_))));
    }
}
