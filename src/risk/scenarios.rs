//! Side-by-side comparison of several risk scenarios.
//!
//! Every scenario runs on its own stream of the shared [`SimulationEngine`]: stream `i` for
//! the `i`-th model. Results are therefore identical whether the runs execute sequentially or,
//! with the `parallel` feature, across a Rayon pool.
//!
//! Rows are ordered by mean ALE ascending, so [`ScenarioComparison::lowest_risk`] is the first
//! row and [`ScenarioComparison::highest_risk`] the last.
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use crate::core::RiskError;
use crate::math::{mean, quantile_sorted, sorted};
use crate::mc::{SimulationEngine, SimulationResults};
use crate::model::RiskModel;

/// Headline metrics for one scenario.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ComparisonRow {
    pub name: String,
    pub mean_ale: f64,
    pub median_ale: f64,
    pub p95_ale: f64,
    pub mean_lef: f64,
    pub mean_loss_magnitude: f64,
}

impl ComparisonRow {
    fn from_results(name: &str, results: &SimulationResults) -> Result<Self, RiskError> {
        super::summary::ensure_rows(results, "compare_scenarios")?;
        let ale = sorted(results.ale());
        Ok(Self {
            name: name.to_string(),
            mean_ale: mean(results.ale()),
            median_ale: quantile_sorted(&ale, 0.5),
            p95_ale: quantile_sorted(&ale, 0.95),
            mean_lef: mean(results.lef()),
            mean_loss_magnitude: mean(results.loss_magnitude()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScenarioComparison {
    /// Sorted by `mean_ale` ascending.
    pub rows: Vec<ComparisonRow>,
}

impl ScenarioComparison {
    pub fn highest_risk(&self) -> Option<&ComparisonRow> {
        self.rows.last()
    }

    pub fn lowest_risk(&self) -> Option<&ComparisonRow> {
        self.rows.first()
    }

    /// Row for the scenario called `name`, if present.
    pub fn row(&self, name: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.name == name)
    }
}

/// Simulates every model with `engine` and tabulates the headline metrics.
///
/// Fails on an empty model list or on the first model that cannot be simulated.
pub fn compare_scenarios(
    models: &[RiskModel],
    engine: &SimulationEngine,
) -> Result<ScenarioComparison, RiskError> {
    if models.is_empty() {
        return Err(RiskError::InvalidParameter(
            "at least one scenario is required".to_string(),
        ));
    }

    let run_one = |(index, model): (usize, &RiskModel)| -> Result<ComparisonRow, RiskError> {
        let results = engine.run_stream(model, index)?;
        ComparisonRow::from_results(&model.name, &results)
    };

    #[cfg(feature = "parallel")]
    let rows: Result<Vec<_>, _> = models.par_iter().enumerate().map(run_one).collect();
    #[cfg(not(feature = "parallel"))]
    let rows: Result<Vec<_>, _> = models.iter().enumerate().map(run_one).collect();

    let mut rows = rows?;
    rows.sort_by(|a, b| a.mean_ale.total_cmp(&b.mean_ale));
    info!(scenarios = rows.len(), "scenario comparison finished");
    Ok(ScenarioComparison { rows })
}
