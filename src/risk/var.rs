//! Value-at-Risk from the simulated annual-loss distribution.
//!
//! VaR at confidence `c` is the empirical `c`-quantile of the ALE column: the annual loss not
//! exceeded in a fraction `c` of simulated years. Quantiles interpolate linearly between order
//! statistics, so `value_at_risk(results, 0.5)` is the ALE median and the endpoints `0` and `1`
//! return the smallest and largest simulated losses.
//!
//! Numerical notes: high-confidence levels rest on few tail observations; size the run
//! accordingly.
use crate::core::{ResultColumn, RiskError};
use crate::math::{quantile_sorted, sorted};
use crate::mc::SimulationResults;

use super::summary::ensure_rows;

/// Annual-loss VaR at `confidence_level` in `[0, 1]`.
///
/// # Examples
/// ```rust
/// use openfair::mc::SimulationResults;
/// use openfair::risk::value_at_risk;
///
/// let results = SimulationResults::from_samples(
///     vec![1.0, 1.0, 1.0],
///     vec![1.0, 1.0, 1.0],
///     vec![10.0, 20.0, 30.0],
/// )
/// .unwrap();
/// assert_eq!(value_at_risk(&results, 0.5).unwrap(), 20.0);
/// ```
pub fn value_at_risk(results: &SimulationResults, confidence_level: f64) -> Result<f64, RiskError> {
    validate_confidence(confidence_level)?;
    ensure_rows(results, "value_at_risk")?;
    Ok(quantile_sorted(
        &sorted(results.column(ResultColumn::Ale)),
        confidence_level,
    ))
}

/// VaR at several confidence levels, sorting the loss column once.
pub fn value_at_risk_levels(
    results: &SimulationResults,
    confidence_levels: &[f64],
) -> Result<Vec<(f64, f64)>, RiskError> {
    for &c in confidence_levels {
        validate_confidence(c)?;
    }
    ensure_rows(results, "value_at_risk")?;

    let losses = sorted(results.column(ResultColumn::Ale));
    Ok(confidence_levels
        .iter()
        .map(|&c| (c, quantile_sorted(&losses, c)))
        .collect())
}

fn validate_confidence(confidence_level: f64) -> Result<(), RiskError> {
    if !(0.0..=1.0).contains(&confidence_level) {
        return Err(RiskError::InvalidParameter(format!(
            "confidence level must be in [0,1], got {confidence_level}"
        )));
    }
    Ok(())
}
