//! Shape of the simulated loss distribution: histogram, empirical CDF, loss-exceedance curve
//! and joint density of two result columns.
//!
//! These are the numeric series behind the usual FAIR charts. Binning uses equal-width bins
//! over the observed range; the upper edge of the last bin is inclusive.
use crate::core::{ResultColumn, RiskError};
use crate::math::{max_value, min_value, quantile_sorted, sorted};
use crate::mc::SimulationResults;

use super::summary::ensure_rows;

/// Percentile markers drawn on loss histograms and CDFs.
pub const KEY_PERCENTILES: [f64; 3] = [0.50, 0.90, 0.95];

/// Exceedance probabilities highlighted on a loss-exceedance curve.
pub const KEY_EXCEEDANCE_PROBABILITIES: [f64; 3] = [0.50, 0.10, 0.05];

/// Bins per axis of [`joint_density`] when callers have no preference.
pub const DEFAULT_JOINT_BINS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// `count / (n * width)`; a degenerate single-valued sample has density `1`.
    pub density: f64,
}

/// Equal-width histogram with probability-density normalization.
pub fn histogram(values: &[f64], bins: usize) -> Result<Vec<HistogramBin>, RiskError> {
    if values.is_empty() {
        return Err(RiskError::EmptyResults(
            "histogram requires at least one value".to_string(),
        ));
    }
    if bins == 0 {
        return Err(RiskError::InvalidParameter("bins must be >= 1".to_string()));
    }

    let lo = min_value(values);
    let hi = max_value(values);
    let n = values.len() as f64;
    if hi == lo {
        return Ok(vec![HistogramBin {
            lower: lo,
            upper: hi,
            count: values.len(),
            density: 1.0,
        }]);
    }

    let counts = bin_counts(values, lo, hi, bins);
    let width = (hi - lo) / bins as f64;
    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + i as f64 * width,
            upper: if i + 1 == bins {
                hi
            } else {
                lo + (i + 1) as f64 * width
            },
            count,
            density: count as f64 / (n * width),
        })
        .collect())
}

fn bin_index(x: f64, lo: f64, hi: f64, bins: usize) -> usize {
    if hi == lo {
        return 0;
    }
    let pos = (x - lo) / (hi - lo) * bins as f64;
    (pos.floor().max(0.0) as usize).min(bins - 1)
}

fn bin_counts(values: &[f64], lo: f64, hi: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0_usize; bins];
    for &x in values {
        counts[bin_index(x, lo, hi, bins)] += 1;
    }
    counts
}

/// Empirical CDF points `(x_(i), i / n)` over the ascending sample.
pub fn empirical_cdf(values: &[f64]) -> Vec<(f64, f64)> {
    let s = sorted(values);
    let n = s.len() as f64;
    s.into_iter()
        .enumerate()
        .map(|(i, x)| (x, (i + 1) as f64 / n))
        .collect()
}

/// ALE values at [`KEY_PERCENTILES`].
pub fn percentile_markers(results: &SimulationResults) -> Result<Vec<(f64, f64)>, RiskError> {
    ensure_rows(results, "percentile_markers")?;
    let s = sorted(results.column(ResultColumn::Ale));
    Ok(KEY_PERCENTILES
        .iter()
        .map(|&p| (p, quantile_sorted(&s, p)))
        .collect())
}

/// Probability that the annual loss exceeds each simulated loss level.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LossExceedanceCurve {
    /// Ascending ALE values.
    pub losses: Vec<f64>,
    /// `1 - i / n` for the `i`-th smallest loss (1-based).
    pub exceedance: Vec<f64>,
}

impl LossExceedanceCurve {
    pub fn from_results(results: &SimulationResults) -> Result<Self, RiskError> {
        ensure_rows(results, "loss_exceedance_curve")?;
        let losses = sorted(results.column(ResultColumn::Ale));
        let n = losses.len() as f64;
        let exceedance = (1..=losses.len()).map(|i| 1.0 - i as f64 / n).collect();
        Ok(Self { losses, exceedance })
    }

    /// Loss whose exceedance probability is closest to `probability` (first match on ties).
    pub fn loss_at_exceedance(&self, probability: f64) -> f64 {
        let mut best = 0;
        let mut best_gap = f64::INFINITY;
        for (i, &p) in self.exceedance.iter().enumerate() {
            let gap = (p - probability).abs();
            if gap < best_gap {
                best = i;
                best_gap = gap;
            }
        }
        self.losses.get(best).copied().unwrap_or(f64::NAN)
    }

    /// Fraction of simulated years with a loss strictly above `loss`.
    pub fn probability_of_exceeding(&self, loss: f64) -> f64 {
        let at_or_below = self.losses.partition_point(|&x| x <= loss);
        (self.losses.len() - at_or_below) as f64 / self.losses.len() as f64
    }

    /// `(probability, loss)` at [`KEY_EXCEEDANCE_PROBABILITIES`].
    pub fn key_points(&self) -> Vec<(f64, f64)> {
        KEY_EXCEEDANCE_PROBABILITIES
            .iter()
            .map(|&p| (p, self.loss_at_exceedance(p)))
            .collect()
    }
}

/// Normalized 2-D cross-tabulation of two result columns.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct JointDensity {
    pub x: ResultColumn,
    pub y: ResultColumn,
    /// `bins + 1` edges along `x`.
    pub x_edges: Vec<f64>,
    /// `bins + 1` edges along `y`.
    pub y_edges: Vec<f64>,
    /// `cells[y_bin][x_bin]`, fractions of all trials; sums to one.
    pub cells: Vec<Vec<f64>>,
}

pub fn joint_density(
    results: &SimulationResults,
    x: ResultColumn,
    y: ResultColumn,
    bins: usize,
) -> Result<JointDensity, RiskError> {
    ensure_rows(results, "joint_density")?;
    if bins == 0 {
        return Err(RiskError::InvalidParameter("bins must be >= 1".to_string()));
    }

    let xs = results.column(x);
    let ys = results.column(y);
    let (x_lo, x_hi) = (min_value(xs), max_value(xs));
    let (y_lo, y_hi) = (min_value(ys), max_value(ys));

    let mut cells = vec![vec![0.0; bins]; bins];
    let weight = 1.0 / results.len() as f64;
    for (&a, &b) in xs.iter().zip(ys) {
        let i = bin_index(a, x_lo, x_hi, bins);
        let j = bin_index(b, y_lo, y_hi, bins);
        cells[j][i] += weight;
    }

    Ok(JointDensity {
        x,
        y,
        x_edges: edges(x_lo, x_hi, bins),
        y_edges: edges(y_lo, y_hi, bins),
        cells,
    })
}

fn edges(lo: f64, hi: f64, bins: usize) -> Vec<f64> {
    let width = (hi - lo) / bins as f64;
    (0..=bins)
        .map(|i| if i == bins { hi } else { lo + i as f64 * width })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn losses(values: &[f64]) -> SimulationResults {
        let n = values.len();
        SimulationResults::from_samples(vec![1.0; n], vec![1.0; n], values.to_vec()).unwrap()
    }

    #[test]
    fn histogram_density_integrates_to_one() {
        let values: Vec<f64> = (0..1_000).map(|i| (i as f64).sqrt()).collect();
        let bins = histogram(&values, 50).unwrap();
        assert_eq!(bins.len(), 50);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 1_000);
        let area: f64 = bins.iter().map(|b| b.density * (b.upper - b.lower)).sum();
        assert_relative_eq!(area, 1.0, epsilon = 1.0e-9);
        assert_eq!(bins.last().unwrap().upper, values[999]);
    }

    #[test]
    fn histogram_of_constant_sample_is_one_bin() {
        let bins = histogram(&[4.0, 4.0, 4.0], 10).unwrap();
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
        assert!(histogram(&[1.0], 0).is_err());
        assert!(histogram(&[], 10).is_err());
    }

    #[test]
    fn empirical_cdf_ends_at_one() {
        let cdf = empirical_cdf(&[3.0, 1.0, 2.0, 4.0]);
        assert_eq!(cdf.first().unwrap(), &(1.0, 0.25));
        assert_eq!(cdf.last().unwrap(), &(4.0, 1.0));
    }

    #[test]
    fn exceedance_curve_matches_order_statistics() {
        let results = losses(&(1..=100).map(f64::from).collect::<Vec<_>>());
        let curve = LossExceedanceCurve::from_results(&results).unwrap();
        assert_eq!(curve.losses.len(), 100);
        assert_relative_eq!(curve.exceedance[0], 0.99);
        assert_relative_eq!(curve.exceedance[99], 0.0);

        assert_relative_eq!(curve.loss_at_exceedance(0.5), 50.0);
        assert_relative_eq!(curve.loss_at_exceedance(0.1), 90.0);
        assert_relative_eq!(curve.probability_of_exceeding(90.0), 0.10, epsilon = 1.0e-12);
        assert_relative_eq!(curve.probability_of_exceeding(0.0), 1.0);
        assert_relative_eq!(curve.probability_of_exceeding(1_000.0), 0.0);

        let keys = curve.key_points();
        assert_eq!(keys.len(), 3);
        assert_relative_eq!(keys[2].1, 95.0);
    }

    #[test]
    fn percentile_markers_follow_quantiles() {
        let results = losses(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let markers = percentile_markers(&results).unwrap();
        assert_relative_eq!(markers[0].1, 30.0);
        assert_relative_eq!(markers[1].1, 46.0, epsilon = 1.0e-9);
    }

    #[test]
    fn joint_density_sums_to_one() {
        let results = SimulationResults::from_samples(
            vec![1.0, 2.0, 3.0, 4.0],
            vec![0.1, 0.2, 0.3, 0.4],
            vec![10.0, 10.0, 10.0, 10.0],
        )
        .unwrap();
        let jd = joint_density(&results, ResultColumn::Tef, ResultColumn::Vulnerability, 4).unwrap();
        assert_eq!(jd.x_edges.len(), 5);
        let total: f64 = jd.cells.iter().flatten().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1.0e-12);
        // Perfectly co-monotone inputs fill the diagonal only.
        for (j, row) in jd.cells.iter().enumerate() {
            for (i, &cell) in row.iter().enumerate() {
                if i == j {
                    assert_relative_eq!(cell, 0.25);
                } else {
                    assert_eq!(cell, 0.0);
                }
            }
        }
    }
}
