//! Sampling of one factor from its validated spec.
//!
//! [`sample`] is the single dispatch point over [`DistributionKind`]:
//! - uniform on `[min, max]`,
//! - triangular with `min / most_likely / max`,
//! - PERT approximated by a Beta distribution matched to the PERT mean
//!   `(min + 4 * most_likely + max) / 6`,
//! - lognormal fitted so that `min` and `max` are the 5th and 95th percentiles,
//! - unknown names fall back to uniform.
//!
//! Degenerate inputs short-circuit to constants instead of constructing a distribution:
//! a zero range returns `min` for every draw, and a PERT mean that lands on or rounds past a
//! bound returns that bound. Every draw comes from the caller's generator; nothing else is touched.
//!
//! References: Vose, *Risk Analysis* (3rd ed.), Sec. 9.1.4 (PERT); Malcolm et al. (1959).
use rand::Rng;
use rand::distr::Uniform;
use rand_distr::{Beta, Distribution, LogNormal, Triangular};
use statrs::distribution::{ContinuousCDF, LogNormal as LogNormalCdf};
use tracing::warn;

use crate::core::{DistributionKind, RiskError};

use super::DistributionSpec;

/// Standard normal 95th-percentile z-score used by the lognormal fit.
pub const Z_95: f64 = 1.645;

/// Draws `n` values for `spec` from `rng`.
pub fn sample<R: Rng + ?Sized>(
    spec: &DistributionSpec,
    n: usize,
    rng: &mut R,
) -> Result<Vec<f64>, RiskError> {
    if n == 0 {
        return Err(RiskError::InvalidParameter(
            "sample count must be >= 1".to_string(),
        ));
    }

    let (lo, hi) = (spec.min_value(), spec.max_value());
    match spec.kind() {
        DistributionKind::Uniform => sample_uniform(lo, hi, n, rng),
        DistributionKind::Triangular => sample_triangular(lo, spec.mode(), hi, n, rng),
        DistributionKind::Pert => PertShape::fit(lo, spec.mode(), hi).sample(n, rng),
        DistributionKind::Lognormal => {
            if hi == lo {
                return Ok(vec![lo; n]);
            }
            LognormalFit::from_percentiles(lo, hi).sample(n, rng)
        }
        DistributionKind::Unknown(name) => {
            warn!(
                factor = %spec.factor(),
                distribution = %name,
                "unrecognized distribution, sampling uniform"
            );
            sample_uniform(lo, hi, n, rng)
        }
    }
}

fn draw<D, R>(dist: &D, n: usize, rng: &mut R) -> Vec<f64>
where
    D: Distribution<f64>,
    R: Rng + ?Sized,
{
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(dist.sample(rng));
    }
    out
}

fn sample_uniform<R: Rng + ?Sized>(
    lo: f64,
    hi: f64,
    n: usize,
    rng: &mut R,
) -> Result<Vec<f64>, RiskError> {
    if hi == lo {
        return Ok(vec![lo; n]);
    }
    let dist = Uniform::new_inclusive(lo, hi)
        .map_err(|e| RiskError::Numerical(format!("uniform({lo}, {hi}): {e}")))?;
    Ok(draw(&dist, n, rng))
}

fn sample_triangular<R: Rng + ?Sized>(
    lo: f64,
    mode: f64,
    hi: f64,
    n: usize,
    rng: &mut R,
) -> Result<Vec<f64>, RiskError> {
    if hi == lo {
        return Ok(vec![lo; n]);
    }
    let dist = Triangular::new(lo, hi, mode)
        .map_err(|e| RiskError::Numerical(format!("triangular({lo}, {mode}, {hi}): {e}")))?;
    // Guard against round-off at the edges of very narrow ranges.
    Ok(draw(&dist, n, rng)
        .into_iter()
        .map(|x| x.clamp(lo, hi))
        .collect())
}

/// Beta shape matched to the PERT mean of a three-point estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PertShape {
    /// Zero range, or a PERT mean at or beyond a bound.
    Constant(f64),
    /// `min + range * Beta(alpha, beta)`.
    Beta {
        alpha: f64,
        beta: f64,
        min: f64,
        range: f64,
    },
}

impl PertShape {
    pub fn fit(min: f64, most_likely: f64, max: f64) -> Self {
        let range = max - min;
        if range == 0.0 {
            return Self::Constant(min);
        }

        // Round-off can push the mean onto or just past a bound when `most_likely` sits on it.
        let mu = (min + 4.0 * most_likely + max) / 6.0;
        if mu <= min || mu >= max {
            return Self::Constant(mu.clamp(min, max));
        }

        let v = (mu - min) * (max - mu) / (range * range);
        let location = (mu - min) / range;
        let k = 1.0 / v - 1.0;
        Self::Beta {
            alpha: location * k,
            beta: (1.0 - location) * k,
            min,
            range,
        }
    }

    /// Mean of the fitted distribution; equals the PERT mean.
    pub fn mean(&self) -> f64 {
        match *self {
            Self::Constant(c) => c,
            Self::Beta {
                alpha,
                beta,
                min,
                range,
            } => min + range * alpha / (alpha + beta),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<f64>, RiskError> {
        match *self {
            Self::Constant(c) => Ok(vec![c; n]),
            Self::Beta {
                alpha,
                beta,
                min,
                range,
            } => {
                let dist = Beta::new(alpha, beta).map_err(|e| {
                    RiskError::Numerical(format!("beta({alpha}, {beta}): {e}"))
                })?;
                Ok(draw(&dist, n, rng)
                    .into_iter()
                    .map(|b| min + b * range)
                    .collect())
            }
        }
    }
}

/// Lognormal parameters fitted from a 5th/95th percentile pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LognormalFit {
    /// Mean of the underlying normal.
    pub mu: f64,
    /// Standard deviation of the underlying normal.
    pub sigma: f64,
}

impl LognormalFit {
    /// `sigma = (ln p95 - ln p05) / (2 * 1.645)`, `mu = (ln p05 + ln p95) / 2`.
    pub fn from_percentiles(p05: f64, p95: f64) -> Self {
        let ln_min = p05.ln();
        let ln_max = p95.ln();
        Self {
            mu: 0.5 * (ln_min + ln_max),
            sigma: (ln_max - ln_min) / (2.0 * Z_95),
        }
    }

    pub fn median(&self) -> f64 {
        self.mu.exp()
    }

    pub fn mean(&self) -> f64 {
        (self.mu + 0.5 * self.sigma * self.sigma).exp()
    }

    /// Theoretical quantile of the fitted distribution.
    pub fn quantile(&self, p: f64) -> Result<f64, RiskError> {
        if !(p > 0.0 && p < 1.0) {
            return Err(RiskError::InvalidParameter(format!(
                "quantile level must be in (0,1), got {p}"
            )));
        }
        if self.sigma == 0.0 {
            return Ok(self.median());
        }
        let dist = LogNormalCdf::new(self.mu, self.sigma)
            .map_err(|e| RiskError::Numerical(format!("lognormal({}, {}): {e}", self.mu, self.sigma)))?;
        Ok(dist.inverse_cdf(p))
    }

    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<f64>, RiskError> {
        let dist = LogNormal::new(self.mu, self.sigma).map_err(|e| {
            RiskError::Numerical(format!("lognormal({}, {}): {e}", self.mu, self.sigma))
        })?;
        Ok(draw(&dist, n, rng))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::core::Factor;
    use crate::math::{empirical_quantile, mean};

    fn spec(factor: Factor, lo: f64, hi: f64, ml: Option<f64>, kind: DistributionKind) -> DistributionSpec {
        DistributionSpec::new(factor, lo, hi, ml, kind).unwrap()
    }

    #[test]
    fn degenerate_uniform_returns_constant() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = spec(Factor::LossMagnitude, 250.0, 250.0, None, DistributionKind::Uniform);
        let draws = sample(&s, 500, &mut rng).unwrap();
        assert_eq!(draws.len(), 500);
        assert!(draws.iter().all(|&x| x == 250.0));
    }

    #[test]
    fn uniform_draws_stay_in_range_and_center() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = spec(Factor::ThreatEventFrequency, 0.5, 3.0, None, DistributionKind::Uniform);
        let draws = sample(&s, 20_000, &mut rng).unwrap();
        assert!(draws.iter().all(|&x| (0.5..=3.0).contains(&x)));
        assert_relative_eq!(mean(&draws), 1.75, epsilon = 0.03);
    }

    #[test]
    fn triangular_mean_matches_closed_form() {
        let mut rng = StdRng::seed_from_u64(11);
        let s = spec(Factor::Vulnerability, 0.2, 0.6, Some(0.3), DistributionKind::Triangular);
        let draws = sample(&s, 50_000, &mut rng).unwrap();
        assert!(draws.iter().all(|&x| (0.2..=0.6).contains(&x)));
        assert_relative_eq!(mean(&draws), (0.2 + 0.3 + 0.6) / 3.0, epsilon = 5.0e-3);
    }

    #[test]
    fn pert_fit_matches_pert_mean() {
        let shape = PertShape::fit(100_000.0, 500_000.0, 2_000_000.0);
        let expected = (100_000.0 + 4.0 * 500_000.0 + 2_000_000.0) / 6.0;
        assert_relative_eq!(shape.mean(), expected, max_relative = 1.0e-12);
        match shape {
            PertShape::Beta { alpha, beta, .. } => assert!(alpha > 0.0 && beta > 0.0),
            PertShape::Constant(_) => panic!("expected a beta shape"),
        }
    }

    #[test]
    fn pert_sample_mean_converges() {
        let mut rng = StdRng::seed_from_u64(3);
        let s = spec(Factor::LossMagnitude, 10_000.0, 500_000.0, Some(100_000.0), DistributionKind::Pert);
        let draws = sample(&s, 50_000, &mut rng).unwrap();
        let expected = (10_000.0 + 400_000.0 + 500_000.0) / 6.0;
        assert!(draws.iter().all(|&x| (10_000.0..=500_000.0).contains(&x)));
        assert_relative_eq!(mean(&draws), expected, max_relative = 0.02);
    }

    #[test]
    fn pert_zero_range_short_circuits() {
        assert_eq!(PertShape::fit(0.0, 0.0, 0.0), PertShape::Constant(0.0));
        let mut rng = StdRng::seed_from_u64(5);
        let s = spec(Factor::LossMagnitude, 0.0, 0.0, Some(0.0), DistributionKind::Pert);
        assert!(sample(&s, 1_000, &mut rng).unwrap().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn pert_mean_on_bound_short_circuits() {
        // 4 * 1e17 + 2e17 + 16 rounds to 6e17, so the PERT mean collapses onto the minimum.
        let lo = 1.0e17;
        let hi = 1.0e17 + 16.0;
        assert_eq!(PertShape::fit(lo, lo, hi), PertShape::Constant(lo));

        let mut rng = StdRng::seed_from_u64(9);
        let s = spec(Factor::LossMagnitude, lo, hi, Some(lo), DistributionKind::Pert);
        assert!(sample(&s, 100, &mut rng).unwrap().iter().all(|&x| x == lo));
    }

    #[test]
    fn pert_mean_rounding_past_a_bound_is_clamped() {
        // The weighted mean rounds above `max` here.
        let (lo, hi) = (6_866.807_396_537_439, 6_866.807_396_537_441);
        assert_eq!(PertShape::fit(lo, hi, hi), PertShape::Constant(hi));
        let mut rng = StdRng::seed_from_u64(10);
        let s = spec(Factor::LossMagnitude, lo, hi, Some(hi), DistributionKind::Pert);
        let draws = sample(&s, 10, &mut rng).unwrap();
        assert!(draws.iter().all(|&x| x == hi));

        // And below `min` here.
        let (lo, hi) = (768_152_997_823.907_5, 768_152_997_823.907_6);
        assert_eq!(PertShape::fit(lo, lo, hi), PertShape::Constant(lo));
        let s = spec(Factor::LossMagnitude, lo, hi, Some(lo), DistributionKind::Pert);
        let draws = sample(&s, 10, &mut rng).unwrap();
        assert!(draws.iter().all(|&x| x == lo));
    }

    #[test]
    fn lognormal_fit_recovers_percentiles() {
        let fit = LognormalFit::from_percentiles(1.0, 3.29_f64.exp());
        assert_relative_eq!(fit.mu, 1.645, epsilon = 1.0e-12);
        assert_relative_eq!(fit.sigma, 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(fit.quantile(0.05).unwrap(), 1.0, epsilon = 1.0e-3);
        assert_relative_eq!(fit.quantile(0.95).unwrap(), 3.29_f64.exp(), max_relative = 1.0e-3);
        assert!(fit.quantile(1.0).is_err());
    }

    #[test]
    fn lognormal_sample_percentiles_match_inputs() {
        let mut rng = StdRng::seed_from_u64(2024);
        let hi = 3.29_f64.exp();
        let s = spec(Factor::LossMagnitude, 1.0, hi, None, DistributionKind::Lognormal);
        let draws = sample(&s, 100_000, &mut rng).unwrap();
        assert_relative_eq!(empirical_quantile(&draws, 0.05), 1.0, max_relative = 0.05);
        assert_relative_eq!(empirical_quantile(&draws, 0.95), hi, max_relative = 0.05);
    }

    #[test]
    fn unknown_kind_falls_back_to_uniform() {
        let mut a = StdRng::seed_from_u64(17);
        let mut b = StdRng::seed_from_u64(17);
        let unknown = spec(
            Factor::ThreatEventFrequency,
            1.0,
            4.0,
            None,
            DistributionKind::Unknown("weibull".to_string()),
        );
        let uniform = spec(Factor::ThreatEventFrequency, 1.0, 4.0, None, DistributionKind::Uniform);
        assert_eq!(
            sample(&unknown, 256, &mut a).unwrap(),
            sample(&uniform, 256, &mut b).unwrap()
        );
    }

    #[test]
    fn zero_samples_is_invalid() {
        let mut rng = StdRng::seed_from_u64(0);
        let s = spec(Factor::LossMagnitude, 1.0, 2.0, None, DistributionKind::Uniform);
        assert!(matches!(sample(&s, 0, &mut rng), Err(RiskError::InvalidParameter(_))));
    }
}
