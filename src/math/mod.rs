//! Descriptive statistics over sample columns and random-stream utilities.
//!
//! Reductions here work on plain `f64` slices. They do not validate emptiness; the `risk`
//! layer rejects zero-row tables before calling in, and empty inputs yield `NaN`.

pub mod rng;

pub use rng::{SimulationRng, resolve_stream_seed, stream_rng, stream_seed};

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (`n - 1` denominator). A single observation has zero spread.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return if values.is_empty() { f64::NAN } else { 0.0 };
    }
    let m = mean(values);
    let ss = values.iter().map(|v| (v - m).powi(2)).sum::<f64>();
    (ss / (values.len() as f64 - 1.0)).sqrt()
}

pub fn min_value(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

pub fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

/// Ascending copy of a column using total ordering.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// Empirical quantile of an ascending sample with linear interpolation between order
/// statistics (rank `p * (n - 1)`).
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = p.clamp(0.0, 1.0) * (sorted.len() as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let w = rank - lo as f64;
        sorted[lo] + w * (sorted[hi] - sorted[lo])
    }
}

/// Empirical quantile of an unsorted sample.
pub fn empirical_quantile(values: &[f64], p: f64) -> f64 {
    quantile_sorted(&sorted(values), p)
}

/// Pearson correlation of two equally long columns.
///
/// Returns `0.0` when either column has no variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mx = mean(x);
    let my = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 1.0e-300 || syy <= 1.0e-300 {
        return 0.0;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn quantile_interpolates_between_order_statistics() {
        let sample = [4.0, 1.0, 3.0, 2.0, 5.0];
        assert_relative_eq!(empirical_quantile(&sample, 0.5), 3.0);
        assert_relative_eq!(empirical_quantile(&sample, 0.1), 1.4, epsilon = 1.0e-12);
        assert_relative_eq!(empirical_quantile(&sample, 0.0), 1.0);
        assert_relative_eq!(empirical_quantile(&sample, 1.0), 5.0);
    }

    #[test]
    fn sample_std_dev_uses_bessel_correction() {
        let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_std_dev(&sample), 2.138_089_935_299_395, epsilon = 1.0e-12);
        assert_eq!(sample_std_dev(&[3.0]), 0.0);
    }

    #[test]
    fn pearson_detects_direction_and_degenerate_columns() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let up = [2.0, 4.0, 6.0, 8.0];
        let down = [8.0, 6.0, 4.0, 2.0];
        let flat = [1.0, 1.0, 1.0, 1.0];

        assert_relative_eq!(pearson_correlation(&x, &up), 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(pearson_correlation(&x, &down), -1.0, epsilon = 1.0e-12);
        assert_eq!(pearson_correlation(&x, &flat), 0.0);
    }

    #[test]
    fn min_max_of_empty_column_is_nan() {
        assert!(min_value(&[]).is_nan());
        assert!(max_value(&[]).is_nan());
        assert_eq!(min_value(&[3.0, -1.0, 2.0]), -1.0);
        assert_eq!(max_value(&[3.0, -1.0, 2.0]), 3.0);
    }
}
