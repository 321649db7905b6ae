//! Confidence interval implementations
//!
//! Provides normal-approximation and bootstrap prediction intervals.

use forecast_spi::{ConfidenceInterval, ConfidenceIntervalComputer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Two-sided standard normal quantile for a confidence level, e.g. 1.96 at 0.95.
pub fn z_score(confidence_level: f64) -> f64 {
    inv_norm(0.5 + confidence_level / 2.0)
}

/// Inverse standard normal CDF (Acklam's rational approximation).
fn inv_norm(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        return f64::NAN;
    }

    let a = [
        -3.969683028665376e1,
        2.209460984245205e2,
        -2.759285104469687e2,
        1.383577518672690e2,
        -3.066479806614716e1,
        2.506628277459239e0,
    ];
    let b = [
        -5.447609879822406e1,
        1.615858368580409e2,
        -1.556989798598866e2,
        6.680131188771972e1,
        -1.328068155288572e1,
    ];
    let c = [
        -7.784894002430293e-3,
        -3.223964580411365e-1,
        -2.400758277161838e0,
        -2.549732539343734e0,
        4.374664141464968e0,
        2.938163982698783e0,
    ];
    let d = [
        7.784695709041462e-3,
        3.224671290700398e-1,
        2.445134137142996e0,
        3.754408661907416e0,
    ];

    let p_low = 0.02425;
    let p_high = 1.0 - p_low;

    if p < p_low {
        let q = (-2.0 * p.ln()).sqrt();
        (((((c[0] * q + c[1]) * q + c[2]) * q + c[3]) * q + c[4]) * q + c[5])
            / ((((d[0] * q + d[1]) * q + d[2]) * q + d[3]) * q + 1.0)
    } else if p <= p_high {
        let q = p - 0.5;
        let r = q * q;
        (((((a[0] * r + a[1]) * r + a[2]) * r + a[3]) * r + a[4]) * r + a[5]) * q
            / (((((b[0] * r + b[1]) * r + b[2]) * r + b[3]) * r + b[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((c[0] * q + c[1]) * q + c[2]) * q + c[3]) * q + c[4]) * q + c[5])
            / ((((d[0] * q + d[1]) * q + d[2]) * q + d[3]) * q + 1.0)
    }
}

/// Root mean square, 0 for an empty slice.
pub fn root_mean_square(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

/// Normal-approximation intervals from residuals.
///
/// Half-width at step `h` (1-based) is `z * rms(residuals) * sqrt(h)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResidualIntervalComputer;

impl ResidualIntervalComputer {
    pub fn new() -> Self {
        Self
    }
}

impl ConfidenceIntervalComputer for ResidualIntervalComputer {
    fn compute(
        &self,
        forecast: &[f64],
        residuals: &[f64],
        confidence_level: f64,
    ) -> ConfidenceInterval {
        let scale = z_score(confidence_level) * root_mean_square(residuals);
        let widths: Vec<f64> = (1..=forecast.len())
            .map(|h| scale * (h as f64).sqrt())
            .collect();
        ConfidenceInterval::symmetric(forecast.to_vec(), &widths, confidence_level)
    }
}

/// Seeded residual bootstrap.
///
/// Each sample path perturbs step `h` by a resampled residual scaled by
/// `sqrt(h)`; bounds are the empirical quantiles across paths, widened if
/// needed to contain the point forecast.
#[derive(Debug, Clone, Copy)]
pub struct BootstrapIntervalComputer {
    samples: usize,
    seed: u64,
}

impl BootstrapIntervalComputer {
    pub fn new(samples: usize, seed: u64) -> Self {
        Self {
            samples: samples.max(1),
            seed,
        }
    }
}

impl ConfidenceIntervalComputer for BootstrapIntervalComputer {
    fn compute(
        &self,
        forecast: &[f64],
        residuals: &[f64],
        confidence_level: f64,
    ) -> ConfidenceInterval {
        if residuals.is_empty() || forecast.is_empty() {
            return ConfidenceInterval::symmetric(
                forecast.to_vec(),
                &vec![0.0; forecast.len()],
                confidence_level,
            );
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let paths: Vec<Vec<f64>> = (0..self.samples)
            .map(|_| {
                forecast
                    .iter()
                    .enumerate()
                    .map(|(step, &point)| {
                        let r = residuals[rng.gen_range(0..residuals.len())];
                        point + r * ((step + 1) as f64).sqrt()
                    })
                    .collect()
            })
            .collect();

        let quantiles = bootstrap_prediction_interval(&paths, confidence_level);
        ConfidenceInterval::enclosing(
            forecast.to_vec(),
            quantiles.lower,
            quantiles.upper,
            confidence_level,
        )
    }
}

/// Calculate prediction intervals from bootstrap sample paths.
///
/// The returned `forecast` is the per-step mean of the paths.
pub fn bootstrap_prediction_interval(
    forecasts: &[Vec<f64>],
    confidence_level: f64,
) -> ConfidenceInterval {
    let Some(first) = forecasts.first() else {
        return ConfidenceInterval {
            forecast: vec![],
            lower: vec![],
            upper: vec![],
            confidence_level,
        };
    };

    let n_steps = first.len();
    let n_samples = forecasts.len();

    let alpha = 1.0 - confidence_level;
    let lower_idx = ((alpha / 2.0) * n_samples as f64).floor() as usize;
    let upper_idx = ((1.0 - alpha / 2.0) * n_samples as f64).ceil() as usize;

    let mut forecast = Vec::with_capacity(n_steps);
    let mut lower = Vec::with_capacity(n_steps);
    let mut upper = Vec::with_capacity(n_steps);

    for step in 0..n_steps {
        let mut values: Vec<f64> = forecasts.iter().filter_map(|f| f.get(step).copied()).collect();
        values.sort_by(f64::total_cmp);
        let last = values.len().saturating_sub(1);

        forecast.push(values.iter().sum::<f64>() / values.len().max(1) as f64);
        lower.push(values.get(lower_idx.min(last)).copied().unwrap_or(f64::NAN));
        upper.push(values.get(upper_idx.min(last)).copied().unwrap_or(f64::NAN));
    }

    ConfidenceInterval {
        forecast,
        lower,
        upper,
        confidence_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_score_common_levels() {
        assert!((z_score(0.95) - 1.959964).abs() < 1e-4);
        assert!((z_score(0.90) - 1.644854).abs() < 1e-4);
        assert!((z_score(0.99) - 2.575829).abs() < 1e-4);
        assert!((z_score(0.80) - 1.281552).abs() < 1e-4);
    }

    #[test]
    fn test_z_score_extreme_level_uses_tail_branch() {
        assert!((z_score(0.999) - 3.290527).abs() < 1e-3);
        assert!(z_score(0.01) > 0.0);
    }

    #[test]
    fn test_residual_intervals_widen_with_horizon() {
        let result =
            ResidualIntervalComputer::new().compute(&[10.0, 11.0, 12.0], &[0.1, -0.2, 0.15, -0.1], 0.95);
        assert_eq!(result.forecast, vec![10.0, 11.0, 12.0]);
        let width = |i: usize| result.upper[i] - result.lower[i];
        assert!(width(1) > width(0));
        assert!(width(2) > width(1));
        assert!(result.is_ordered());
    }

    #[test]
    fn test_residual_intervals_without_residuals_collapse() {
        let result = ResidualIntervalComputer::new().compute(&[5.0, 6.0], &[], 0.95);
        assert_eq!(result.lower, result.forecast);
        assert_eq!(result.upper, result.forecast);
    }

    #[test]
    fn test_bootstrap_is_seeded() {
        let residuals = [-2.0, 1.0, -1.0, 2.0, 0.5, -0.5];
        let a = BootstrapIntervalComputer::new(500, 42).compute(&[100.0, 101.0], &residuals, 0.9);
        let b = BootstrapIntervalComputer::new(500, 42).compute(&[100.0, 101.0], &residuals, 0.9);
        assert_eq!(a, b);
        assert!(a.is_ordered());
        assert!(a.upper[0] > a.lower[0]);
    }

    #[test]
    fn test_bootstrap_contains_point_even_with_one_sided_residuals() {
        let result = BootstrapIntervalComputer::new(200, 7).compute(&[50.0], &[3.0, 4.0, 5.0], 0.95);
        assert_eq!(result.lower[0], 50.0);
        assert!(result.upper[0] >= 53.0);
    }

    #[test]
    fn test_bootstrap_interval() {
        let forecasts = vec![
            vec![100.0, 110.0],
            vec![102.0, 112.0],
            vec![98.0, 108.0],
            vec![101.0, 111.0],
        ];
        let result = bootstrap_prediction_interval(&forecasts, 0.95);

        assert_eq!(result.forecast.len(), 2);
        assert!(result.lower[0] <= result.forecast[0]);
        assert!(result.upper[0] >= result.forecast[0]);
    }

    #[test]
    fn test_empty_bootstrap() {
        let result = bootstrap_prediction_interval(&[], 0.95);
        assert!(result.forecast.is_empty());
    }
}
