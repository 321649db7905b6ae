//! Additive time series decomposition.

use forecast_spi::{Decomposer, DecompositionResult, ForecastError, Result};

/// Additive decomposition: Y = T + S + R
#[derive(Debug, Clone, Copy, Default)]
pub struct AdditiveDecomposer;

impl AdditiveDecomposer {
    pub fn new() -> Self {
        Self
    }
}

impl Decomposer for AdditiveDecomposer {
    fn decompose(&self, data: &[f64], period: usize) -> Result<DecompositionResult> {
        decompose_additive(data, period)
    }
}

/// Perform additive decomposition.
///
/// The trend is a centered moving average over one period (a 2×P average for
/// even P), undefined within half a period of either end. Seasonal indices are
/// the phase means of the detrended values, shifted to sum to zero; phases
/// with no detrended value get 0 before the shift.
pub fn decompose_additive(data: &[f64], period: usize) -> Result<DecompositionResult> {
    if period < 2 {
        return Err(ForecastError::invalid_parameter(
            "period",
            "seasonal period must be at least 2",
        ));
    }
    let trend = centered_moving_average(data, period);
    if trend.iter().all(Option::is_none) {
        return Err(ForecastError::invalid_parameter(
            "period",
            format!(
                "period {} needs at least {} points, got {}",
                period,
                2 * (period / 2) + 1,
                data.len()
            ),
        ));
    }

    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (t, (&y, tr)) in data.iter().zip(&trend).enumerate() {
        if let Some(tr) = tr {
            sums[t % period] += y - tr;
            counts[t % period] += 1;
        }
    }
    let raw: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();
    let mean = raw.iter().sum::<f64>() / period as f64;
    let seasonal_indices: Vec<f64> = raw.iter().map(|s| s - mean).collect();

    let residual = data
        .iter()
        .zip(&trend)
        .enumerate()
        .map(|(t, (&y, tr))| tr.map(|tr| y - tr - seasonal_indices[t % period]))
        .collect();

    Ok(DecompositionResult {
        trend,
        seasonal_indices,
        residual,
    })
}

fn centered_moving_average(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = data.len();
    let half = period / 2;
    let mut trend = vec![None; n];
    if n < 2 * half + 1 {
        return trend;
    }
    for t in half..(n - half) {
        let value = if period % 2 == 1 {
            data[t - half..=t + half].iter().sum::<f64>() / period as f64
        } else {
            let inner: f64 = data[t - half + 1..t + half].iter().sum();
            (0.5 * data[t - half] + inner + 0.5 * data[t + half]) / period as f64
        };
        trend[t] = Some(value);
    }
    trend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive_decomposition_recovers_pattern() {
        let pattern = [10.0, -5.0, 0.0, -5.0];
        let data: Vec<f64> = (0..24)
            .map(|i| 100.0 + i as f64 * 2.0 + pattern[i % 4])
            .collect();

        let result = decompose_additive(&data, 4).unwrap();
        assert_eq!(result.trend.len(), data.len());
        assert_eq!(result.period(), 4);
        for (got, want) in result.seasonal_indices.iter().zip(pattern) {
            assert!((got - want).abs() < 1e-9, "{} vs {}", got, want);
        }
        assert!(result.trend[0].is_none());
        assert!((result.trend[2].unwrap() - 104.0).abs() < 1e-9);
        for r in result.residual.iter().flatten() {
            assert!(r.abs() < 1e-9);
        }
    }

    #[test]
    fn test_odd_period_trend() {
        let data: Vec<f64> = (0..9).map(|i| i as f64).collect();
        let result = decompose_additive(&data, 3).unwrap();
        assert_eq!(result.trend[1], Some(1.0));
        assert_eq!(result.trend[8], None);
    }

    #[test]
    fn test_seasonal_indices_sum_to_zero() {
        let data: Vec<f64> = (0..30).map(|i| (i as f64 * 1.3).sin() * 4.0 + i as f64).collect();
        let result = AdditiveDecomposer::new().decompose(&data, 7).unwrap();
        assert!(result.seasonal_indices.iter().sum::<f64>().abs() < 1e-9);
    }

    #[test]
    fn test_short_data() {
        assert!(decompose_additive(&[1.0, 2.0, 3.0], 4).is_err());
        assert!(decompose_additive(&[1.0, 2.0, 3.0], 1).is_err());
    }
}
