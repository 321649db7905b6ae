//! Trend plus seasonality
//!
//! Additive decomposition, a least-squares line through the smoothed trend,
//! and the seasonal cycle repeated forward. Bands come from a seeded bootstrap
//! of the in-sample residuals.

use forecast_spi::{
    Algorithm, ConfidenceInterval, ConfidenceIntervalComputer, Decomposer, ForecastError,
    Forecaster, IntervalContext, Result,
};

use super::regression::{fit_line, Line};
use crate::confidence::BootstrapIntervalComputer;
use crate::decomposition::AdditiveDecomposer;

/// Smallest seasonal period the decomposition accepts.
pub const MIN_SEASONAL_PERIOD: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ProphetModel {
    pub trend: Line,
    pub seasonal_indices: Vec<f64>,
    pub n_observations: usize,
    pub residuals: Vec<f64>,
}

impl ProphetModel {
    fn value_at(&self, t: usize) -> f64 {
        let seasonal = if self.seasonal_indices.is_empty() {
            0.0
        } else {
            self.seasonal_indices[t % self.seasonal_indices.len()]
        };
        self.trend.at(t as f64) + seasonal
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProphetLike {
    period: usize,
    bootstrap_samples: usize,
}

impl ProphetLike {
    pub fn new(period: usize, bootstrap_samples: usize) -> Result<Self> {
        if period < MIN_SEASONAL_PERIOD {
            return Err(ForecastError::invalid_parameter(
                "seasonal_period",
                format!("must be at least {}, got {}", MIN_SEASONAL_PERIOD, period),
            ));
        }
        if bootstrap_samples == 0 {
            return Err(ForecastError::invalid_parameter(
                "bootstrap_samples",
                "must be at least 1",
            ));
        }
        Ok(Self {
            period,
            bootstrap_samples,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Forecaster for ProphetLike {
    type Model = ProphetModel;

    fn algorithm(&self) -> Algorithm {
        Algorithm::ProphetLike
    }

    fn min_history(&self, _horizon: usize) -> usize {
        2 * self.period
    }

    fn fit(&self, history: &[f64]) -> Result<ProphetModel> {
        let required = self.period + 2;
        if history.len() < required {
            return Err(ForecastError::InsufficientData {
                algorithm: Algorithm::ProphetLike,
                required,
                actual: history.len(),
            });
        }

        let decomposition = AdditiveDecomposer::new().decompose(history, self.period)?;
        let trend_points: Vec<(f64, f64)> = decomposition
            .defined_trend()
            .into_iter()
            .map(|(t, v)| (t as f64, v))
            .collect();
        let trend = fit_line(&trend_points)?;

        let mut model = ProphetModel {
            trend,
            seasonal_indices: decomposition.seasonal_indices,
            n_observations: history.len(),
            residuals: Vec::new(),
        };
        model.residuals = history
            .iter()
            .enumerate()
            .map(|(t, y)| y - model.value_at(t))
            .collect();
        Ok(model)
    }

    fn predict(
        &self,
        model: &ProphetModel,
        horizon: usize,
        ctx: &IntervalContext,
    ) -> Result<ConfidenceInterval> {
        let n = model.n_observations;
        let forecast: Vec<f64> = (n..n + horizon).map(|t| model.value_at(t)).collect();
        Ok(BootstrapIntervalComputer::new(self.bootstrap_samples, ctx.seed).compute(
            &forecast,
            &model.residuals,
            ctx.confidence_level,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seasonal_series(n: usize) -> Vec<f64> {
        let pattern = [8.0, -2.0, -4.0, -2.0];
        (0..n).map(|t| 50.0 + 1.5 * t as f64 + pattern[t % 4]).collect()
    }

    #[test]
    fn test_rejects_short_period() {
        assert!(ProphetLike::new(3, 100).is_err());
        assert!(ProphetLike::new(4, 0).is_err());
    }

    #[test]
    fn test_min_history_is_two_cycles() {
        assert_eq!(ProphetLike::new(12, 100).unwrap().min_history(6), 24);
    }

    #[test]
    fn test_continues_trend_and_cycle() {
        let prophet = ProphetLike::new(4, 200).unwrap();
        let data = seasonal_series(24);
        let model = prophet.fit(&data).unwrap();
        let ci = prophet
            .predict(&model, 4, &IntervalContext::new(0.9, 3))
            .unwrap();

        let expected = seasonal_series(28);
        for (got, want) in ci.forecast.iter().zip(&expected[24..]) {
            assert!((got - want).abs() < 1e-6, "{} vs {}", got, want);
        }
        assert!(ci.is_ordered());
    }

    #[test]
    fn test_same_seed_same_bands() {
        let prophet = ProphetLike::new(4, 300).unwrap();
        let data: Vec<f64> = seasonal_series(20)
            .iter()
            .enumerate()
            .map(|(t, v)| v + if t % 3 == 0 { 1.0 } else { -0.5 })
            .collect();
        let model = prophet.fit(&data).unwrap();
        let ctx = IntervalContext::new(0.95, 11);
        let a = prophet.predict(&model, 3, &ctx).unwrap();
        let b = prophet.predict(&model, 3, &ctx).unwrap();
        assert_eq!(a, b);
        assert!(a.upper[0] > a.lower[0]);
    }

    #[test]
    fn test_fit_needs_period_plus_two() {
        let prophet = ProphetLike::new(4, 10).unwrap();
        assert!(matches!(
            prophet.fit(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            Err(ForecastError::InsufficientData { required: 6, actual: 5, .. })
        ));
    }
}
