//! Linear trend regression
//!
//! Fits y = intercept + slope * t by ordinary least squares over the time
//! index and extrapolates the line.

use forecast_spi::{
    Algorithm, ConfidenceInterval, ConfidenceIntervalComputer, ForecastError, Forecaster,
    IntervalContext, Result,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::confidence::ResidualIntervalComputer;

/// Straight line over a time index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub intercept: f64,
    pub slope: f64,
}

impl Line {
    pub fn at(&self, t: f64) -> f64 {
        self.intercept + self.slope * t
    }
}

/// OLS line through `(t, y)` points.
pub fn fit_line(points: &[(f64, f64)]) -> Result<Line> {
    let n = points.len() as f64;
    let sum_t: f64 = points.iter().map(|(t, _)| t).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_t2: f64 = points.iter().map(|(t, _)| t * t).sum();
    let sum_ty: f64 = points.iter().map(|(t, y)| t * y).sum();

    let denominator = n * sum_t2 - sum_t * sum_t;
    if denominator.abs() < 1e-10 {
        return Err(ForecastError::NumericalError(
            "Singular matrix in regression".to_string(),
        ));
    }

    let slope = (n * sum_ty - sum_t * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_t) / n;
    Ok(Line { intercept, slope })
}

/// Fitted regression line plus in-sample residuals.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionModel {
    pub line: Line,
    pub n_observations: usize,
    pub residuals: Vec<f64>,
}

impl RegressionModel {
    /// Coefficient of determination of the in-sample fit.
    pub fn r_squared(&self, data: &[f64]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let mean = data.iter().sum::<f64>() / data.len() as f64;
        let ss_tot: f64 = data.iter().map(|y| (y - mean).powi(2)).sum();
        let ss_res: f64 = self.residuals.iter().map(|r| r * r).sum();
        if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else {
            0.0
        }
    }
}

/// Linear trend strategy.
///
/// Bands are normal intervals from the backtest residuals, growing with
/// `sqrt(h)`; the in-sample residuals stand in when no backtest ran.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegressionLike;

impl RegressionLike {
    pub fn new() -> Self {
        Self
    }
}

impl Forecaster for RegressionLike {
    type Model = RegressionModel;

    fn algorithm(&self) -> Algorithm {
        Algorithm::RegressionLike
    }

    fn min_history(&self, horizon: usize) -> usize {
        horizon.max(3)
    }

    fn fit(&self, history: &[f64]) -> Result<RegressionModel> {
        if history.len() < 2 {
            return Err(ForecastError::InsufficientData {
                algorithm: Algorithm::RegressionLike,
                required: 2,
                actual: history.len(),
            });
        }

        let points: Vec<(f64, f64)> = history
            .iter()
            .enumerate()
            .map(|(i, &y)| (i as f64, y))
            .collect();
        let line = fit_line(&points)?;
        let residuals = points.iter().map(|&(t, y)| y - line.at(t)).collect();

        let model = RegressionModel {
            line,
            n_observations: history.len(),
            residuals,
        };
        debug!(
            slope = line.slope,
            r_squared = model.r_squared(history),
            n = history.len(),
            "regression line fitted"
        );
        Ok(model)
    }

    fn predict(
        &self,
        model: &RegressionModel,
        horizon: usize,
        ctx: &IntervalContext,
    ) -> Result<ConfidenceInterval> {
        let n = model.n_observations;
        let forecast: Vec<f64> = (0..horizon).map(|h| model.line.at((n + h) as f64)).collect();

        let residuals = if ctx.backtest_residuals.is_empty() {
            &model.residuals
        } else {
            &ctx.backtest_residuals
        };
        Ok(ResidualIntervalComputer::new().compute(&forecast, residuals, ctx.confidence_level))
    }
}
