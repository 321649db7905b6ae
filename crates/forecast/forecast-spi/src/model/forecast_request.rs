//! Forecast request and per-prediction interval context

use analytics_spi::AggregatedSeries;
use serde::{Deserialize, Serialize};

use crate::{Algorithm, ForecastError, Result};

/// A request to extend a time series `horizon` periods into the future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Time-grouped history; gaps are repaired before fitting
    pub series: AggregatedSeries,
    pub horizon: usize,
    pub algorithm: Algorithm,
    /// Interval coverage in `(0, 1)`
    pub confidence_level: f64,
}

impl ForecastRequest {
    pub fn new(
        series: AggregatedSeries,
        horizon: usize,
        algorithm: Algorithm,
        confidence_level: f64,
    ) -> Self {
        Self {
            series,
            horizon,
            algorithm,
            confidence_level,
        }
    }

    /// Reject a zero horizon or a confidence level outside `(0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(ForecastError::invalid_parameter(
                "horizon",
                "must be at least 1",
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ForecastError::invalid_parameter(
                "confidence_level",
                format!("must be in (0, 1), got {}", self.confidence_level),
            ));
        }
        Ok(())
    }
}

/// Inputs a strategy needs to size its intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalContext {
    pub confidence_level: f64,
    /// `actual - predicted` over the backtest window; empty while backtesting
    pub backtest_residuals: Vec<f64>,
    /// Seed for stochastic interval estimation
    pub seed: u64,
}

impl IntervalContext {
    pub fn new(confidence_level: f64, seed: u64) -> Self {
        Self {
            confidence_level,
            backtest_residuals: Vec::new(),
            seed,
        }
    }

    pub fn with_backtest_residuals(mut self, residuals: Vec<f64>) -> Self {
        self.backtest_residuals = residuals;
        self
    }
}
