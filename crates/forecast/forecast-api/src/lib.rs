//! Forecast Consumer API
//!
//! Consumer configurations and builder APIs for forecasting.
//!
//! This crate provides:
//! - `ForecastConfig` with defaults for level, horizon and strategy parameters
//! - A builder for forecast requests
//! - Re-exports from SPI and core for convenience

// Re-export from core
pub use forecast_core::{
    backtest, confidence, decomposition, engine, metrics, repair, strategy, AdditiveDecomposer,
    ArimaLike, ArimaOrder, Backtest, BootstrapIntervalComputer, EngineOptions, FittedModel,
    ForecastEngine, ProphetLike, RegressionLike, RepairedSeries, ResidualIntervalComputer,
    SeasonalPeriods, Strategy,
};

// Re-export traits and models from SPI
pub use forecast_spi::{
    Algorithm, BacktestMetrics, ConfidenceInterval, ConfidenceIntervalComputer, Decomposer,
    DecompositionResult, ForecastError, ForecastRequest, ForecastResult, ForecastSummary,
    Forecaster, HorizonPoint, IntervalContext, Mape, RepairReport, Result,
};

use analytics_spi::AggregatedSeries;
use serde::{Deserialize, Serialize};

/// Configuration for forecasting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Confidence level used when a request does not name one (e.g., 0.95 for 95%)
    pub confidence_level: f64,
    /// Default number of periods to forecast
    pub horizon: usize,
    /// Algorithm used when a request does not name one
    pub algorithm: Algorithm,
    /// Seasonal cycle length per granularity
    pub seasonal_periods: SeasonalPeriods,
    /// ARIMA (p, d, q)
    pub arima_order: ArimaOrder,
    /// Number of bootstrap sample paths
    pub bootstrap_samples: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            horizon: 30,
            algorithm: Algorithm::RegressionLike,
            seasonal_periods: SeasonalPeriods::default(),
            arima_order: ArimaOrder::default(),
            bootstrap_samples: 1000,
        }
    }
}

impl ForecastConfig {
    pub fn builder() -> ForecastConfigBuilder {
        ForecastConfigBuilder::new()
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            seasonal_periods: self.seasonal_periods,
            arima_order: self.arima_order,
            bootstrap_samples: self.bootstrap_samples,
        }
    }

    pub fn engine(&self) -> ForecastEngine {
        ForecastEngine::new(self.engine_options())
    }

    /// Request for `series` using this configuration's defaults.
    pub fn request(&self, series: AggregatedSeries) -> ForecastRequestBuilder {
        ForecastRequestBuilder::new(series)
            .horizon(self.horizon)
            .algorithm(self.algorithm)
            .confidence_level(self.confidence_level)
    }
}

/// Builder for ForecastConfig
#[derive(Debug, Default)]
pub struct ForecastConfigBuilder {
    confidence_level: Option<f64>,
    horizon: Option<usize>,
    algorithm: Option<Algorithm>,
    seasonal_periods: Option<SeasonalPeriods>,
    arima_order: Option<(usize, usize, usize)>,
    bootstrap_samples: Option<usize>,
}

impl ForecastConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = Some(level);
        self
    }

    pub fn horizon(mut self, horizon: usize) -> Self {
        self.horizon = Some(horizon);
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn seasonal_periods(mut self, periods: SeasonalPeriods) -> Self {
        self.seasonal_periods = Some(periods);
        self
    }

    pub fn arima_order(mut self, p: usize, d: usize, q: usize) -> Self {
        self.arima_order = Some((p, d, q));
        self
    }

    pub fn bootstrap_samples(mut self, samples: usize) -> Self {
        self.bootstrap_samples = Some(samples);
        self
    }

    /// Build the configuration
    pub fn build(self) -> std::result::Result<ForecastConfig, &'static str> {
        let defaults = ForecastConfig::default();

        let confidence_level = self.confidence_level.unwrap_or(defaults.confidence_level);
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err("confidence_level must be in (0, 1)");
        }

        let horizon = self.horizon.unwrap_or(defaults.horizon);
        if horizon == 0 {
            return Err("horizon must be at least 1");
        }

        let seasonal_periods = self.seasonal_periods.unwrap_or(defaults.seasonal_periods);
        if [seasonal_periods.day, seasonal_periods.week, seasonal_periods.month]
            .iter()
            .any(|&p| p < strategy::prophet::MIN_SEASONAL_PERIOD)
        {
            return Err("seasonal periods must be at least 4");
        }

        let arima_order = match self.arima_order {
            Some((p, d, q)) => {
                ArimaOrder::new(p, d, q).map_err(|_| "arima order out of bounds")?
            }
            None => defaults.arima_order,
        };

        let bootstrap_samples = self.bootstrap_samples.unwrap_or(defaults.bootstrap_samples);
        if bootstrap_samples == 0 {
            return Err("bootstrap_samples must be at least 1");
        }

        Ok(ForecastConfig {
            confidence_level,
            horizon,
            algorithm: self.algorithm.unwrap_or(defaults.algorithm),
            seasonal_periods,
            arima_order,
            bootstrap_samples,
        })
    }
}

/// Builder for a single ForecastRequest
#[derive(Debug)]
pub struct ForecastRequestBuilder {
    series: AggregatedSeries,
    horizon: usize,
    algorithm: Algorithm,
    confidence_level: f64,
}

impl ForecastRequestBuilder {
    pub fn new(series: AggregatedSeries) -> Self {
        let defaults = ForecastConfig::default();
        Self {
            series,
            horizon: defaults.horizon,
            algorithm: defaults.algorithm,
            confidence_level: defaults.confidence_level,
        }
    }

    pub fn horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Build and validate the request
    pub fn build(self) -> Result<ForecastRequest> {
        let request = ForecastRequest::new(
            self.series,
            self.horizon,
            self.algorithm,
            self.confidence_level,
        );
        request.validate()?;
        Ok(request)
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ForecastConfig, ForecastConfigBuilder, ForecastRequestBuilder};
    pub use forecast_core::{ArimaOrder, EngineOptions, ForecastEngine, SeasonalPeriods};
    pub use forecast_spi::{
        Algorithm, ConfidenceInterval, ForecastError, ForecastRequest, ForecastResult,
        Forecaster, HorizonPoint, Mape, Result,
    };
}
