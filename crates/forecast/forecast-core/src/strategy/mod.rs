//! Forecasting strategies
//!
//! One implementation of [`Forecaster`] per [`Algorithm`], plus [`Strategy`]
//! for dispatching on a request's algorithm at runtime.

pub mod arima;
pub mod prophet;
pub mod regression;

use analytics_spi::Granularity;
use forecast_spi::{Algorithm, ConfidenceInterval, Forecaster, IntervalContext, Result};

pub use arima::{ArimaLike, ArimaModel, ArimaOrder};
pub use prophet::{ProphetLike, ProphetModel};
pub use regression::{fit_line, Line, RegressionLike, RegressionModel};

use crate::engine::EngineOptions;

/// The strategy selected for one request.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    Prophet(ProphetLike),
    Arima(ArimaLike),
    Regression(RegressionLike),
}

/// A model fitted by one of the strategies.
#[derive(Debug, Clone, PartialEq)]
pub enum FittedModel {
    Prophet(ProphetModel),
    Arima(ArimaModel),
    Regression(RegressionModel),
}

impl Strategy {
    /// Build the strategy for `algorithm` on a series of `granularity`.
    pub fn for_request(
        algorithm: Algorithm,
        granularity: Granularity,
        options: &EngineOptions,
    ) -> Result<Self> {
        Ok(match algorithm {
            Algorithm::ProphetLike => Strategy::Prophet(ProphetLike::new(
                options.seasonal_period_for(granularity),
                options.bootstrap_samples,
            )?),
            Algorithm::ArimaLike => Strategy::Arima(ArimaLike::new(options.arima_order)),
            Algorithm::RegressionLike => Strategy::Regression(RegressionLike::new()),
        })
    }
}

impl Forecaster for Strategy {
    type Model = FittedModel;

    fn algorithm(&self) -> Algorithm {
        match self {
            Strategy::Prophet(s) => s.algorithm(),
            Strategy::Arima(s) => s.algorithm(),
            Strategy::Regression(s) => s.algorithm(),
        }
    }

    fn min_history(&self, horizon: usize) -> usize {
        match self {
            Strategy::Prophet(s) => s.min_history(horizon),
            Strategy::Arima(s) => s.min_history(horizon),
            Strategy::Regression(s) => s.min_history(horizon),
        }
    }

    fn fit(&self, history: &[f64]) -> Result<FittedModel> {
        Ok(match self {
            Strategy::Prophet(s) => FittedModel::Prophet(s.fit(history)?),
            Strategy::Arima(s) => FittedModel::Arima(s.fit(history)?),
            Strategy::Regression(s) => FittedModel::Regression(s.fit(history)?),
        })
    }

    fn predict(
        &self,
        model: &FittedModel,
        horizon: usize,
        ctx: &IntervalContext,
    ) -> Result<ConfidenceInterval> {
        match (self, model) {
            (Strategy::Prophet(s), FittedModel::Prophet(m)) => s.predict(m, horizon, ctx),
            (Strategy::Arima(s), FittedModel::Arima(m)) => s.predict(m, horizon, ctx),
            (Strategy::Regression(s), FittedModel::Regression(m)) => s.predict(m, horizon, ctx),
            _ => Err(forecast_spi::ForecastError::NotFitted),
        }
    }
}
