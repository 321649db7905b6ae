//! Forecast Core
//!
//! Implementations behind the forecast contracts: series repair, the three
//! forecasting strategies, confidence intervals, accuracy metrics, holdout
//! backtesting and the engine that runs a request end to end.

pub mod backtest;
pub mod confidence;
pub mod decomposition;
pub mod engine;
pub mod metrics;
pub mod repair;
pub mod strategy;

pub use forecast_spi::*;

pub use backtest::{backtest_window, run_backtest, Backtest};
pub use confidence::{z_score, BootstrapIntervalComputer, ResidualIntervalComputer};
pub use decomposition::{decompose_additive, AdditiveDecomposer};
pub use engine::{EngineOptions, ForecastEngine, SeasonalPeriods};
pub use repair::{repair, RepairedSeries};
pub use strategy::{
    ArimaLike, ArimaOrder, FittedModel, ProphetLike, RegressionLike, Strategy,
};
