//! Forecast Service Provider Interface
//!
//! Defines the forecasting contract shared by every strategy, the request and
//! result models, and forecast errors.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ConfidenceIntervalComputer, Decomposer, Forecaster};
pub use error::{ForecastError, Result};
pub use model::{
    Algorithm, BacktestMetrics, ConfidenceInterval, DecompositionResult, ForecastRequest,
    ForecastResult, ForecastSummary, HorizonPoint, IntervalContext, Mape, RepairReport,
};
