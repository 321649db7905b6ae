//! Model module containing data structures

mod algorithm;
mod confidence_interval;
mod decomposition_result;
mod forecast_request;
mod forecast_result;

pub use algorithm::Algorithm;
pub use confidence_interval::ConfidenceInterval;
pub use decomposition_result::DecompositionResult;
pub use forecast_request::{ForecastRequest, IntervalContext};
pub use forecast_result::{
    BacktestMetrics, ForecastResult, ForecastSummary, HorizonPoint, Mape, RepairReport,
};
