//! Forecast error types

use thiserror::Error;

use crate::model::Algorithm;

/// Errors that can occur during forecasting operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Repaired series is shorter than the algorithm's minimum history
    #[error("Insufficient data for {algorithm}: need {required}, have {actual}")]
    InsufficientData {
        algorithm: Algorithm,
        required: usize,
        actual: usize,
    },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Series cannot be placed on a regular calendar grid
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    /// Model has not been fitted
    #[error("Model must be fitted before prediction")]
    NotFitted,

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),
}

impl ForecastError {
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        ForecastError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
