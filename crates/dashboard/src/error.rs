//! Session error type

use analytics_facade::AnalyticsError;
use forecast_facade::ForecastError;
use thiserror::Error;

/// Errors surfaced by a dashboard session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// An environment override could not be applied
    #[error("Invalid configuration '{key}': {reason}")]
    Config { key: String, reason: String },
}

impl DashboardError {
    pub fn config(key: &str, reason: impl Into<String>) -> Self {
        DashboardError::Config {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_errors_keep_their_message() {
        let err: DashboardError = AnalyticsError::InvalidViewName.into();
        assert_eq!(err.to_string(), AnalyticsError::InvalidViewName.to_string());

        let err: DashboardError = ForecastError::NotFitted.into();
        assert!(matches!(err, DashboardError::Forecast(ForecastError::NotFitted)));
    }

    #[test]
    fn test_config_error_message() {
        let err = DashboardError::config("DASHBOARD_FORECAST_HORIZON", "not a number");
        assert_eq!(
            err.to_string(),
            "Invalid configuration 'DASHBOARD_FORECAST_HORIZON': not a number"
        );
    }
}
