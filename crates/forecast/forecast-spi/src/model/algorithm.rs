//! Forecasting algorithm selector

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ForecastError;

/// The interchangeable forecasting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Trend plus additive seasonality with bootstrapped bands
    ProphetLike,
    /// Autoregressive integrated moving average with analytic bands
    ArimaLike,
    /// Ordinary least squares trend with residual-based bands
    RegressionLike,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::ProphetLike,
        Algorithm::ArimaLike,
        Algorithm::RegressionLike,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::ProphetLike => "prophet_like",
            Algorithm::ArimaLike => "arima_like",
            Algorithm::RegressionLike => "regression_like",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Algorithm::ProphetLike => "ProphetLike",
            Algorithm::ArimaLike => "ArimaLike",
            Algorithm::RegressionLike => "RegressionLike",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Algorithm {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "prophet_like" | "prophetlike" | "prophet" => Ok(Algorithm::ProphetLike),
            "arima_like" | "arimalike" | "arima" => Ok(Algorithm::ArimaLike),
            "regression_like" | "regressionlike" | "regression" | "linear" => {
                Ok(Algorithm::RegressionLike)
            }
            other => Err(ForecastError::invalid_parameter(
                "algorithm",
                format!("unknown algorithm '{}'", other),
            )),
        }
    }
}
