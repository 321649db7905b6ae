//! Forecast accuracy metrics
//!
//! Standard metrics for evaluating a backtest window.

use forecast_spi::{BacktestMetrics, Mape};

/// Mean Absolute Error (MAE)
///
/// Average of absolute differences between predictions and actual values.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();

    sum / actual.len() as f64
}

/// Mean Squared Error (MSE)
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    sum / actual.len() as f64
}

/// Root Mean Squared Error (RMSE)
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// Mean Absolute Percentage Error as a fraction.
///
/// `NotApplicable` when any actual value is exactly zero.
pub fn mape(actual: &[f64], predicted: &[f64]) -> Mape {
    if actual.len() != predicted.len() || actual.is_empty() || actual.iter().any(|&a| a == 0.0) {
        return Mape::NotApplicable;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| ((a - p) / a).abs())
        .sum();

    Mape::Value(sum / actual.len() as f64)
}

/// All backtest metrics for one withheld window.
pub fn backtest_metrics(actual: &[f64], predicted: &[f64]) -> BacktestMetrics {
    BacktestMetrics {
        mae: mae(actual, predicted),
        rmse: rmse(actual, predicted),
        mape: mape(actual, predicted),
        window: actual.len(),
    }
}
