//! Holdout backtesting
//!
//! Withholds the tail of the history, refits on the rest and scores the
//! predictions against the withheld values.

use forecast_spi::{BacktestMetrics, Forecaster, IntervalContext, Result};

use crate::metrics::backtest_metrics;

/// Scores and residuals (`actual - predicted`) of one backtest.
#[derive(Debug, Clone, PartialEq)]
pub struct Backtest {
    pub metrics: BacktestMetrics,
    pub residuals: Vec<f64>,
}

/// Withheld window length: `min(horizon, ceil(n / 5))`, at least 1.
pub fn backtest_window(history_len: usize, horizon: usize) -> usize {
    horizon.min(history_len.div_ceil(5)).max(1)
}

/// Fit on all but the last `backtest_window` values and score the rest.
pub fn run_backtest<F: Forecaster>(
    forecaster: &F,
    history: &[f64],
    horizon: usize,
    ctx: &IntervalContext,
) -> Result<Backtest> {
    let window = backtest_window(history.len(), horizon).min(history.len());
    let (train, actual) = history.split_at(history.len() - window);

    let model = forecaster.fit(train)?;
    let predicted = forecaster.predict(&model, window, ctx)?.forecast;

    let residuals = actual.iter().zip(&predicted).map(|(a, p)| a - p).collect();
    Ok(Backtest {
        metrics: backtest_metrics(actual, &predicted),
        residuals,
    })
}
