//! Forecast engine
//!
//! Validates a request, repairs its series, checks the strategy's minimum
//! history, backtests, then fits the full history and projects the horizon
//! onto calendar periods.

use analytics_spi::Granularity;
use forecast_spi::{
    ForecastError, ForecastRequest, ForecastResult, ForecastSummary, Forecaster, HorizonPoint,
    IntervalContext, Result,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::backtest::run_backtest;
use crate::repair::{repair, RepairedSeries};
use crate::strategy::{ArimaOrder, Strategy};

/// Seasonal cycle length, in periods, per granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalPeriods {
    pub day: usize,
    pub week: usize,
    pub month: usize,
}

impl Default for SeasonalPeriods {
    fn default() -> Self {
        Self {
            day: 7,
            week: 13,
            month: 12,
        }
    }
}

/// Strategy parameters shared by every request an engine serves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    pub seasonal_periods: SeasonalPeriods,
    pub arima_order: ArimaOrder,
    pub bootstrap_samples: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            seasonal_periods: SeasonalPeriods::default(),
            arima_order: ArimaOrder::default(),
            bootstrap_samples: 1000,
        }
    }
}

impl EngineOptions {
    pub fn seasonal_period_for(&self, granularity: Granularity) -> usize {
        match granularity {
            Granularity::Day => self.seasonal_periods.day,
            Granularity::Week => self.seasonal_periods.week,
            Granularity::Month => self.seasonal_periods.month,
        }
    }
}

/// Stateless forecast runner.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    options: EngineOptions,
}

impl ForecastEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Produce a forecast for `request`.
    ///
    /// Identical requests yield identical results. A failing strategy is
    /// reported as-is; no other algorithm is tried.
    pub fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResult> {
        if let Err(err) = request.validate() {
            warn!(error = %err, "Forecast request rejected");
            return Err(err);
        }

        let repaired = repair(&request.series)?;
        if !repaired.report.is_clean() {
            warn!(
                interpolated = repaired.report.interpolated,
                inserted = repaired.report.inserted,
                trimmed_leading = repaired.report.trimmed_leading,
                trimmed_trailing = repaired.report.trimmed_trailing,
                "Series repaired before forecasting"
            );
        }

        let strategy =
            Strategy::for_request(request.algorithm, repaired.granularity, &self.options)?;
        let required = strategy.min_history(request.horizon);
        if repaired.len() < required {
            let err = ForecastError::InsufficientData {
                algorithm: request.algorithm,
                required,
                actual: repaired.len(),
            };
            warn!(error = %err, "Forecast request rejected");
            return Err(err);
        }

        info!(
            algorithm = %request.algorithm,
            horizon = request.horizon,
            history_len = repaired.len(),
            "Forecast started"
        );

        let seed = request_seed(request, &repaired);
        let ctx = IntervalContext::new(request.confidence_level, seed);
        let backtest = run_backtest(&strategy, &repaired.values, request.horizon, &ctx)?;

        let model = strategy.fit(&repaired.values)?;
        let interval = strategy.predict(
            &model,
            request.horizon,
            &ctx.with_backtest_residuals(backtest.residuals),
        )?;
        if !interval.is_ordered() || interval.len() != request.horizon {
            return Err(ForecastError::NumericalError(
                "forecast bounds do not enclose the point forecast".to_string(),
            ));
        }

        let last = repaired
            .last_period()
            .ok_or_else(|| ForecastError::InvalidSeries("series has no periods".to_string()))?;
        let mut horizon_points = Vec::with_capacity(request.horizon);
        for (step, ((&point, &lower), &upper)) in interval
            .forecast
            .iter()
            .zip(&interval.lower)
            .zip(&interval.upper)
            .enumerate()
        {
            let period = u32::try_from(step + 1)
                .ok()
                .and_then(|steps| repaired.granularity.advance(last, steps))
                .ok_or_else(|| {
                    ForecastError::NumericalError("forecast period out of calendar range".to_string())
                })?;
            horizon_points.push(HorizonPoint {
                period,
                point,
                lower,
                upper,
            });
        }

        let summary = summarize(&repaired.values, &interval.forecast);
        info!(
            algorithm = %request.algorithm,
            mae = backtest.metrics.mae,
            rmse = backtest.metrics.rmse,
            "Forecast finished"
        );

        Ok(ForecastResult {
            horizon_points,
            backtest_metrics: backtest.metrics,
            algorithm_used: request.algorithm,
            confidence_level: request.confidence_level,
            granularity: repaired.granularity,
            history_len: repaired.len(),
            repair: repaired.report,
            summary,
        })
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn summarize(history: &[f64], forecast: &[f64]) -> ForecastSummary {
    let average_historical = mean(history);
    let average_forecast = mean(forecast);
    let growth_percent = (average_historical > 0.0)
        .then(|| (average_forecast - average_historical) / average_historical * 100.0);
    ForecastSummary {
        average_historical,
        average_forecast,
        total_forecast: forecast.iter().sum(),
        growth_percent,
    }
}

/// FNV-1a over everything that determines the result.
fn request_seed(request: &ForecastRequest, series: &RepairedSeries) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;

    let mut hash = OFFSET;
    let mut feed = |bytes: &[u8]| {
        for &byte in bytes {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(PRIME);
        }
    };
    feed(request.algorithm.as_str().as_bytes());
    feed(&(request.horizon as u64).to_le_bytes());
    feed(&request.confidence_level.to_bits().to_le_bytes());
    feed(series.granularity.as_str().as_bytes());
    for (period, value) in series.periods.iter().zip(&series.values) {
        feed(period.to_string().as_bytes());
        feed(&value.to_bits().to_le_bytes());
    }
    hash
}
