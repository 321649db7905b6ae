//! Dashboard configuration
//!
//! Defaults come from the analytics and forecast configs; `DASHBOARD_*`
//! environment variables (optionally from a `.env` file) override them.

use std::str::FromStr;

use analytics_facade::AnalyticsConfig;
use forecast_facade::{Algorithm, ForecastConfig};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

pub const ENV_LOG: &str = "DASHBOARD_LOG";
pub const ENV_DAILY_MAX_SPAN_DAYS: &str = "DASHBOARD_DAILY_MAX_SPAN_DAYS";
pub const ENV_WEEKLY_MAX_SPAN_DAYS: &str = "DASHBOARD_WEEKLY_MAX_SPAN_DAYS";
pub const ENV_KPI_COMPARISON_DAYS: &str = "DASHBOARD_KPI_COMPARISON_DAYS";
pub const ENV_ANOMALY_WINDOW: &str = "DASHBOARD_ANOMALY_WINDOW";
pub const ENV_ANOMALY_THRESHOLD: &str = "DASHBOARD_ANOMALY_THRESHOLD";
pub const ENV_CONFIDENCE_LEVEL: &str = "DASHBOARD_CONFIDENCE_LEVEL";
pub const ENV_FORECAST_HORIZON: &str = "DASHBOARD_FORECAST_HORIZON";
pub const ENV_FORECAST_ALGORITHM: &str = "DASHBOARD_FORECAST_ALGORITHM";
pub const ENV_BOOTSTRAP_SAMPLES: &str = "DASHBOARD_BOOTSTRAP_SAMPLES";

/// Everything a session needs to know up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub analytics: AnalyticsConfig,
    pub forecast: ForecastConfig,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            analytics: AnalyticsConfig::default(),
            forecast: ForecastConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load `.env` if present, then apply `DASHBOARD_*` overrides.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup` on top of the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DashboardConfig::default();

        let mut analytics = AnalyticsConfig::builder();
        if let Some(days) = parse::<i64, _>(&lookup, ENV_DAILY_MAX_SPAN_DAYS)? {
            analytics = analytics.daily_max_span_days(days);
        }
        if let Some(days) = parse::<i64, _>(&lookup, ENV_WEEKLY_MAX_SPAN_DAYS)? {
            analytics = analytics.weekly_max_span_days(days);
        }
        if let Some(days) = parse::<i64, _>(&lookup, ENV_KPI_COMPARISON_DAYS)? {
            analytics = analytics.comparison_days(days);
        }
        if let Some(window) = parse::<usize, _>(&lookup, ENV_ANOMALY_WINDOW)? {
            analytics = analytics.anomaly_window(window);
        }
        if let Some(threshold) = parse::<f64, _>(&lookup, ENV_ANOMALY_THRESHOLD)? {
            analytics = analytics.anomaly_threshold(threshold);
        }
        let analytics = analytics
            .build()
            .map_err(|reason| DashboardError::config("analytics", reason))?;

        let mut forecast = ForecastConfig::builder();
        if let Some(level) = parse::<f64, _>(&lookup, ENV_CONFIDENCE_LEVEL)? {
            forecast = forecast.confidence_level(level);
        }
        if let Some(horizon) = parse::<usize, _>(&lookup, ENV_FORECAST_HORIZON)? {
            forecast = forecast.horizon(horizon);
        }
        if let Some(algorithm) = parse::<Algorithm, _>(&lookup, ENV_FORECAST_ALGORITHM)? {
            forecast = forecast.algorithm(algorithm);
        }
        if let Some(samples) = parse::<usize, _>(&lookup, ENV_BOOTSTRAP_SAMPLES)? {
            forecast = forecast.bootstrap_samples(samples);
        }
        let forecast = forecast
            .build()
            .map_err(|reason| DashboardError::config("forecast", reason))?;

        Ok(DashboardConfig {
            analytics,
            forecast,
            log_filter: lookup(ENV_LOG).unwrap_or(defaults.log_filter),
        })
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| DashboardError::config(key, format!("'{}': {}", raw, e))),
    }
}
