//! Analytics configuration types.

use analytics_core::{AggregationOptions, KpiOptions, MAX_COMPARISON_DAYS};
use analytics_spi::{DateRange, Dimension, FilterState, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rolling z-score anomaly detection settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyConfig {
    /// Trailing window length in buckets
    pub window: usize,
    /// Absolute z-score above which a bucket is flagged
    pub threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            window: 7,
            threshold: 2.0,
        }
    }
}

/// Configuration for the analytics stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub aggregation: AggregationOptions,
    pub kpi: KpiOptions,
    pub anomaly: AnomalyConfig,
    /// Moving-average windows offered alongside time series
    pub moving_average_windows: Vec<usize>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            aggregation: AggregationOptions::default(),
            kpi: KpiOptions::default(),
            anomaly: AnomalyConfig::default(),
            moving_average_windows: vec![7, 30],
        }
    }
}

impl AnalyticsConfig {
    pub fn builder() -> AnalyticsConfigBuilder {
        AnalyticsConfigBuilder::new()
    }
}

/// Builder for AnalyticsConfig.
#[derive(Debug, Default)]
pub struct AnalyticsConfigBuilder {
    daily_max_span_days: Option<i64>,
    weekly_max_span_days: Option<i64>,
    comparison_days: Option<i64>,
    anomaly_window: Option<usize>,
    anomaly_threshold: Option<f64>,
    moving_average_windows: Option<Vec<usize>>,
}

impl AnalyticsConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the widest span, in days, bucketed daily.
    pub fn daily_max_span_days(mut self, days: i64) -> Self {
        self.daily_max_span_days = Some(days);
        self
    }

    /// Set the widest span, in days, bucketed weekly.
    pub fn weekly_max_span_days(mut self, days: i64) -> Self {
        self.weekly_max_span_days = Some(days);
        self
    }

    /// Set the KPI comparison window.
    pub fn comparison_days(mut self, days: i64) -> Self {
        self.comparison_days = Some(days);
        self
    }

    pub fn anomaly_window(mut self, window: usize) -> Self {
        self.anomaly_window = Some(window);
        self
    }

    pub fn anomaly_threshold(mut self, threshold: f64) -> Self {
        self.anomaly_threshold = Some(threshold);
        self
    }

    pub fn moving_average_windows(mut self, windows: Vec<usize>) -> Self {
        self.moving_average_windows = Some(windows);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> std::result::Result<AnalyticsConfig, &'static str> {
        let defaults = AnalyticsConfig::default();
        let aggregation = AggregationOptions {
            daily_max_span_days: self
                .daily_max_span_days
                .unwrap_or(defaults.aggregation.daily_max_span_days),
            weekly_max_span_days: self
                .weekly_max_span_days
                .unwrap_or(defaults.aggregation.weekly_max_span_days),
        };
        if aggregation.daily_max_span_days < 1 {
            return Err("daily_max_span_days must be at least 1");
        }
        if aggregation.weekly_max_span_days < aggregation.daily_max_span_days {
            return Err("weekly_max_span_days must not be below daily_max_span_days");
        }

        let comparison_days = self.comparison_days.unwrap_or(defaults.kpi.comparison_days);
        if comparison_days < 1 {
            return Err("comparison_days must be at least 1");
        }
        if comparison_days > MAX_COMPARISON_DAYS {
            return Err("comparison_days must not exceed 36500");
        }

        let anomaly = AnomalyConfig {
            window: self.anomaly_window.unwrap_or(defaults.anomaly.window),
            threshold: self.anomaly_threshold.unwrap_or(defaults.anomaly.threshold),
        };
        if anomaly.window < 2 {
            return Err("anomaly window must be at least 2");
        }
        if !(anomaly.threshold > 0.0) {
            return Err("anomaly threshold must be positive");
        }

        let moving_average_windows = self
            .moving_average_windows
            .unwrap_or(defaults.moving_average_windows);
        if moving_average_windows.iter().any(|&w| w == 0) {
            return Err("moving average windows must be positive");
        }

        Ok(AnalyticsConfig {
            aggregation,
            kpi: KpiOptions { comparison_days },
            anomaly,
            moving_average_windows,
        })
    }
}

/// Builder for an initial FilterState, e.g. from widget defaults.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    date_range: Option<(NaiveDate, NaiveDate)>,
    values: Vec<(Dimension, Vec<String>)>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    pub fn regions<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values(Dimension::Region, values)
    }

    pub fn products<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values(Dimension::Product, values)
    }

    pub fn segments<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values(Dimension::Segment, values)
    }

    fn values<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values
            .push((dimension, values.into_iter().map(Into::into).collect()));
        self
    }

    /// Build the state; fails with `InvalidRange` when start is after end.
    pub fn build(self) -> Result<FilterState> {
        let mut state = FilterState::new();
        if let Some((start, end)) = self.date_range {
            state.set_date_range(Some(DateRange::new(start, end)?));
        }
        for (dimension, values) in self.values {
            state = state.with_values(dimension, values);
        }
        Ok(state)
    }
}
