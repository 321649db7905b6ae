//! Analytics Consumer API
//!
//! Consumer configurations and builder APIs for the analytics stack.
//!
//! This crate provides:
//! - Configuration types for aggregation, KPIs and anomaly detection
//! - A builder for filter states
//! - Re-exports from SPI and core for convenience

pub mod config;

pub use config::{AnalyticsConfig, AnalyticsConfigBuilder, AnomalyConfig, FilterBuilder};

// Re-export from core
pub use analytics_core::{
    aggregate, aggregate_with, apply, apply_with_delta, compute_kpis, detect_anomalies,
    moving_average, AggregationOptions, Anomaly, ChartSelection, CrossFilter, DatasetStore,
    KpiOptions, KpiSummary, ViewRegistry, MAX_COMPARISON_DAYS,
};

// Re-export from SPI
pub use analytics_spi::{
    AggregatedSeries, AnalyticsError, BucketKey, CustomerRecord, DatasetView, DateRange,
    Dimension, FilterDelta, FilterEvent, FilterState, Granularity, GroupBy, Metric, Result,
    SalesRecord, SeriesPoint, ViewConfiguration, ViewStore,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{AnalyticsConfig, AnalyticsConfigBuilder, AnomalyConfig, FilterBuilder};
    pub use analytics_core::{
        aggregate, apply, compute_kpis, detect_anomalies, moving_average, ChartSelection,
        CrossFilter, DatasetStore, ViewRegistry,
    };
    pub use analytics_spi::{
        AggregatedSeries, AnalyticsError, DatasetView, DateRange, Dimension, FilterDelta,
        FilterEvent, FilterState, Granularity, GroupBy, Metric, Result, ViewStore,
    };
}
