//! Analytics Core
//!
//! Implementations of the dataset store, CSV ingestion, filter engine,
//! cross-filter propagation, view registry, aggregation, KPIs and
//! anomaly detection.

pub mod aggregation;
pub mod anomaly;
pub mod crossfilter;
pub mod filter;
pub mod kpi;
pub mod loader;
pub mod registry;
pub mod store;

// Re-export SPI items for implementations
pub use analytics_spi::{
    AggregatedSeries, AnalyticsError, BucketKey, CustomerRecord, DatasetView, DateRange,
    Dimension, FilterDelta, FilterEvent, FilterState, Granularity, GroupBy, Metric, Result,
    SalesRecord, SeriesPoint, ViewConfiguration, ViewStore,
};

// Re-export main types
pub use aggregation::{aggregate, aggregate_with, AggregationOptions};
pub use anomaly::{detect_anomalies, moving_average, Anomaly};
pub use crossfilter::{ChartSelection, CrossFilter};
pub use filter::{apply, apply_with_delta};
pub use kpi::{compute_kpis, KpiOptions, KpiSummary, MAX_COMPARISON_DAYS};
pub use registry::ViewRegistry;
pub use store::DatasetStore;
