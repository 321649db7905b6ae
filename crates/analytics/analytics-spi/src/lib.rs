//! Analytics Service Provider Interface
//!
//! Defines the record types, filter state, aggregated series and the
//! contracts shared by the dataset store, view registry and aggregation layer.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{DatasetView, ViewStore};
pub use error::{AnalyticsError, Result};
pub use model::{
    AggregatedSeries, BucketKey, CustomerRecord, DateRange, Dimension, FilterDelta, FilterEvent,
    FilterState, Granularity, GroupBy, Metric, SalesRecord, SeriesPoint, ViewConfiguration,
};
