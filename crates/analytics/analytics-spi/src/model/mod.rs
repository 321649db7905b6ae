//! Model module containing data structures

mod aggregated_series;
mod date_range;
mod dimension;
mod filter_state;
mod granularity;
mod record;
mod view_configuration;

pub use aggregated_series::{AggregatedSeries, BucketKey, GroupBy, Metric, SeriesPoint};
pub use date_range::DateRange;
pub use dimension::Dimension;
pub use filter_state::{FilterDelta, FilterEvent, FilterState};
pub use granularity::{Granularity, DAILY_MAX_SPAN_DAYS, WEEKLY_MAX_SPAN_DAYS};
pub use record::{CustomerRecord, SalesRecord};
pub use view_configuration::ViewConfiguration;
