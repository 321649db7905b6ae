//! Aggregation of filtered records into series.
//!
//! Pure function of its inputs. Sales rows are narrowed to the filter's date
//! range by binary search and then visited once; each passing row is folded
//! into exactly one bucket accumulator.

use std::collections::BTreeMap;

use analytics_spi::{
    AggregatedSeries, AnalyticsError, BucketKey, CustomerRecord, DatasetView, DateRange, FilterState,
    Granularity, GroupBy, Metric, Result, SalesRecord, SeriesPoint,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use analytics_spi::model::{DAILY_MAX_SPAN_DAYS, WEEKLY_MAX_SPAN_DAYS};

/// Span thresholds for automatic granularity selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationOptions {
    pub daily_max_span_days: i64,
    pub weekly_max_span_days: i64,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            daily_max_span_days: DAILY_MAX_SPAN_DAYS,
            weekly_max_span_days: WEEKLY_MAX_SPAN_DAYS,
        }
    }
}

impl AggregationOptions {
    pub fn granularity_for(&self, range: &DateRange) -> Granularity {
        Granularity::for_span(
            range.span_days(),
            self.daily_max_span_days,
            self.weekly_max_span_days,
        )
    }
}

/// Aggregate with default options.
pub fn aggregate(
    view: &dyn DatasetView,
    filter: &FilterState,
    group_by: GroupBy,
    metric: Metric,
) -> Result<AggregatedSeries> {
    aggregate_with(view, filter, group_by, metric, &AggregationOptions::default())
}

/// Aggregate `metric` over the rows passing `filter`, grouped by `group_by`.
///
/// An empty filtered subset yields an empty series. Time groupings emit every
/// calendar bucket of the effective range (filter range, else dataset extent),
/// with `None` for buckets no row fell into.
pub fn aggregate_with(
    view: &dyn DatasetView,
    filter: &FilterState,
    group_by: GroupBy,
    metric: Metric,
    options: &AggregationOptions,
) -> Result<AggregatedSeries> {
    validate(group_by, metric)?;

    if metric.is_customer_metric() {
        return Ok(aggregate_customers(view.customers(), filter, group_by, metric));
    }

    let rows = view.sales_in(filter.date_range().as_ref());
    match group_by {
        GroupBy::Period | GroupBy::PeriodOf(_) => {
            let Some(range) = filter.date_range().or_else(|| view.date_extent()) else {
                return Ok(AggregatedSeries::empty(None));
            };
            let granularity = match group_by {
                GroupBy::PeriodOf(g) => g,
                _ => options.granularity_for(&range),
            };
            Ok(aggregate_periods(rows, filter, &range, granularity, metric))
        }
        _ => Ok(aggregate_sales_categories(rows, filter, group_by, metric)),
    }
}

fn validate(group_by: GroupBy, metric: Metric) -> Result<()> {
    let valid = if metric.is_customer_metric() {
        matches!(group_by, GroupBy::Segment | GroupBy::Channel)
    } else {
        !matches!(group_by, GroupBy::Channel)
    };
    if valid {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidGrouping {
            metric: metric.to_string(),
            group_by: group_by.to_string(),
        })
    }
}

fn aggregate_periods(
    rows: &[SalesRecord],
    filter: &FilterState,
    range: &DateRange,
    granularity: Granularity,
    metric: Metric,
) -> AggregatedSeries {
    let mut buckets: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();
    for record in rows.iter().filter(|r| filter.matches_sales(r)) {
        buckets
            .entry(granularity.bucket_start(record.date))
            .or_default()
            .add_sale(record, metric);
    }
    if buckets.is_empty() {
        return AggregatedSeries::empty(Some(granularity));
    }

    let grid = granularity.buckets(range);
    debug!(
        %granularity,
        buckets = grid.len(),
        populated = buckets.len(),
        "aggregated time series"
    );
    AggregatedSeries::from_periods(
        granularity,
        grid.into_iter().map(|start| {
            let value = buckets.get(&start).and_then(|acc| acc.finish(metric));
            (start, value)
        }),
    )
}

fn aggregate_sales_categories(
    rows: &[SalesRecord],
    filter: &FilterState,
    group_by: GroupBy,
    metric: Metric,
) -> AggregatedSeries {
    let mut buckets: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for record in rows.iter().filter(|r| filter.matches_sales(r)) {
        let label = match group_by {
            GroupBy::Region => Some(record.region.as_str()),
            GroupBy::Product => Some(record.product.as_str()),
            GroupBy::Segment => record.segment.as_deref(),
            _ => None,
        };
        if let Some(label) = label {
            buckets.entry(label).or_default().add_sale(record, metric);
        }
    }
    categorical(buckets, metric)
}

fn aggregate_customers(
    rows: &[CustomerRecord],
    filter: &FilterState,
    group_by: GroupBy,
    metric: Metric,
) -> AggregatedSeries {
    let mut buckets: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for record in rows.iter().filter(|r| filter.matches_customer(r)) {
        let label = match group_by {
            GroupBy::Channel => record.channel.as_str(),
            _ => record.segment.as_str(),
        };
        buckets.entry(label).or_default().add_customer(record, metric);
    }
    categorical(buckets, metric)
}

fn categorical(buckets: BTreeMap<&str, Accumulator>, metric: Metric) -> AggregatedSeries {
    AggregatedSeries {
        granularity: None,
        points: buckets
            .into_iter()
            .map(|(label, acc)| SeriesPoint {
                key: BucketKey::Category(label.to_string()),
                value: acc.finish(metric),
            })
            .collect(),
    }
}

/// Running totals for one bucket.
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    numerator: f64,
    denominator: f64,
    rows: usize,
}

impl Accumulator {
    fn add_sale(&mut self, record: &SalesRecord, metric: Metric) {
        self.rows += 1;
        match metric {
            Metric::Revenue => self.numerator += record.revenue,
            Metric::Units => self.numerator += f64::from(record.units),
            Metric::AverageDiscount => {
                self.numerator += record.discount;
                self.denominator += 1.0;
            }
            Metric::AverageSale => {
                self.numerator += record.revenue;
                self.denominator += f64::from(record.units);
            }
            Metric::Transactions | Metric::CustomerCount | Metric::Satisfaction => {}
        }
    }

    fn add_customer(&mut self, record: &CustomerRecord, metric: Metric) {
        self.rows += 1;
        match metric {
            Metric::CustomerCount => self.numerator += f64::from(record.customer_count),
            Metric::Satisfaction => {
                self.numerator += record.satisfaction;
                self.denominator += 1.0;
            }
            _ => {}
        }
    }

    fn finish(&self, metric: Metric) -> Option<f64> {
        if self.rows == 0 {
            return None;
        }
        match metric {
            Metric::Revenue | Metric::Units | Metric::CustomerCount => Some(self.numerator),
            Metric::Transactions => Some(self.rows as f64),
            Metric::AverageDiscount | Metric::AverageSale | Metric::Satisfaction => {
                (self.denominator > 0.0).then(|| self.numerator / self.denominator)
            }
        }
    }
}
