//! Aggregation inputs and outputs

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Granularity;
use crate::{AnalyticsError, Result};

/// Grouping key of an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Calendar periods with granularity derived from the effective date range
    Period,
    /// Calendar periods with a fixed granularity
    PeriodOf(Granularity),
    Region,
    Product,
    Segment,
    /// Customer channel; customer metrics only
    Channel,
}

impl GroupBy {
    pub fn is_time(&self) -> bool {
        matches!(self, GroupBy::Period | GroupBy::PeriodOf(_))
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Period => write!(f, "period"),
            GroupBy::PeriodOf(g) => write!(f, "period({})", g.as_str()),
            GroupBy::Region => write!(f, "region"),
            GroupBy::Product => write!(f, "product"),
            GroupBy::Segment => write!(f, "segment"),
            GroupBy::Channel => write!(f, "channel"),
        }
    }
}

/// Measured quantity of an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Sum of sales revenue
    Revenue,
    /// Sum of units sold
    Units,
    /// Number of sales rows
    Transactions,
    /// Mean discount fraction
    AverageDiscount,
    /// Revenue divided by units
    AverageSale,
    /// Sum of customer counts
    CustomerCount,
    /// Mean satisfaction score
    Satisfaction,
}

impl Metric {
    /// Whether the metric reads the customer table rather than the sales table.
    pub fn is_customer_metric(&self) -> bool {
        matches!(self, Metric::CustomerCount | Metric::Satisfaction)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Metric::Revenue => "revenue",
            Metric::Units => "units",
            Metric::Transactions => "transactions",
            Metric::AverageDiscount => "average_discount",
            Metric::AverageSale => "average_sale",
            Metric::CustomerCount => "customer_count",
            Metric::Satisfaction => "satisfaction",
        };
        write!(f, "{}", s)
    }
}

/// Bucket label: a period start date or a category value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKey {
    Period(NaiveDate),
    Category(String),
}

impl BucketKey {
    pub fn as_period(&self) -> Option<NaiveDate> {
        match self {
            BucketKey::Period(date) => Some(*date),
            BucketKey::Category(_) => None,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Period(date) => write!(f, "{}", date),
            BucketKey::Category(label) => write!(f, "{}", label),
        }
    }
}

/// One bucket of a series. `value` is `None` when no record fell in the bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub key: BucketKey,
    pub value: Option<f64>,
}

impl SeriesPoint {
    pub fn period(date: NaiveDate, value: Option<f64>) -> Self {
        Self {
            key: BucketKey::Period(date),
            value,
        }
    }

    pub fn category(label: impl Into<String>, value: f64) -> Self {
        Self {
            key: BucketKey::Category(label.into()),
            value: Some(value),
        }
    }
}

/// Ordered `(bucket, value)` pairs produced by the aggregation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSeries {
    /// Set for time-grouped series
    pub granularity: Option<Granularity>,
    pub points: Vec<SeriesPoint>,
}

impl AggregatedSeries {
    pub fn empty(granularity: Option<Granularity>) -> Self {
        Self {
            granularity,
            points: Vec::new(),
        }
    }

    /// Time series from `(period start, value)` pairs.
    pub fn from_periods<I>(granularity: Granularity, periods: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, Option<f64>)>,
    {
        Self {
            granularity: Some(granularity),
            points: periods
                .into_iter()
                .map(|(date, value)| SeriesPoint::period(date, value))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_time_series(&self) -> bool {
        self.granularity.is_some()
    }

    /// Values that are present, in bucket order.
    pub fn present_values(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.value).collect()
    }

    /// Number of buckets with no value.
    pub fn gap_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_none()).count()
    }

    /// Fail with `EmptyResult` for callers that cannot proceed without data.
    pub fn require_non_empty(self) -> Result<Self> {
        if self.present_values().is_empty() {
            return Err(AnalyticsError::EmptyResult);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_periods_keeps_gaps() {
        let series = AggregatedSeries::from_periods(
            Granularity::Month,
            vec![
                (date(2024, 1, 1), Some(1.0)),
                (date(2024, 2, 1), None),
                (date(2024, 3, 1), Some(3.0)),
            ],
        );
        assert!(series.is_time_series());
        assert_eq!(series.len(), 3);
        assert_eq!(series.gap_count(), 1);
        assert_eq!(series.present_values(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_require_non_empty() {
        assert!(matches!(
            AggregatedSeries::empty(None).require_non_empty(),
            Err(AnalyticsError::EmptyResult)
        ));
        let gaps_only = AggregatedSeries::from_periods(Granularity::Day, vec![(date(2024, 1, 1), None)]);
        assert!(gaps_only.require_non_empty().is_err());
    }

    #[test]
    fn test_metric_table() {
        assert!(Metric::Satisfaction.is_customer_metric());
        assert!(!Metric::AverageSale.is_customer_metric());
    }

    #[test]
    fn test_group_by_display() {
        assert_eq!(GroupBy::PeriodOf(Granularity::Week).to_string(), "period(week)");
        assert!(GroupBy::Period.is_time());
        assert!(!GroupBy::Channel.is_time());
    }
}
