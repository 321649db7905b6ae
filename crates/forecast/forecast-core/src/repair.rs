//! Series repair before fitting
//!
//! Places an aggregated series on its regular calendar grid, trims gaps at
//! either end and fills interior gaps by linear interpolation.

use analytics_spi::{AggregatedSeries, BucketKey, Granularity};
use chrono::NaiveDate;
use forecast_spi::{ForecastError, RepairReport, Result};

/// A gap-free series ready for fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairedSeries {
    pub granularity: Granularity,
    pub periods: Vec<NaiveDate>,
    pub values: Vec<f64>,
    pub report: RepairReport,
}

impl RepairedSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last_period(&self) -> Option<NaiveDate> {
        self.periods.last().copied()
    }
}

/// Repair `series` into a contiguous run of finite values.
///
/// Fails with `InvalidSeries` when the series is not a time series, carries a
/// period that is not aligned to its granularity, or repeats a period. A
/// series with no finite value repairs to an empty series.
pub fn repair(series: &AggregatedSeries) -> Result<RepairedSeries> {
    let granularity = series.granularity.ok_or_else(|| {
        ForecastError::InvalidSeries("series is not grouped by period".to_string())
    })?;

    let mut observed: Vec<(NaiveDate, Option<f64>)> = Vec::with_capacity(series.len());
    for point in &series.points {
        let period = match &point.key {
            BucketKey::Period(date) => *date,
            BucketKey::Category(label) => {
                return Err(ForecastError::InvalidSeries(format!(
                    "category key '{}' in a time series",
                    label
                )))
            }
        };
        if granularity.bucket_start(period) != period {
            return Err(ForecastError::InvalidSeries(format!(
                "period {} is not aligned to {} buckets",
                period,
                granularity.as_str()
            )));
        }
        observed.push((period, point.value.filter(|v| v.is_finite())));
    }
    observed.sort_by_key(|(period, _)| *period);
    if let Some(pair) = observed.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(ForecastError::InvalidSeries(format!(
            "duplicate period {}",
            pair[0].0
        )));
    }

    let mut report = RepairReport::default();
    let mut periods = Vec::with_capacity(observed.len());
    let mut values = Vec::with_capacity(observed.len());
    let mut iter = observed.into_iter().peekable();
    while let Some((period, value)) = iter.next() {
        periods.push(period);
        values.push(value);
        if let Some((next, _)) = iter.peek() {
            let mut cursor = granularity.advance(period, 1);
            while let Some(missing) = cursor.filter(|d| d < next) {
                periods.push(missing);
                values.push(None);
                report.inserted += 1;
                cursor = granularity.advance(missing, 1);
            }
        }
    }

    let Some(first) = values.iter().position(Option::is_some) else {
        report.trimmed_leading = values.len();
        return Ok(RepairedSeries {
            granularity,
            periods: Vec::new(),
            values: Vec::new(),
            report,
        });
    };
    let last = values.iter().rposition(Option::is_some).unwrap_or(first);
    report.trimmed_leading = first;
    report.trimmed_trailing = values.len() - 1 - last;

    let periods = periods[first..=last].to_vec();
    let window = &values[first..=last];
    report.interpolated = window.iter().filter(|v| v.is_none()).count();

    Ok(RepairedSeries {
        granularity,
        periods,
        values: interpolate_linear(window),
        report,
    })
}

/// Fill `None` entries linearly between the nearest present neighbours.
///
/// Gaps at either end take the nearest present value.
pub fn interpolate_linear(data: &[Option<f64>]) -> Vec<f64> {
    let n = data.len();
    (0..n)
        .map(|i| {
            if let Some(v) = data[i] {
                return v;
            }
            let prev = (0..i).rev().find_map(|j| data[j].map(|v| (j, v)));
            let next = ((i + 1)..n).find_map(|j| data[j].map(|v| (j, v)));
            match (prev, next) {
                (Some((p, pv)), Some((q, qv))) => {
                    let ratio = (i - p) as f64 / (q - p) as f64;
                    pv + ratio * (qv - pv)
                }
                (Some((_, pv)), None) => pv,
                (None, Some((_, qv))) => qv,
                (None, None) => 0.0,
            }
        })
        .collect()
}
