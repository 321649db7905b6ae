//! Rolling statistics over time series.

use analytics_spi::{AggregatedSeries, BucketKey, SeriesPoint};
use serde::{Deserialize, Serialize};

/// A bucket whose value deviates from its trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub key: BucketKey,
    pub value: f64,
    pub rolling_mean: f64,
    pub z_score: f64,
}

/// Flag values whose z-score against the trailing `window` present values
/// (the value itself included) exceeds `threshold` in magnitude.
///
/// Gaps are skipped. Windows with zero spread never flag.
pub fn detect_anomalies(series: &AggregatedSeries, window: usize, threshold: f64) -> Vec<Anomaly> {
    if window < 2 {
        return Vec::new();
    }
    let present: Vec<(&BucketKey, f64)> = series
        .points
        .iter()
        .filter_map(|p| p.value.map(|v| (&p.key, v)))
        .collect();

    present
        .windows(window)
        .filter_map(|w| {
            let values: Vec<f64> = w.iter().map(|(_, v)| *v).collect();
            let (key, value) = w[window - 1];
            let mean = values.iter().sum::<f64>() / window as f64;
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (window - 1) as f64;
            let std = variance.sqrt();
            if std <= f64::EPSILON {
                return None;
            }
            let z_score = (value - mean) / std;
            (z_score.abs() > threshold).then(|| Anomaly {
                key: key.clone(),
                value,
                rolling_mean: mean,
                z_score,
            })
        })
        .collect()
}

/// Trailing mean over `window` buckets; needs only one present value.
pub fn moving_average(series: &AggregatedSeries, window: usize) -> AggregatedSeries {
    let window = window.max(1);
    let points = series
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let start = (i + 1).saturating_sub(window);
            let values: Vec<f64> = series.points[start..=i]
                .iter()
                .filter_map(|p| p.value)
                .collect();
            let value = if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            };
            SeriesPoint {
                key: point.key.clone(),
                value,
            }
        })
        .collect();
    AggregatedSeries {
        granularity: series.granularity,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics_spi::Granularity;
    use chrono::NaiveDate;

    fn daily(values: &[Option<f64>]) -> AggregatedSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        AggregatedSeries::from_periods(
            Granularity::Day,
            values.iter().enumerate().map(|(i, v)| {
                (
                    Granularity::Day.advance(start, i as u32).unwrap(),
                    *v,
                )
            }),
        )
    }

    #[test]
    fn test_spike_is_flagged() {
        let mut values = vec![Some(10.0), Some(11.0), Some(9.0), Some(10.0), Some(10.5), Some(9.5)];
        values.push(Some(60.0));
        let anomalies = detect_anomalies(&daily(&values), 7, 2.0);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].value, 60.0);
        assert!(anomalies[0].z_score > 2.0);
    }

    #[test]
    fn test_flat_series_has_no_anomalies() {
        let values = vec![Some(5.0); 10];
        assert!(detect_anomalies(&daily(&values), 7, 2.0).is_empty());
    }

    #[test]
    fn test_short_series_has_no_anomalies() {
        assert!(detect_anomalies(&daily(&[Some(1.0), Some(100.0)]), 7, 2.0).is_empty());
    }

    #[test]
    fn test_moving_average_min_periods_one() {
        let ma = moving_average(&daily(&[Some(2.0), None, Some(4.0), Some(6.0)]), 2);
        let values: Vec<_> = ma.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(2.0), Some(2.0), Some(4.0), Some(5.0)]);
        assert_eq!(ma.granularity, Some(Granularity::Day));
    }
}
