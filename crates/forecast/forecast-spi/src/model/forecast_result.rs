//! Forecast result and its components

use analytics_spi::Granularity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Algorithm;

/// One forecast period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonPoint {
    /// Start date of the forecast period
    pub period: NaiveDate,
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Mean absolute percentage error, undefined when a withheld actual is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Mape {
    /// Fraction, not percent
    Value(f64),
    NotApplicable,
}

impl Mape {
    pub fn value(&self) -> Option<f64> {
        match self {
            Mape::Value(v) => Some(*v),
            Mape::NotApplicable => None,
        }
    }
}

/// Accuracy over the withheld backtest window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestMetrics {
    pub mae: f64,
    pub rmse: f64,
    pub mape: Mape,
    /// Number of withheld periods
    pub window: usize,
}

/// What series repair did before fitting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairReport {
    /// Interior gaps filled by linear interpolation
    pub interpolated: usize,
    /// Gaps removed from the start of the series
    pub trimmed_leading: usize,
    /// Gaps removed from the end of the series
    pub trimmed_trailing: usize,
    /// Calendar periods missing from the input and inserted as gaps
    pub inserted: usize,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        *self == RepairReport::default()
    }
}

/// Headline figures comparing the forecast to its history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub average_historical: f64,
    pub average_forecast: f64,
    pub total_forecast: f64,
    /// Percent change of the average forecast over the average history;
    /// `None` when the historical average is not positive
    pub growth_percent: Option<f64>,
}

/// Outcome of one forecast request. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub horizon_points: Vec<HorizonPoint>,
    pub backtest_metrics: BacktestMetrics,
    pub algorithm_used: Algorithm,
    pub confidence_level: f64,
    pub granularity: Granularity,
    /// Length of the repaired history the final model was fitted on
    pub history_len: usize,
    pub repair: RepairReport,
    pub summary: ForecastSummary,
}

impl ForecastResult {
    pub fn points(&self) -> Vec<f64> {
        self.horizon_points.iter().map(|p| p.point).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mape_value() {
        assert_eq!(Mape::Value(0.25).value(), Some(0.25));
        assert_eq!(Mape::NotApplicable.value(), None);
    }

    #[test]
    fn test_mape_serde_shape() {
        let json = serde_json::to_string(&Mape::NotApplicable).unwrap();
        assert_eq!(json, r#"{"status":"not_applicable"}"#);
        let json = serde_json::to_string(&Mape::Value(0.5)).unwrap();
        assert_eq!(json, r#"{"status":"value","value":0.5}"#);
    }

    #[test]
    fn test_repair_report_clean() {
        assert!(RepairReport::default().is_clean());
        let report = RepairReport {
            interpolated: 1,
            ..RepairReport::default()
        };
        assert!(!report.is_clean());
    }
}
