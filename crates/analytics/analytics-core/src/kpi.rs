//! Headline KPIs with period-over-period trends.

use analytics_spi::{DatasetView, FilterState, SalesRecord};
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

/// Longest comparison window accepted by configuration, one hundred years.
pub const MAX_COMPARISON_DAYS: i64 = 36_500;

/// Trend comparison window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiOptions {
    /// Length in days of the current and previous comparison windows
    pub comparison_days: i64,
}

impl Default for KpiOptions {
    fn default() -> Self {
        Self { comparison_days: 30 }
    }
}

/// Totals over the filtered data plus percent change of the latest window
/// against the one before it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_revenue: f64,
    pub total_units: u64,
    pub transactions: usize,
    /// Sum of customer counts over segment-filtered customer rows
    pub total_customers: u64,
    /// Revenue per unit; `None` when no units were sold
    pub average_sale: Option<f64>,
    /// Percent change; `None` when the filtered span is shorter than two windows
    /// or the previous window is empty
    pub revenue_trend: Option<f64>,
    pub units_trend: Option<f64>,
    pub transactions_trend: Option<f64>,
    /// Percent change of revenue per unit; `None` when either window sold no units
    pub average_sale_trend: Option<f64>,
}

/// Compute KPIs over the rows passing `filter`.
pub fn compute_kpis(view: &dyn DatasetView, filter: &FilterState, options: &KpiOptions) -> KpiSummary {
    let rows: Vec<&SalesRecord> = view
        .sales_in(filter.date_range().as_ref())
        .iter()
        .filter(|r| filter.matches_sales(r))
        .collect();

    let total_revenue: f64 = rows.iter().map(|r| r.revenue).sum();
    let total_units: u64 = rows.iter().map(|r| u64::from(r.units)).sum();
    let total_customers: u64 = view
        .customers()
        .iter()
        .filter(|c| filter.matches_customer(c))
        .map(|c| u64::from(c.customer_count))
        .sum();

    let mut summary = KpiSummary {
        total_revenue,
        total_units,
        transactions: rows.len(),
        total_customers,
        average_sale: (total_units > 0).then(|| total_revenue / total_units as f64),
        ..KpiSummary::default()
    };

    // Rows are date-sorted, so the first and last bound the filtered span.
    // A window chrono cannot represent leaves the trends unset.
    let bounds = TimeDelta::try_days(options.comparison_days)
        .filter(|_| options.comparison_days > 0)
        .and_then(|window| Some((window, window.checked_mul(2)?)));
    if let (Some(first), Some(last), Some((window, span))) = (rows.first(), rows.last(), bounds) {
        if last.date - first.date >= span {
            let midpoint = last.date - window;
            let current = Window::collect(&rows, midpoint, last.date);
            let previous = Window::collect(&rows, midpoint - window, midpoint - TimeDelta::days(1));
            summary.revenue_trend = percent_change(current.revenue, previous.revenue);
            summary.units_trend = percent_change(current.units, previous.units);
            summary.transactions_trend =
                percent_change(current.transactions, previous.transactions);
            summary.average_sale_trend = current
                .average_sale()
                .zip(previous.average_sale())
                .and_then(|(current, previous)| percent_change(current, previous));
        }
    }
    summary
}

#[derive(Debug, Default)]
struct Window {
    revenue: f64,
    units: f64,
    transactions: f64,
}

impl Window {
    fn collect(rows: &[&SalesRecord], from: NaiveDate, to: NaiveDate) -> Self {
        rows.iter()
            .filter(|r| from <= r.date && r.date <= to)
            .fold(Window::default(), |mut acc, r| {
                acc.revenue += r.revenue;
                acc.units += f64::from(r.units);
                acc.transactions += 1.0;
                acc
            })
    }

    fn average_sale(&self) -> Option<f64> {
        (self.units > 0.0).then(|| self.revenue / self.units)
    }
}

fn percent_change(current: f64, previous: f64) -> Option<f64> {
    (previous > 0.0).then(|| (current - previous) / previous * 100.0)
}
