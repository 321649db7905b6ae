//! Integration tests for the analytics facade
//!
//! Exercises CSV ingestion, filtering, aggregation and KPIs together.

use analytics_facade::prelude::*;
use analytics_facade::{compute_kpis, BucketKey, KpiOptions};
use chrono::NaiveDate;

const SALES_CSV: &str = "\
Date,Region,Product,Segment,Revenue,Units,Discount
2024-01-01,West,Widget,SMB,100,2,0.1
2024-01-01,East,Gadget,Enterprise,80,1,0.0
2024-01-02,West,Gadget,SMB,40,4,0.2
2024-01-04,North,Widget,Enterprise,60,3,0.05
2024-02-10,West,Widget,SMB,120,3,0.1
";

const CUSTOMERS_CSV: &str = "\
Segment,Channel,Satisfaction,Customer Count
SMB,Online,4.5,100
SMB,Retail,4.1,50
Enterprise,Partner,3.8,20
";

fn store() -> DatasetStore {
    DatasetStore::from_csv(SALES_CSV.as_bytes(), CUSTOMERS_CSV.as_bytes()).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_csv_to_region_totals() {
    let series = aggregate(&store(), &FilterState::new(), GroupBy::Region, Metric::Revenue).unwrap();
    let totals: Vec<(String, f64)> = series
        .points
        .iter()
        .map(|p| (p.key.to_string(), p.value.unwrap()))
        .collect();
    assert_eq!(
        totals,
        vec![
            ("East".to_string(), 80.0),
            ("North".to_string(), 60.0),
            ("West".to_string(), 260.0)
        ]
    );
}

#[test]
fn test_filtered_time_series_has_gaps_on_grid() {
    let filter = FilterState::new()
        .with_date_range(DateRange::new(date(2024, 1, 1), date(2024, 1, 5)).unwrap())
        .with_values(Dimension::Region, ["West"]);
    let series = aggregate(&store(), &filter, GroupBy::Period, Metric::Units).unwrap();

    assert_eq!(series.granularity, Some(Granularity::Day));
    assert_eq!(series.len(), 5);
    assert_eq!(series.points[0].value, Some(2.0));
    assert_eq!(series.points[1].value, Some(4.0));
    assert_eq!(series.gap_count(), 3);
}

#[test]
fn test_monthly_grouping() {
    let series = aggregate(
        &store(),
        &FilterState::new(),
        GroupBy::PeriodOf(Granularity::Month),
        Metric::Revenue,
    )
    .unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.points[0].key, BucketKey::Period(date(2024, 1, 1)));
    assert_eq!(series.points[0].value, Some(280.0));
    assert_eq!(series.points[1].value, Some(120.0));
}

#[test]
fn test_segment_filter_applies_to_customers() {
    let filter = FilterState::new().with_values(Dimension::Segment, ["SMB"]);
    let series = aggregate(&store(), &filter, GroupBy::Channel, Metric::Satisfaction).unwrap();
    assert_eq!(series.len(), 2);

    let kpis = compute_kpis(&store(), &filter, &KpiOptions::default());
    assert_eq!(kpis.total_customers, 150);
    assert_eq!(kpis.transactions, 3);
}

#[test]
fn test_filter_events_drive_aggregation() {
    let store = store();
    let state = apply(&FilterState::new(), &FilterEvent::ToggleProduct("Widget".to_string())).unwrap();
    let series = aggregate(&store, &state, GroupBy::Product, Metric::Transactions).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series.points[0].value, Some(3.0));
}

#[test]
fn test_schema_error_surfaces_through_store() {
    let err = DatasetStore::from_csv("date,region\n".as_bytes(), CUSTOMERS_CSV.as_bytes()).unwrap_err();
    assert!(matches!(err, AnalyticsError::Schema { .. }));
}
