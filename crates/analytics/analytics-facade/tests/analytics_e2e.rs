//! End-to-end tests for the analytics facade
//!
//! Walks through dashboard interactions using only this crate's API.

use analytics_facade::prelude::*;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn e2e_click_region_twice_clears_constraint() {
    let mut engine = CrossFilter::new();
    let state = FilterState::new();

    let (state, delta) = engine
        .handle(&state, &ChartSelection::new("sales-by-region", Dimension::Region, "West", 1))
        .unwrap();
    assert!(!delta.is_empty());
    assert_eq!(state.regions().unwrap().len(), 1);

    let (state, delta) = engine
        .handle(&state, &ChartSelection::new("sales-by-region", Dimension::Region, "West", 2))
        .unwrap();
    assert!(delta.touches(Dimension::Region));
    assert!(state.regions().is_none());
}

#[test]
fn e2e_save_clear_load_restores_date_range() {
    let mut registry = ViewRegistry::new();
    let q1 = apply(
        &FilterState::new(),
        &FilterEvent::SetDateRange {
            start: date(2024, 1, 1),
            end: date(2024, 3, 31),
        },
    )
    .unwrap();

    registry.save("Q1-view", &q1).unwrap();
    let cleared = apply(&q1, &FilterEvent::Clear).unwrap();
    assert!(cleared.is_unconstrained());

    let restored = registry.load("Q1-view").unwrap();
    assert_eq!(restored.date_range(), q1.date_range());
    assert!(restored.regions().is_none());
    assert!(restored.products().is_none());
    assert!(restored.segments().is_none());
}

#[test]
fn e2e_registry_blob_survives_export() {
    let mut registry = ViewRegistry::new();
    let west = FilterBuilder::new().regions(["West"]).build().unwrap();
    registry.save_described("west", "western region", &west).unwrap();
    registry.save("everything", &FilterState::new()).unwrap();

    let blob = registry.export_json().unwrap();
    let mut other = ViewRegistry::new();
    other.import_json(&blob).unwrap();

    assert_eq!(other.list(), vec!["west", "everything"]);
    assert_eq!(other.load("west").unwrap(), west);
    assert_eq!(other.get("west").unwrap().description.as_deref(), Some("western region"));
}

#[test]
fn e2e_moving_average_and_anomalies_over_aggregate() {
    let start = date(2024, 1, 1);
    let sales = (0..21u32)
        .map(|i| SalesRecordFixture::day(start, i, if i == 18 { 500.0 } else { 100.0 + f64::from(i % 3) }))
        .collect();
    let store = DatasetStore::new(sales, Vec::new());

    let series = aggregate(&store, &FilterState::new(), GroupBy::Period, Metric::Revenue).unwrap();
    assert_eq!(series.len(), 21);

    let ma = moving_average(&series, 7);
    assert_eq!(ma.len(), series.len());

    let anomalies = detect_anomalies(&series, 7, 2.0);
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].value, 500.0);
}

struct SalesRecordFixture;

impl SalesRecordFixture {
    fn day(start: NaiveDate, offset: u32, revenue: f64) -> analytics_facade::SalesRecord {
        analytics_facade::SalesRecord {
            date: Granularity::Day.advance(start, offset).unwrap(),
            region: "West".to_string(),
            product: "Widget".to_string(),
            segment: None,
            revenue,
            units: 1,
            discount: 0.0,
        }
    }
}
