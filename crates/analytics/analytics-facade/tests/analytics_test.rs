//! Unit-level property tests for the analytics facade

use analytics_facade::prelude::*;

#[test]
fn test_toggle_twice_is_identity_from_unconstrained() {
    for dimension in Dimension::ALL {
        let event = match dimension {
            Dimension::Region => FilterEvent::ToggleRegion("X".to_string()),
            Dimension::Product => FilterEvent::ToggleProduct("X".to_string()),
            Dimension::Segment => FilterEvent::ToggleSegment("X".to_string()),
        };
        let once = apply(&FilterState::new(), &event).unwrap();
        let twice = apply(&once, &event).unwrap();
        assert!(twice.is_unconstrained(), "{} not unconstrained", dimension);
    }
}

#[test]
fn test_clear_from_any_state() {
    let states = vec![
        FilterState::new(),
        FilterBuilder::new().regions(["West", "East"]).build().unwrap(),
        FilterBuilder::new().segments(["SMB"]).products(["Widget"]).build().unwrap(),
    ];
    for state in states {
        assert!(apply(&state, &FilterEvent::Clear).unwrap().is_unconstrained());
    }
}

#[test]
fn test_save_load_roundtrip() {
    let mut registry = ViewRegistry::new();
    let state = FilterBuilder::new().products(["Widget", "Gadget"]).build().unwrap();
    registry.save("products", &state).unwrap();
    assert_eq!(registry.load("products").unwrap(), state);
}

#[test]
fn test_empty_store_aggregates_to_empty_series() {
    let store = DatasetStore::default();
    for group_by in [GroupBy::Period, GroupBy::Region, GroupBy::Segment] {
        let series = aggregate(&store, &FilterState::new(), group_by, Metric::Revenue).unwrap();
        assert!(series.is_empty());
    }
}
