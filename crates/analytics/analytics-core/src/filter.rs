//! Filter event application.
//!
//! `apply` is a pure function of `(state, event)`; the caller keeps the
//! previous state untouched on error. Events on different dimensions commute;
//! events on the same dimension are last-applied-wins.

use std::collections::BTreeSet;

use analytics_spi::{DateRange, Dimension, FilterDelta, FilterEvent, FilterState, Result};
use tracing::debug;

/// Apply one event, returning the next state.
pub fn apply(state: &FilterState, event: &FilterEvent) -> Result<FilterState> {
    let mut next = state.clone();
    match event {
        FilterEvent::SetDateRange { start, end } => {
            next.set_date_range(Some(DateRange::new(*start, *end)?));
        }
        FilterEvent::ClearDateRange => next.set_date_range(None),
        FilterEvent::SetDimension { dimension, values } => {
            next.set_values(*dimension, Some(values.iter().cloned().collect()));
        }
        FilterEvent::ToggleRegion(value) => toggle(&mut next, Dimension::Region, value),
        FilterEvent::ToggleProduct(value) => toggle(&mut next, Dimension::Product, value),
        FilterEvent::ToggleSegment(value) => toggle(&mut next, Dimension::Segment, value),
        FilterEvent::ClickChartElement { dimension, value } => {
            click(&mut next, *dimension, value)
        }
        FilterEvent::Clear => next = FilterState::new(),
    }
    Ok(next)
}

/// Apply one event and report which fields changed.
pub fn apply_with_delta(
    state: &FilterState,
    event: &FilterEvent,
) -> Result<(FilterState, FilterDelta)> {
    let next = apply(state, event)?;
    let delta = state.diff(&next);
    debug!(?event, changed = ?delta, "filter event applied");
    Ok((next, delta))
}

fn toggle(state: &mut FilterState, dimension: Dimension, value: &str) {
    let mut values: BTreeSet<String> = state.values(dimension).cloned().unwrap_or_default();
    if !values.remove(value) {
        values.insert(value.to_string());
    }
    // An emptied set collapses back to unconstrained.
    state.set_values(dimension, Some(values));
}

fn click(state: &mut FilterState, dimension: Dimension, value: &str) {
    let already_sole = state
        .values(dimension)
        .map(|set| set.len() == 1 && set.contains(value))
        .unwrap_or(false);
    if already_sole {
        state.set_values(dimension, None);
    } else {
        state.set_values(dimension, Some(BTreeSet::from([value.to_string()])));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics_spi::AnalyticsError;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run(state: &FilterState, events: &[FilterEvent]) -> FilterState {
        events
            .iter()
            .fold(state.clone(), |s, e| apply(&s, e).unwrap())
    }

    #[test]
    fn test_toggle_twice_returns_to_unconstrained() {
        let toggle = FilterEvent::ToggleRegion("West".to_string());
        let state = run(&FilterState::new(), &[toggle.clone(), toggle]);
        assert!(state.regions().is_none());
        assert!(state.is_unconstrained());
    }

    #[test]
    fn test_toggle_adds_to_existing_selection() {
        let state = run(
            &FilterState::new(),
            &[
                FilterEvent::ToggleProduct("Widget".to_string()),
                FilterEvent::ToggleProduct("Gadget".to_string()),
            ],
        );
        assert_eq!(state.products().unwrap().len(), 2);
    }

    #[test]
    fn test_click_narrows_then_clears() {
        let click = FilterEvent::ClickChartElement {
            dimension: Dimension::Region,
            value: "West".to_string(),
        };
        let once = apply(&FilterState::new(), &click).unwrap();
        assert_eq!(once.regions().unwrap().iter().collect::<Vec<_>>(), vec!["West"]);
        let twice = apply(&once, &click).unwrap();
        assert!(twice.regions().is_none());
    }

    #[test]
    fn test_click_overrides_multi_selection_on_one_dimension() {
        let start = FilterState::new()
            .with_values(Dimension::Region, ["West", "East"])
            .with_values(Dimension::Product, ["Widget"]);
        let next = apply(
            &start,
            &FilterEvent::ClickChartElement {
                dimension: Dimension::Region,
                value: "West".to_string(),
            },
        )
        .unwrap();
        assert_eq!(next.regions().unwrap().len(), 1);
        assert_eq!(next.products(), start.products());
    }

    #[test]
    fn test_invalid_range_leaves_state_unchanged() {
        let state = FilterState::new().with_values(Dimension::Region, ["West"]);
        let err = apply(
            &state,
            &FilterEvent::SetDateRange {
                start: date(2024, 5, 1),
                end: date(2024, 4, 1),
            },
        )
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidRange { .. }));
        assert_eq!(state.regions().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let state = FilterState::new()
            .with_values(Dimension::Segment, ["SMB"])
            .with_date_range(DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap());
        assert!(apply(&state, &FilterEvent::Clear).unwrap().is_unconstrained());
    }

    #[test]
    fn test_set_dimension_with_empty_values_unconstrains() {
        let state = FilterState::new().with_values(Dimension::Product, ["Widget"]);
        let next = apply(
            &state,
            &FilterEvent::SetDimension {
                dimension: Dimension::Product,
                values: vec![],
            },
        )
        .unwrap();
        assert!(next.products().is_none());
    }

    #[test]
    fn test_events_on_different_dimensions_commute() {
        let a = FilterEvent::ToggleRegion("West".to_string());
        let b = FilterEvent::ToggleSegment("SMB".to_string());
        let start = FilterState::new();
        assert_eq!(run(&start, &[a.clone(), b.clone()]), run(&start, &[b, a]));
    }

    #[test]
    fn test_same_dimension_is_last_applied_wins() {
        let set_west = FilterEvent::SetDimension {
            dimension: Dimension::Region,
            values: vec!["West".to_string()],
        };
        let set_east = FilterEvent::SetDimension {
            dimension: Dimension::Region,
            values: vec!["East".to_string()],
        };
        let state = run(&FilterState::new(), &[set_west, set_east]);
        assert!(state.regions().unwrap().contains("East"));
        assert!(!state.regions().unwrap().contains("West"));
    }

    #[test]
    fn test_delta_reports_changed_dimension_only() {
        let (_, delta) = apply_with_delta(
            &FilterState::new(),
            &FilterEvent::ToggleSegment("SMB".to_string()),
        )
        .unwrap();
        assert!(delta.touches(Dimension::Segment));
        assert!(!delta.date_range);

        let (_, noop) = apply_with_delta(&FilterState::new(), &FilterEvent::Clear).unwrap();
        assert!(noop.is_empty());
    }
}
