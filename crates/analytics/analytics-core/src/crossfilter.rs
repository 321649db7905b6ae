//! Cross-filter propagation from chart selections.
//!
//! Presentation layers re-deliver the last selection on every re-render.
//! Each chart tags its selections with a monotonically increasing revision;
//! a revision at or below the last one applied for that chart is a replay
//! and leaves the filter state alone.

use std::collections::{BTreeMap, HashMap};

use analytics_spi::{Dimension, FilterDelta, FilterEvent, FilterState, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter;

/// A click on a chart element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSelection {
    pub chart_id: String,
    pub dimension: Dimension,
    pub value: String,
    pub revision: u64,
}

impl ChartSelection {
    pub fn new(
        chart_id: impl Into<String>,
        dimension: Dimension,
        value: impl Into<String>,
        revision: u64,
    ) -> Self {
        Self {
            chart_id: chart_id.into(),
            dimension,
            value: value.into(),
            revision,
        }
    }
}

/// Translates chart selections into filter mutations.
#[derive(Debug, Clone, Default)]
pub struct CrossFilter {
    last_revision: HashMap<String, u64>,
    owners: BTreeMap<Dimension, String>,
}

impl CrossFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `selection` to `state` unless it is a replay.
    ///
    /// Returns the next state and the delta; replays return a clone of
    /// `state` and an empty delta.
    pub fn handle(
        &mut self,
        state: &FilterState,
        selection: &ChartSelection,
    ) -> Result<(FilterState, FilterDelta)> {
        if self.is_replay(selection) {
            debug!(
                chart = %selection.chart_id,
                revision = selection.revision,
                "ignoring replayed chart selection"
            );
            return Ok((state.clone(), FilterDelta::default()));
        }

        let event = FilterEvent::ClickChartElement {
            dimension: selection.dimension,
            value: selection.value.clone(),
        };
        let (next, delta) = filter::apply_with_delta(state, &event)?;

        self.last_revision
            .insert(selection.chart_id.clone(), selection.revision);
        if next.values(selection.dimension).is_some() {
            self.owners
                .insert(selection.dimension, selection.chart_id.clone());
        } else {
            self.owners.remove(&selection.dimension);
        }
        Ok((next, delta))
    }

    pub fn is_replay(&self, selection: &ChartSelection) -> bool {
        self.last_revision
            .get(&selection.chart_id)
            .map(|&last| selection.revision <= last)
            .unwrap_or(false)
    }

    /// Chart whose selection last constrained `dimension`.
    pub fn owner(&self, dimension: Dimension) -> Option<&str> {
        self.owners.get(&dimension).map(String::as_str)
    }

    /// Forget dimension ownership after the filter state was changed elsewhere.
    /// Revision history is kept so stale replays stay ignored.
    pub fn release(&mut self, delta: &FilterDelta) {
        for dimension in &delta.dimensions {
            self.owners.remove(dimension);
        }
    }
}
