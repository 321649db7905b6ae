//! Filter state, filter events and change deltas

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CustomerRecord, DateRange, Dimension, SalesRecord};

/// Active constraints of a dashboard session.
///
/// `None` on any field means "unconstrained". An empty value set is never
/// stored: every setter and the deserializer collapse it to `None`, so
/// "filter everything out" is not representable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFilterState")]
pub struct FilterState {
    date_range: Option<DateRange>,
    regions: Option<BTreeSet<String>>,
    products: Option<BTreeSet<String>>,
    segments: Option<BTreeSet<String>>,
}

#[derive(Deserialize)]
struct RawFilterState {
    #[serde(default)]
    date_range: Option<DateRange>,
    #[serde(default)]
    regions: Option<BTreeSet<String>>,
    #[serde(default)]
    products: Option<BTreeSet<String>>,
    #[serde(default)]
    segments: Option<BTreeSet<String>>,
}

impl From<RawFilterState> for FilterState {
    fn from(raw: RawFilterState) -> Self {
        Self {
            date_range: raw.date_range,
            regions: normalize(raw.regions),
            products: normalize(raw.products),
            segments: normalize(raw.segments),
        }
    }
}

fn normalize(values: Option<BTreeSet<String>>) -> Option<BTreeSet<String>> {
    values.filter(|set| !set.is_empty())
}

impl FilterState {
    /// Unconstrained state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.date_range.is_none()
            && self.regions.is_none()
            && self.products.is_none()
            && self.segments.is_none()
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.date_range = range;
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Allowed values on `dimension`, `None` when unconstrained.
    pub fn values(&self, dimension: Dimension) -> Option<&BTreeSet<String>> {
        match dimension {
            Dimension::Region => self.regions.as_ref(),
            Dimension::Product => self.products.as_ref(),
            Dimension::Segment => self.segments.as_ref(),
        }
    }

    pub fn regions(&self) -> Option<&BTreeSet<String>> {
        self.regions.as_ref()
    }

    pub fn products(&self) -> Option<&BTreeSet<String>> {
        self.products.as_ref()
    }

    pub fn segments(&self) -> Option<&BTreeSet<String>> {
        self.segments.as_ref()
    }

    /// Replace the constraint on `dimension`. An empty set clears it.
    pub fn set_values(&mut self, dimension: Dimension, values: Option<BTreeSet<String>>) {
        let slot = match dimension {
            Dimension::Region => &mut self.regions,
            Dimension::Product => &mut self.products,
            Dimension::Segment => &mut self.segments,
        };
        *slot = normalize(values);
    }

    pub fn with_values<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_values(dimension, Some(values.into_iter().map(Into::into).collect()));
        self
    }

    /// Whether a row carrying `value` on `dimension` passes this state.
    ///
    /// A row with no value on a constrained dimension does not pass.
    pub fn allows(&self, dimension: Dimension, value: Option<&str>) -> bool {
        match (self.values(dimension), value) {
            (None, _) => true,
            (Some(set), Some(v)) => set.contains(v),
            (Some(_), None) => false,
        }
    }

    pub fn matches_sales(&self, record: &SalesRecord) -> bool {
        if let Some(range) = &self.date_range {
            if !range.contains(record.date) {
                return false;
            }
        }
        Dimension::ALL
            .iter()
            .all(|&dim| self.allows(dim, record.dimension_value(dim)))
    }

    /// Customer rows only carry a segment, so only the segment constraint applies.
    pub fn matches_customer(&self, record: &CustomerRecord) -> bool {
        self.allows(Dimension::Segment, Some(&record.segment))
    }

    /// Fields that differ between `self` and `next`.
    pub fn diff(&self, next: &FilterState) -> FilterDelta {
        let dimensions = Dimension::ALL
            .iter()
            .copied()
            .filter(|&dim| self.values(dim) != next.values(dim))
            .collect();
        FilterDelta {
            date_range: self.date_range != next.date_range,
            dimensions,
        }
    }
}

/// A request to mutate the filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterEvent {
    /// Constrain to an inclusive date range; rejected when `start > end`
    SetDateRange { start: NaiveDate, end: NaiveDate },
    ClearDateRange,
    /// Replace a dimension's constraint; an empty list clears it
    SetDimension {
        dimension: Dimension,
        values: Vec<String>,
    },
    ToggleRegion(String),
    ToggleProduct(String),
    ToggleSegment(String),
    /// Chart click: narrow `dimension` to `value`, or clear it if already narrowed to exactly `value`
    ClickChartElement { dimension: Dimension, value: String },
    /// Reset every constraint
    Clear,
}

/// Which parts of the filter state changed during one mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDelta {
    pub date_range: bool,
    pub dimensions: BTreeSet<Dimension>,
}

impl FilterDelta {
    /// No dependent view needs recomputation.
    pub fn is_empty(&self) -> bool {
        !self.date_range && self.dimensions.is_empty()
    }

    pub fn touches(&self, dimension: Dimension) -> bool {
        self.dimensions.contains(&dimension)
    }
}
