//! Raw dataset rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Dimension;

/// One sales transaction. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub region: String,
    pub product: String,
    /// Customer segment, absent when the source table has no segment column
    pub segment: Option<String>,
    pub revenue: f64,
    pub units: u32,
    /// Discount as a fraction of list price
    pub discount: f64,
}

impl SalesRecord {
    /// Value of this row on a filterable dimension.
    pub fn dimension_value(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Region => Some(&self.region),
            Dimension::Product => Some(&self.product),
            Dimension::Segment => self.segment.as_deref(),
        }
    }
}

/// One customer segment row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub segment: String,
    pub channel: String,
    pub satisfaction: f64,
    pub customer_count: u32,
}
