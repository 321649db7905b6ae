//! In-memory dataset store.

use std::collections::BTreeSet;
use std::io::Read;

use analytics_spi::{CustomerRecord, DatasetView, DateRange, Dimension, Result, SalesRecord};
use tracing::info;

use crate::loader;

/// Owns the raw tables for the lifetime of the process.
///
/// Sales rows are sorted by date on construction so date-range lookups are
/// binary searches. Shared across sessions behind an `Arc`; never mutated.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    sales: Vec<SalesRecord>,
    customers: Vec<CustomerRecord>,
}

impl DatasetStore {
    pub fn new(mut sales: Vec<SalesRecord>, customers: Vec<CustomerRecord>) -> Self {
        sales.sort_by_key(|r| r.date);
        info!(
            sales = sales.len(),
            customers = customers.len(),
            "dataset loaded"
        );
        Self { sales, customers }
    }

    /// Load both tables from CSV sources.
    pub fn from_csv<S: Read, C: Read>(sales: S, customers: C) -> Result<Self> {
        let sales = loader::read_sales(sales)?;
        let customers = loader::read_customers(customers)?;
        Ok(Self::new(sales, customers))
    }

    /// Distinct values present on `dimension`, sorted.
    pub fn distinct_values(&self, dimension: Dimension) -> BTreeSet<String> {
        let mut values: BTreeSet<String> = self
            .sales
            .iter()
            .filter_map(|r| r.dimension_value(dimension))
            .map(str::to_string)
            .collect();
        if dimension == Dimension::Segment {
            values.extend(self.customers.iter().map(|c| c.segment.clone()));
        }
        values
    }

    pub fn channels(&self) -> BTreeSet<String> {
        self.customers.iter().map(|c| c.channel.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty() && self.customers.is_empty()
    }

    /// Sales rows inside `range`.
    pub fn sales_between(&self, range: &DateRange) -> &[SalesRecord] {
        self.sales_in(Some(range))
    }
}

impl DatasetView for DatasetStore {
    fn sales(&self) -> &[SalesRecord] {
        &self.sales
    }

    fn customers(&self) -> &[CustomerRecord] {
        &self.customers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(d: NaiveDate, region: &str) -> SalesRecord {
        SalesRecord {
            date: d,
            region: region.to_string(),
            product: "Widget".to_string(),
            segment: Some("SMB".to_string()),
            revenue: 10.0,
            units: 1,
            discount: 0.0,
        }
    }

    fn store() -> DatasetStore {
        DatasetStore::new(
            vec![
                sale(date(2024, 3, 1), "East"),
                sale(date(2024, 1, 1), "West"),
                sale(date(2024, 2, 1), "North"),
            ],
            vec![CustomerRecord {
                segment: "Enterprise".to_string(),
                channel: "Online".to_string(),
                satisfaction: 4.0,
                customer_count: 5,
            }],
        )
    }

    #[test]
    fn test_sales_sorted_by_date() {
        let store = store();
        let dates: Vec<_> = store.sales().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1)]);
    }

    #[test]
    fn test_sales_in_range_uses_inclusive_bounds() {
        let store = store();
        let range = DateRange::new(date(2024, 1, 1), date(2024, 2, 1)).unwrap();
        assert_eq!(store.sales_between(&range).len(), 2);

        let empty = DateRange::new(date(2023, 1, 1), date(2023, 12, 31)).unwrap();
        assert!(store.sales_between(&empty).is_empty());
    }

    #[test]
    fn test_date_extent() {
        let extent = store().date_extent().unwrap();
        assert_eq!(extent.start(), date(2024, 1, 1));
        assert_eq!(extent.end(), date(2024, 3, 1));
        assert!(DatasetStore::default().date_extent().is_none());
    }

    #[test]
    fn test_distinct_values_include_customer_segments() {
        let store = store();
        let segments = store.distinct_values(Dimension::Segment);
        assert!(segments.contains("SMB"));
        assert!(segments.contains("Enterprise"));
        assert_eq!(store.distinct_values(Dimension::Region).len(), 3);
        assert_eq!(store.channels().len(), 1);
    }

    #[test]
    fn test_from_csv() {
        let sales = "date,region,product,revenue,units,discount\n2024-01-01,West,Widget,10,1,0\n";
        let customers = "segment,channel,satisfaction,customer_count\nSMB,Online,4.5,3\n";
        let store = DatasetStore::from_csv(sales.as_bytes(), customers.as_bytes()).unwrap();
        assert_eq!(store.sales().len(), 1);
        assert_eq!(store.customers().len(), 1);
    }
}
