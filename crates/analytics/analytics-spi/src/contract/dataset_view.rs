//! Read-only access to the loaded tables

use crate::model::{CustomerRecord, DateRange, SalesRecord};

/// Immutable view over the two raw tables.
pub trait DatasetView: Send + Sync {
    /// Sales rows sorted by date ascending.
    fn sales(&self) -> &[SalesRecord];

    fn customers(&self) -> &[CustomerRecord];

    /// Sales rows within `range`, located by binary search on the date order.
    fn sales_in(&self, range: Option<&DateRange>) -> &[SalesRecord] {
        let sales = self.sales();
        match range {
            None => sales,
            Some(range) => {
                let lo = sales.partition_point(|r| r.date < range.start());
                let hi = sales.partition_point(|r| r.date <= range.end());
                &sales[lo..hi.max(lo)]
            }
        }
    }

    /// First and last sales date, `None` for an empty table.
    fn date_extent(&self) -> Option<DateRange> {
        let sales = self.sales();
        let first = sales.first()?.date;
        let last = sales.last()?.date;
        DateRange::new(first, last).ok()
    }
}
