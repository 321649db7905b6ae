//! Calendar bucket granularity for time-grouped series.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DateRange;

/// Ranges up to this many days are bucketed daily.
pub const DAILY_MAX_SPAN_DAYS: i64 = 92;
/// Ranges up to this many days are bucketed weekly; longer ranges monthly.
pub const WEEKLY_MAX_SPAN_DAYS: i64 = 731;

/// Calendar period width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Calendar days
    Day,
    /// Weeks starting on Monday
    Week,
    /// Calendar months
    Month,
}

impl Granularity {
    /// Granularity for a range using the default span thresholds.
    pub fn for_range(range: &DateRange) -> Self {
        Self::for_span(range.span_days(), DAILY_MAX_SPAN_DAYS, WEEKLY_MAX_SPAN_DAYS)
    }

    /// Granularity for an inclusive span of `days` with explicit thresholds.
    pub fn for_span(days: i64, daily_max: i64, weekly_max: i64) -> Self {
        if days <= daily_max {
            Granularity::Day
        } else if days <= weekly_max {
            Granularity::Week
        } else {
            Granularity::Month
        }
    }

    /// Start of the period containing `date`.
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => {
                let offset = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(offset)).unwrap_or(date)
            }
            Granularity::Month => date.with_day(1).unwrap_or(date),
        }
    }

    /// Start of the period `steps` periods after `start`.
    pub fn advance(&self, start: NaiveDate, steps: u32) -> Option<NaiveDate> {
        match self {
            Granularity::Day => start.checked_add_days(Days::new(u64::from(steps))),
            Granularity::Week => start.checked_add_days(Days::new(7 * u64::from(steps))),
            Granularity::Month => start.checked_add_months(Months::new(steps)),
        }
    }

    /// Every period start from the bucket of `range.start()` through the bucket of `range.end()`.
    pub fn buckets(&self, range: &DateRange) -> Vec<NaiveDate> {
        let last = self.bucket_start(range.end());
        let mut current = self.bucket_start(range.start());
        let mut out = Vec::new();
        while current <= last {
            out.push(current);
            match self.advance(current, 1) {
                Some(next) => current = next,
                None => break,
            }
        }
        out
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Granularity::Day => "Daily",
            Granularity::Week => "Weekly",
            Granularity::Month => "Monthly",
        };
        write!(f, "{}", s)
    }
}
