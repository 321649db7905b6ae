//! Analytics error types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the dataset store, filter engine, view registry and aggregation layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A date range whose start falls after its end
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Required columns missing from a table header
    #[error("Schema error in {table} table: missing columns [{}]", missing.join(", "))]
    Schema { table: String, missing: Vec<String> },

    /// A cell that could not be parsed into its column type
    #[error("Parse error in {table} table at line {line}, column '{column}': {reason}")]
    Parse {
        table: String,
        line: u64,
        column: String,
        reason: String,
    },

    /// Named view configuration does not exist
    #[error("View '{name}' not found")]
    NotFound { name: String },

    /// View names must contain at least one non-whitespace character
    #[error("Invalid view name: names must not be blank")]
    InvalidViewName,

    /// Operation required at least one record after filtering
    #[error("No records match the active filters")]
    EmptyResult,

    /// Metric cannot be computed for the requested grouping
    #[error("Metric '{metric}' cannot be grouped by '{group_by}'")]
    InvalidGrouping { metric: String, group_by: String },

    /// Registry blob could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_range_message() {
        let error = AnalyticsError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range: start 2024-03-01 is after end 2024-01-01"
        );
    }

    #[test]
    fn test_schema_lists_missing_columns() {
        let error = AnalyticsError::Schema {
            table: "sales".to_string(),
            missing: vec!["revenue".to_string(), "units".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Schema error in sales table: missing columns [revenue, units]"
        );
    }

    #[test]
    fn test_parse_message_names_location() {
        let error = AnalyticsError::Parse {
            table: "customers".to_string(),
            line: 4,
            column: "satisfaction".to_string(),
            reason: "invalid float literal".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("customers"));
        assert!(msg.contains("line 4"));
        assert!(msg.contains("'satisfaction'"));
    }

    #[test]
    fn test_not_found_message() {
        let error = AnalyticsError::NotFound {
            name: "Q1-view".to_string(),
        };
        assert_eq!(error.to_string(), "View 'Q1-view' not found");
    }

    #[test]
    fn test_invalid_grouping_message() {
        let error = AnalyticsError::InvalidGrouping {
            metric: "satisfaction".to_string(),
            group_by: "region".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Metric 'satisfaction' cannot be grouped by 'region'"
        );
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn Error> = Box::new(AnalyticsError::EmptyResult);
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalyticsError>();
    }
}
