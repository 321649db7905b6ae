//! CSV ingestion for the sales and customer tables.
//!
//! Header matching is case-insensitive and treats spaces as underscores, so
//! `Customer Count` matches `customer_count`. No other aliasing is done.

use std::collections::HashMap;
use std::fmt::Display;
use std::io::Read;
use std::str::FromStr;

use analytics_spi::{AnalyticsError, CustomerRecord, Result, SalesRecord};
use chrono::NaiveDate;
use csv::StringRecord;

pub const SALES_TABLE: &str = "sales";
pub const CUSTOMERS_TABLE: &str = "customers";

const DATE_FORMAT: &str = "%Y-%m-%d";

const SALES_COLUMNS: [&str; 6] = ["date", "region", "product", "revenue", "units", "discount"];
const CUSTOMER_COLUMNS: [&str; 4] = ["segment", "channel", "satisfaction", "customer_count"];

/// Read the sales table. Rows are returned in file order.
pub fn read_sales<R: Read>(reader: R) -> Result<Vec<SalesRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let columns = Columns::from_headers(SALES_TABLE, headers(SALES_TABLE, &mut reader)?, &SALES_COLUMNS)?;
    let segment = columns.optional("segment");

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(SALES_TABLE, &e))?;
        let row = Row::new(SALES_TABLE, &record);

        let date_raw = row.text(&columns, "date");
        let date = NaiveDate::parse_from_str(date_raw.trim(), DATE_FORMAT)
            .map_err(|e| row.error("date", e))?;
        let discount: f64 = row.parse(&columns, "discount")?;
        if !(0.0..=1.0).contains(&discount) {
            return Err(row.error("discount", "must be a fraction in [0, 1]"));
        }
        let revenue: f64 = row.parse(&columns, "revenue")?;
        if !revenue.is_finite() {
            return Err(row.error("revenue", "must be finite"));
        }

        rows.push(SalesRecord {
            date,
            region: row.text(&columns, "region").trim().to_string(),
            product: row.text(&columns, "product").trim().to_string(),
            segment: segment
                .and_then(|idx| record.get(idx))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            revenue,
            units: row.parse(&columns, "units")?,
            discount,
        });
    }
    Ok(rows)
}

/// Read the customer table.
pub fn read_customers<R: Read>(reader: R) -> Result<Vec<CustomerRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let columns = Columns::from_headers(
        CUSTOMERS_TABLE,
        headers(CUSTOMERS_TABLE, &mut reader)?,
        &CUSTOMER_COLUMNS,
    )?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(CUSTOMERS_TABLE, &e))?;
        let row = Row::new(CUSTOMERS_TABLE, &record);
        let satisfaction: f64 = row.parse(&columns, "satisfaction")?;
        if !satisfaction.is_finite() {
            return Err(row.error("satisfaction", "must be finite"));
        }
        rows.push(CustomerRecord {
            segment: row.text(&columns, "segment").trim().to_string(),
            channel: row.text(&columns, "channel").trim().to_string(),
            satisfaction,
            customer_count: row.parse(&columns, "customer_count")?,
        });
    }
    Ok(rows)
}

fn headers<R: Read>(table: &str, reader: &mut csv::Reader<R>) -> Result<StringRecord> {
    reader
        .headers()
        .map(Clone::clone)
        .map_err(|e| csv_error(table, &e))
}

fn normalize_header(header: &str) -> String {
    header.trim().to_ascii_lowercase().replace(' ', "_")
}

fn csv_error(table: &str, error: &csv::Error) -> AnalyticsError {
    AnalyticsError::Parse {
        table: table.to_string(),
        line: error.position().map(|p| p.line()).unwrap_or(0),
        column: String::new(),
        reason: error.to_string(),
    }
}

/// Normalized header name to column position.
struct Columns {
    positions: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(table: &str, headers: StringRecord, required: &[&str]) -> Result<Self> {
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, h)| (normalize_header(h), idx))
            .collect();

        let missing: Vec<String> = required
            .iter()
            .filter(|name| !positions.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AnalyticsError::Schema {
                table: table.to_string(),
                missing,
            });
        }
        Ok(Self { positions })
    }

    fn optional(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

struct Row<'a> {
    table: &'a str,
    record: &'a StringRecord,
    line: u64,
}

impl<'a> Row<'a> {
    fn new(table: &'a str, record: &'a StringRecord) -> Self {
        Self {
            table,
            record,
            line: record.position().map(|p| p.line()).unwrap_or(0),
        }
    }

    // Required columns are validated up front, and non-flexible readers reject short rows.
    fn text(&self, columns: &Columns, name: &str) -> &'a str {
        columns
            .optional(name)
            .and_then(|idx| self.record.get(idx))
            .unwrap_or("")
    }

    fn parse<T>(&self, columns: &Columns, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.text(columns, name)
            .trim()
            .parse::<T>()
            .map_err(|e| self.error(name, e))
    }

    fn error(&self, column: &str, reason: impl Display) -> AnalyticsError {
        AnalyticsError::Parse {
            table: self.table.to_string(),
            line: self.line,
            column: column.to_string(),
            reason: reason.to_string(),
        }
    }
}
