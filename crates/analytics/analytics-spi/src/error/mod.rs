//! Error module containing error types and result aliases

mod analytics_error;

pub use analytics_error::AnalyticsError;

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
