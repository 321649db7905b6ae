//! Analytics Facade
//!
//! High-level API for the analytics stack. Re-exports all public types
//! from the SPI, core and API crates for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use analytics_api::*;

// Explicit re-exports for documentation
pub use analytics_api::prelude;

// Re-export core modules for direct access
pub use analytics_core::{aggregation, anomaly, crossfilter, filter, kpi, loader, registry, store};
