//! Dashboard
//!
//! Session context for an interactive sales dashboard: owns the live filter
//! state, saved views and cross-filter engine over a shared dataset, and
//! answers aggregation, KPI, anomaly and forecast queries against it.
//!
//! ```no_run
//! use std::sync::Arc;
//! use dashboard::{DashboardConfig, Session};
//! use analytics_facade::{DatasetStore, FilterEvent, GroupBy, Metric};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DashboardConfig::from_env()?;
//! dashboard::init_tracing(&config.log_filter);
//!
//! let store = DatasetStore::from_csv(
//!     std::fs::File::open("sales.csv")?,
//!     std::fs::File::open("customers.csv")?,
//! )?;
//! let mut session = Session::new(Arc::new(store), config);
//! session.apply(&FilterEvent::ToggleRegion("West".into()))?;
//! let _by_product = session.aggregate(GroupBy::Product, Metric::Revenue)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;

pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use session::{Catalog, Session};
pub use telemetry::init_tracing;

pub use analytics_facade as analytics;
pub use forecast_facade as forecast;
