//! Interactive session context
//!
//! A session owns the live filter state, the saved-view registry and the
//! cross-filter engine, and reads a shared dataset. Every query runs against
//! the current filter; mutations report which parts of the filter changed.

use std::collections::BTreeSet;
use std::sync::Arc;

use analytics_facade::{
    aggregate_with, apply_with_delta, compute_kpis, detect_anomalies, moving_average,
    AggregatedSeries, Anomaly, ChartSelection, CrossFilter, DatasetStore, DatasetView, DateRange,
    Dimension, FilterDelta, FilterEvent, FilterState, GroupBy, KpiSummary, Metric,
    ViewConfiguration, ViewRegistry, ViewStore,
};
use forecast_facade::{Algorithm, ForecastEngine, ForecastRequest, ForecastResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::error::Result;

/// Values available to filter widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub regions: BTreeSet<String>,
    pub products: BTreeSet<String>,
    pub segments: BTreeSet<String>,
    pub channels: BTreeSet<String>,
    pub date_extent: Option<DateRange>,
}

pub struct Session {
    store: Arc<DatasetStore>,
    filter: FilterState,
    registry: ViewRegistry,
    crossfilter: CrossFilter,
    engine: ForecastEngine,
    config: DashboardConfig,
}

impl Session {
    pub fn new(store: Arc<DatasetStore>, config: DashboardConfig) -> Self {
        let engine = config.forecast.engine();
        info!(
            sales = store.sales().len(),
            customers = store.customers().len(),
            "dashboard session opened"
        );
        Self {
            store,
            filter: FilterState::new(),
            registry: ViewRegistry::new(),
            crossfilter: CrossFilter::new(),
            engine,
            config,
        }
    }

    pub fn with_defaults(store: Arc<DatasetStore>) -> Self {
        Self::new(store, DashboardConfig::default())
    }

    pub fn store(&self) -> &Arc<DatasetStore> {
        &self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> Catalog {
        Catalog {
            regions: self.store.distinct_values(Dimension::Region),
            products: self.store.distinct_values(Dimension::Product),
            segments: self.store.distinct_values(Dimension::Segment),
            channels: self.store.channels(),
            date_extent: self.store.date_extent(),
        }
    }

    // -- filter mutations --

    /// Apply a filter event. On error the filter is unchanged.
    pub fn apply(&mut self, event: &FilterEvent) -> Result<FilterDelta> {
        let (next, delta) = apply_with_delta(&self.filter, event)?;
        self.crossfilter.release(&delta);
        self.filter = next;
        Ok(delta)
    }

    /// Route a chart click through the cross-filter engine.
    pub fn select(&mut self, selection: &ChartSelection) -> Result<FilterDelta> {
        let (next, delta) = self.crossfilter.handle(&self.filter, selection)?;
        self.filter = next;
        Ok(delta)
    }

    /// Chart whose click currently constrains `dimension`.
    pub fn selection_owner(&self, dimension: Dimension) -> Option<&str> {
        self.crossfilter.owner(dimension)
    }

    // -- saved views --

    pub fn save_view(&mut self, name: &str) -> Result<()> {
        Ok(self.registry.save(name, &self.filter)?)
    }

    pub fn save_view_described(&mut self, name: &str, description: &str) -> Result<()> {
        Ok(self
            .registry
            .save_described(name, description, &self.filter)?)
    }

    /// Replace the live filter with a saved snapshot.
    pub fn load_view(&mut self, name: &str) -> Result<FilterDelta> {
        let state = self.registry.load(name)?;
        let delta = self.filter.diff(&state);
        self.crossfilter.release(&delta);
        self.filter = state;
        debug!(name, "loaded saved view");
        Ok(delta)
    }

    pub fn list_views(&self) -> Vec<String> {
        self.registry.list()
    }

    pub fn delete_view(&mut self, name: &str) -> Result<ViewConfiguration> {
        Ok(self.registry.delete(name)?)
    }

    pub fn export_views(&self) -> Result<String> {
        Ok(self.registry.export_json()?)
    }

    pub fn import_views(&mut self, json: &str) -> Result<usize> {
        Ok(self.registry.import_json(json)?)
    }

    // -- queries --

    pub fn aggregate(&self, group_by: GroupBy, metric: Metric) -> Result<AggregatedSeries> {
        Ok(aggregate_with(
            self.store.as_ref(),
            &self.filter,
            group_by,
            metric,
            &self.config.analytics.aggregation,
        )?)
    }

    pub fn kpis(&self) -> KpiSummary {
        compute_kpis(self.store.as_ref(), &self.filter, &self.config.analytics.kpi)
    }

    /// Anomalous periods of `metric` over time.
    pub fn anomalies(&self, metric: Metric) -> Result<Vec<Anomaly>> {
        let series = self.aggregate(GroupBy::Period, metric)?;
        let anomaly = self.config.analytics.anomaly;
        Ok(detect_anomalies(&series, anomaly.window, anomaly.threshold))
    }

    /// `metric` over time smoothed by each configured window, keyed by window.
    pub fn moving_averages(&self, metric: Metric) -> Result<Vec<(usize, AggregatedSeries)>> {
        let series = self.aggregate(GroupBy::Period, metric)?;
        Ok(self
            .config
            .analytics
            .moving_average_windows
            .iter()
            .map(|&window| (window, moving_average(&series, window)))
            .collect())
    }

    // -- forecasting --

    /// Forecast `metric` over the live filter with the configured defaults.
    pub fn forecast(&self, metric: Metric) -> Result<ForecastResult> {
        let forecast = &self.config.forecast;
        self.forecast_with(&self.filter, metric, forecast.algorithm, forecast.horizon)
    }

    /// Forecast with an explicit algorithm and horizon.
    pub fn forecast_using(
        &self,
        metric: Metric,
        algorithm: Algorithm,
        horizon: usize,
    ) -> Result<ForecastResult> {
        self.forecast_with(&self.filter, metric, algorithm, horizon)
    }

    /// Forecast for a single dimension value. The live filter is narrowed on
    /// a copy and left untouched.
    pub fn forecast_dimension(
        &self,
        dimension: Dimension,
        value: &str,
        metric: Metric,
        algorithm: Algorithm,
        horizon: usize,
    ) -> Result<ForecastResult> {
        let narrowed = self.filter.clone().with_values(dimension, [value]);
        self.forecast_with(&narrowed, metric, algorithm, horizon)
    }

    fn forecast_with(
        &self,
        filter: &FilterState,
        metric: Metric,
        algorithm: Algorithm,
        horizon: usize,
    ) -> Result<ForecastResult> {
        let series = aggregate_with(
            self.store.as_ref(),
            filter,
            GroupBy::Period,
            metric,
            &self.config.analytics.aggregation,
        )?;
        let request = ForecastRequest::new(
            series,
            horizon,
            algorithm,
            self.config.forecast.confidence_level,
        );
        Ok(self.engine.forecast(&request)?)
    }
}
