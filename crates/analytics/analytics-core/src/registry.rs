//! Process-local registry of named view configurations.

use analytics_spi::{
    AnalyticsError, FilterState, Result, ViewConfiguration, ViewStore,
};
use tracing::{debug, info};

/// Named filter snapshots kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    views: Vec<ViewConfiguration>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a full view configuration. An existing entry with the same name
    /// is replaced in place and keeps its list position.
    pub fn save_view(&mut self, view: ViewConfiguration) -> Result<()> {
        validate_name(&view.name)?;
        match self.position(&view.name) {
            Some(idx) => {
                debug!(name = %view.name, "overwriting saved view");
                self.views[idx] = view;
            }
            None => {
                debug!(name = %view.name, "saving new view");
                self.views.push(view);
            }
        }
        Ok(())
    }

    /// Save with a free-text description.
    pub fn save_described(
        &mut self,
        name: &str,
        description: &str,
        state: &FilterState,
    ) -> Result<()> {
        self.save_view(ViewConfiguration::new(name, state.clone()).with_description(description))
    }

    pub fn get(&self, name: &str) -> Option<&ViewConfiguration> {
        self.views.iter().find(|v| v.name == name)
    }

    pub fn views(&self) -> &[ViewConfiguration] {
        &self.views
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Serialize every view, in order, as a JSON array.
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.views)
            .map_err(|e| AnalyticsError::Serialization(e.to_string()))
    }

    /// Merge views from a JSON array produced by [`ViewRegistry::export_json`].
    ///
    /// The blob is validated as a whole before anything is stored; on error
    /// the registry is unchanged. Returns the number of views imported.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let incoming: Vec<ViewConfiguration> = serde_json::from_str(json)
            .map_err(|e| AnalyticsError::Serialization(e.to_string()))?;
        for view in &incoming {
            validate_name(&view.name)?;
        }
        let count = incoming.len();
        for view in incoming {
            self.save_view(view)?;
        }
        info!(count, "imported saved views");
        Ok(count)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.views.iter().position(|v| v.name == name)
    }
}

impl ViewStore for ViewRegistry {
    fn save(&mut self, name: &str, state: &FilterState) -> Result<()> {
        // Overwrites keep the prior description.
        let description = self.get(name).and_then(|v| v.description.clone());
        let mut view = ViewConfiguration::new(name, state.clone());
        view.description = description;
        self.save_view(view)
    }

    fn load(&self, name: &str) -> Result<FilterState> {
        self.get(name)
            .map(|v| v.filter_snapshot.clone())
            .ok_or_else(|| AnalyticsError::NotFound {
                name: name.to_string(),
            })
    }

    fn list(&self) -> Vec<String> {
        self.views.iter().map(|v| v.name.clone()).collect()
    }

    fn delete(&mut self, name: &str) -> Result<ViewConfiguration> {
        let idx = self.position(name).ok_or_else(|| AnalyticsError::NotFound {
            name: name.to_string(),
        })?;
        info!(name, "deleted saved view");
        Ok(self.views.remove(idx))
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AnalyticsError::InvalidViewName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics_spi::{DateRange, Dimension};
    use chrono::NaiveDate;

    fn q1() -> FilterState {
        FilterState::new().with_date_range(
            DateRange::new(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_load_returns_saved_state() {
        let mut registry = ViewRegistry::new();
        registry.save("Q1-view", &q1()).unwrap();
        assert_eq!(registry.load("Q1-view").unwrap(), q1());
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut registry = ViewRegistry::new();
        registry.save("a", &FilterState::new()).unwrap();
        registry.save("b", &FilterState::new()).unwrap();
        registry.save("a", &q1()).unwrap();
        assert_eq!(registry.list(), vec!["a", "b"]);
        assert_eq!(registry.load("a").unwrap(), q1());
    }

    #[test]
    fn test_overwrite_keeps_description() {
        let mut registry = ViewRegistry::new();
        registry.save_described("a", "first quarter", &q1()).unwrap();
        registry.save("a", &FilterState::new()).unwrap();
        assert_eq!(registry.get("a").unwrap().description.as_deref(), Some("first quarter"));
    }

    #[test]
    fn test_unknown_name_is_not_found() {
        let mut registry = ViewRegistry::new();
        assert!(matches!(
            registry.load("missing"),
            Err(AnalyticsError::NotFound { .. })
        ));
        assert!(matches!(
            registry.delete("missing"),
            Err(AnalyticsError::NotFound { .. })
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut registry = ViewRegistry::new();
        assert_eq!(
            registry.save("   ", &FilterState::new()),
            Err(AnalyticsError::InvalidViewName)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_delete_removes_entry() {
        let mut registry = ViewRegistry::new();
        registry.save("a", &q1()).unwrap();
        registry.save("b", &q1()).unwrap();
        let removed = registry.delete("a").unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(registry.list(), vec!["b"]);
    }

    #[test]
    fn test_loaded_state_is_independent_copy() {
        let mut registry = ViewRegistry::new();
        registry.save("west", &FilterState::new().with_values(Dimension::Region, ["West"])).unwrap();
        let mut loaded = registry.load("west").unwrap();
        loaded.set_values(Dimension::Region, None);
        assert!(registry.load("west").unwrap().regions().is_some());
    }

    #[test]
    fn test_export_import_roundtrip_preserves_order() {
        let mut registry = ViewRegistry::new();
        registry.save("z", &q1()).unwrap();
        registry.save("a", &FilterState::new()).unwrap();
        let blob = registry.export_json().unwrap();

        let mut restored = ViewRegistry::new();
        assert_eq!(restored.import_json(&blob).unwrap(), 2);
        assert_eq!(restored.list(), vec!["z", "a"]);
        assert_eq!(restored.load("z").unwrap(), q1());
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let mut registry = ViewRegistry::new();
        registry.save("keep", &q1()).unwrap();
        let bad = r#"[{"name":"ok","filter_snapshot":{},"created_at":"2024-01-01T00:00:00Z"},
                      {"name":" ","filter_snapshot":{},"created_at":"2024-01-01T00:00:00Z"}]"#;
        assert_eq!(registry.import_json(bad), Err(AnalyticsError::InvalidViewName));
        assert_eq!(registry.list(), vec!["keep"]);

        assert!(matches!(
            registry.import_json("not json"),
            Err(AnalyticsError::Serialization(_))
        ));
    }
}
