//! Named filter snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FilterState;

/// A saved view: a value copy of the filter state under a unique name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfiguration {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub filter_snapshot: FilterState,
    pub created_at: DateTime<Utc>,
}

impl ViewConfiguration {
    pub fn new(name: impl Into<String>, filter_snapshot: FilterState) -> Self {
        Self {
            name: name.into(),
            description: None,
            filter_snapshot,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimension;

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut live = FilterState::new().with_values(Dimension::Region, ["West"]);
        let view = ViewConfiguration::new("west", live.clone());
        live.set_values(Dimension::Region, None);
        assert!(view.filter_snapshot.regions().is_some());
    }

    #[test]
    fn test_description_defaults_on_deserialize() {
        let view = ViewConfiguration::new("all", FilterState::new());
        let mut value = serde_json::to_value(&view).unwrap();
        value.as_object_mut().unwrap().remove("description");
        let restored: ViewConfiguration = serde_json::from_value(value).unwrap();
        assert_eq!(restored.description, None);
        assert_eq!(restored.name, "all");
    }
}
