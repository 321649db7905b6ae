//! Named view persistence

use crate::model::{FilterState, ViewConfiguration};
use crate::Result;

/// Storage for named filter snapshots.
pub trait ViewStore {
    /// Store a copy of `state` under `name`, overwriting any existing entry in place.
    fn save(&mut self, name: &str, state: &FilterState) -> Result<()>;

    /// Copy of the snapshot stored under `name`.
    fn load(&self, name: &str) -> Result<FilterState>;

    /// Names in insertion order.
    fn list(&self) -> Vec<String>;

    fn delete(&mut self, name: &str) -> Result<ViewConfiguration>;
}
